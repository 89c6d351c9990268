//! Transport configuration for the item service client

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default cap on concurrent connections to the item service host.
pub const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 5;

/// `Content-Type` header value applied to every outgoing request.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Connection parameters and transport defaults for the item service.
///
/// Constructed once and handed to [`ItemClient::new`](crate::ItemClient::new);
/// never mutated afterwards. Tests point `host`/`port` at a local mock
/// server instead of the real service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hostname of the item service (default: localhost)
    pub host: String,
    /// TCP port of the item service (default: 8080)
    pub port: u16,
    /// Path prefix the service is mounted under, without slashes
    pub project: String,
    /// Request timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Maximum concurrent connections to the service host (default: 5).
    /// Requests beyond the cap queue client-side until a slot frees up.
    pub max_connections_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            project: "app".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_connections_per_host: DEFAULT_MAX_CONNECTIONS_PER_HOST,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given host, port and project prefix,
    /// with transport defaults for everything else.
    pub fn new(host: impl Into<String>, port: u16, project: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            project: project.into(),
            ..Self::default()
        }
    }

    /// Base URL of the service: `http://<host>:<port>/<project>/`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/{}/", self.host, self.port, self.project)
    }

    /// Collection endpoint for items: `http://<host>:<port>/<project>/item/`.
    pub fn item_url(&self) -> String {
        format!("{}item/", self.base_url())
    }
}
