//! HTTP client implementation for the item service

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::{ClientConfig, CONTENT_TYPE_JSON};
use crate::error::{Error, Result};
use crate::types::{Item, Operation};

/// Async client for the item endpoint of the service.
///
/// Holds the transport configuration and a shared hyper client; cloning is
/// cheap and clones share the same connection pool and concurrency cap.
/// Every request is independent: single-shot, non-retrying, subject to the
/// configured timeout.
///
/// # Example
/// ```rust,no_run
/// use item_client::{ClientConfig, ItemClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), item_client::Error> {
///     let client = ItemClient::new(ClientConfig::new("localhost", 8080, "app"))?;
///     let items = client.fetch_all().await?;
///     println!("{} items", items.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ItemClient {
    config: Arc<ClientConfig>,
    http_client: HttpClient<HttpConnector, Full<Bytes>>,
    permits: Arc<Semaphore>,
}

impl ItemClient {
    /// Create a client for the service described by `config`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidUrl`] if the configured host/port/project do
    /// not combine into a parseable endpoint URL.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate the collection endpoint early
        let endpoint = config.item_url();
        let _: Uri = endpoint
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{endpoint}: {e}")))?;

        let http_client = HttpClient::builder(TokioExecutor::new())
            .pool_max_idle_per_host(config.max_connections_per_host)
            .build_http();

        let permits = Arc::new(Semaphore::new(config.max_connections_per_host));

        Ok(Self {
            config: Arc::new(config),
            http_client,
            permits,
        })
    }

    /// The transport configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the whole item collection.
    ///
    /// Issues `GET <collection URL>` and decodes the response as a JSON
    /// array of items, returned in server order.
    ///
    /// # Errors
    /// [`Error::Transport`] / [`Error::Timeout`] on network failure,
    /// [`Error::UnexpectedStatus`] for any status other than 200, and
    /// [`Error::InvalidPayload`] when the 200 body is empty or does not
    /// decode as a list of items.
    pub async fn fetch_all(&self) -> Result<Vec<Item>> {
        let url = self.config.item_url();
        let body = self.request(&url, Method::GET, None).await?;

        if body.is_empty() {
            return Err(Error::InvalidPayload("empty response body".to_string()));
        }

        serde_json::from_slice(&body).map_err(|e| Error::InvalidPayload(e.to_string()))
    }

    /// Issue a single operation for `item` against the service.
    ///
    /// | Operation | Verb   | URL                      | Body         |
    /// |-----------|--------|--------------------------|--------------|
    /// | `Fetch`   | GET    | collection URL           | none         |
    /// | `Create`  | POST   | collection URL           | encoded item |
    /// | `Update`  | PUT    | collection URL + `{id}`  | encoded item |
    /// | `Delete`  | DELETE | collection URL + `{id}`  | encoded item |
    ///
    /// Success means the server answered 200 with a non-empty body; the
    /// response content itself is not interpreted.
    ///
    /// # Errors
    /// [`Error::Encode`] if the item cannot be serialized,
    /// [`Error::Transport`] / [`Error::Timeout`] on network failure,
    /// [`Error::UnexpectedStatus`] for non-200 statuses and
    /// [`Error::InvalidPayload`] for a 200 without a body.
    pub async fn apply(&self, item: &Item, operation: Operation) -> Result<()> {
        let url = self.resolve_url(item, operation);

        let body = if operation.has_body() {
            let encoded =
                serde_json::to_vec(item).map_err(|e| Error::Encode(e.to_string()))?;
            Some(Bytes::from(encoded))
        } else {
            None
        };

        let response_body = self.request(&url, operation.method(), body).await?;

        if response_body.is_empty() {
            return Err(Error::InvalidPayload("empty response body".to_string()));
        }

        Ok(())
    }

    /// Create `item` on the server (`POST` to the collection URL).
    pub async fn create(&self, item: &Item) -> Result<()> {
        self.apply(item, Operation::Create).await
    }

    /// Update `item` on the server (`PUT` to its id-addressed URL).
    pub async fn update(&self, item: &Item) -> Result<()> {
        self.apply(item, Operation::Update).await
    }

    /// Delete `item` on the server (`DELETE` to its id-addressed URL).
    pub async fn delete(&self, item: &Item) -> Result<()> {
        self.apply(item, Operation::Delete).await
    }

    /// Target URL for an operation. Id-addressed operations append the
    /// decimal item id to the collection URL, which ends in `/`.
    fn resolve_url(&self, item: &Item, operation: Operation) -> String {
        match operation {
            Operation::Fetch | Operation::Create => self.config.item_url(),
            Operation::Update | Operation::Delete => {
                format!("{}{}", self.config.item_url(), item.id)
            }
        }
    }

    /// Internal request method: resolves the URI, applies the default
    /// header, enforces the concurrency cap and timeout, and maps any
    /// status other than 200 to an error. Returns the collected body.
    async fn request(&self, url: &str, method: Method, body: Option<Bytes>) -> Result<Bytes> {
        let uri: Uri = url
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;

        let req = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header(hyper::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(Full::new(body.unwrap_or_default()))
            .map_err(|e| Error::Transport(format!("failed to build request: {e}")))?;

        debug!("Sending request: {} {}", method, url);

        // Requests beyond the per-host cap queue here until a slot frees up.
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| Error::Transport("client has shut down".to_string()))?;

        let round_trip = async {
            let response = self
                .http_client
                .request(req)
                .await
                .map_err(|e| Error::Transport(e.to_string()))?;

            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::NoResponse(e.to_string()))?
                .to_bytes();

            Ok::<(StatusCode, Bytes), Error>((status, body))
        };

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let (status, body) = match tokio::time::timeout(timeout, round_trip).await {
            Err(_) => {
                warn!("{} {} timed out after {}ms", method, url, self.config.timeout_ms);
                return Err(Error::Timeout(self.config.timeout_ms));
            }
            Ok(Err(e)) => {
                warn!("{} {} failed: {}", method, url, e);
                return Err(e);
            }
            Ok(Ok(result)) => result,
        };

        if status != StatusCode::OK {
            warn!("{} {} returned status {}", method, url, status);
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ItemClient {
        ItemClient::new(ClientConfig::new("localhost", 8080, "app")).unwrap()
    }

    #[test]
    fn new_accepts_valid_config() {
        let client = ItemClient::new(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn new_rejects_unparseable_endpoint() {
        let result = ItemClient::new(ClientConfig::new("bad host", 8080, "app"));
        match result {
            Err(Error::InvalidUrl(_)) => {}
            other => panic!("Expected InvalidUrl, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn fetch_and_create_target_the_collection_url() {
        let client = client();
        let item = Item::new(7, "x", Vec::new());
        assert_eq!(
            client.resolve_url(&item, Operation::Fetch),
            "http://localhost:8080/app/item/"
        );
        assert_eq!(
            client.resolve_url(&item, Operation::Create),
            "http://localhost:8080/app/item/"
        );
    }

    #[test]
    fn update_and_delete_append_the_decimal_id() {
        let client = client();
        let item = Item::new(123, "x", Vec::new());
        assert_eq!(
            client.resolve_url(&item, Operation::Update),
            "http://localhost:8080/app/item/123"
        );
        assert_eq!(
            client.resolve_url(&item, Operation::Delete),
            "http://localhost:8080/app/item/123"
        );
    }

    #[test]
    fn config_is_exposed_read_only() {
        let client = client();
        assert_eq!(client.config().port, 8080);
        assert_eq!(client.config().project, "app");
    }
}
