//! An async HTTP client for the Item REST service
//!
//! This library provides a small, typed client for the item endpoint of the
//! service (`http://<host>:<port>/<project>/item/`): fetching the item
//! collection and creating, updating or deleting single items.
//!
//! # Features
//! - Async/await API using tokio
//! - Explicit, injectable transport configuration (host, port, timeout)
//! - Bounded concurrency: at most `max_connections_per_host` in-flight
//!   requests, the rest queue client-side
//! - Typed errors distinguishing transport failures, unexpected statuses
//!   and undecodable payloads
//! - Built-in request timeout support
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use item_client::{ClientConfig, Item, ItemClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), item_client::Error> {
//!     let client = ItemClient::new(ClientConfig::new("localhost", 8080, "app"))?;
//!
//!     // Create an item
//!     let item = Item::new(1, "First item", Vec::new());
//!     client.create(&item).await?;
//!
//!     // List everything the server has
//!     for item in client.fetch_all().await? {
//!         println!("{}: {}", item.id, item.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ItemClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::{Item, Operation};
