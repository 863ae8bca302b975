//! # watchdesk-client
//!
//! Authenticated REST client for the watchdesk back-office API.
//!
//! This crate provides:
//! - The bearer-authenticated request pipeline with transparent token
//!   refresh (concurrent 401s share one refresh, queued FIFO)
//! - Typed wrappers for the full consumed endpoint surface (auth, users,
//!   incidents, comments, playbacks, filter options)
//! - The multipart attachment transport with streaming progress
//! - A fixed-interval comment poller
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use watchdesk_client::{ApiClient, ClientConfig};
//! use watchdesk_core::MemoryCredentialStore;
//!
//! #[tokio::main]
//! async fn main() -> watchdesk_core::Result<()> {
//!     let store = Arc::new(MemoryCredentialStore::new());
//!     let client = ApiClient::new(ClientConfig::from_env(), store)?;
//!     client.login("aturing", "hunter2", true).await?;
//!     let me = client.me().await?;
//!     println!("logged in as {}", me.full_name);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod endpoints;
pub mod pipeline;
pub mod poller;

pub use config::ClientConfig;
pub use endpoints::filters::FilterOptions;
pub use pipeline::ApiClient;
pub use poller::CommentPoller;

// Re-export core types
pub use watchdesk_core as core;

pub(crate) use pipeline::RequestSpec;
