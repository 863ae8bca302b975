//! # watchdesk-core
//!
//! Core types, traits, and abstractions for the watchdesk client library.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the watchdesk client and upload crates depend on.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod roles;
pub mod routes;
pub mod session;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{ClientEvent, EventBus};
pub use models::*;
pub use roles::Role;
pub use routes::{route_decision, RouteAction};
pub use session::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, Persistence, SessionCredentials,
};
pub use traits::{AttachmentTransport, DraftStore, ProgressFn};
