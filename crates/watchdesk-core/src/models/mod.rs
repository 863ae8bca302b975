//! Wire types for the back-office REST surface.
//!
//! Field names follow the backend's camelCase JSON via serde renames; the
//! one deliberately normalized shape is [`uploads::StoredUpload`], which
//! absorbs the upload endpoint's inconsistent URL field naming at the API
//! boundary.

pub mod auth;
pub mod comments;
pub mod envelope;
pub mod filters;
pub mod incidents;
pub mod playbacks;
pub mod uploads;
pub mod users;

pub use auth::*;
pub use comments::*;
pub use envelope::*;
pub use filters::*;
pub use incidents::*;
pub use playbacks::*;
pub use uploads::*;
pub use users::*;
