//! Typed wrappers for the consumed REST surface, one module per area.

pub mod attachments;
pub mod auth;
pub mod comments;
pub mod filters;
pub mod incidents;
pub mod playbacks;
pub mod users;
