//! Centralized default constants for watchdesk.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default API base URL when `WATCHDESK_BASE_URL` is not set.
pub const BASE_URL: &str = "http://localhost:8080";

/// Path the client is sent to when the session cannot be recovered.
pub const LOGIN_PATH: &str = "/login";

// =============================================================================
// SESSION
// =============================================================================

/// Credential lifetime for "keep me logged in" sessions, in days.
pub const PERSISTENT_LOGIN_DAYS: u32 = 7;

// =============================================================================
// ATTACHMENTS
// =============================================================================

/// Per-file upload size ceiling (25 MiB).
pub const MAX_ATTACHMENT_SIZE_BYTES: usize = 25 * 1024 * 1024;

/// Key under which successfully uploaded attachment descriptors are kept
/// in the per-session draft store.
pub const DRAFT_STORAGE_KEY: &str = "incident-uploaded-files-draft";

/// Multipart form field name the backend expects for attachment uploads.
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Chunk size used when streaming an upload body (drives progress ticks).
pub const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

// =============================================================================
// PAGINATION
// =============================================================================

/// First page number (the backend pages from 1).
pub const PAGE_NO: u32 = 1;

/// Default page size for list endpoints.
pub const PAGE_SIZE: u32 = 10;

/// Page size used when loading filter option lists (customers, sites, reporters).
pub const FILTER_PAGE_SIZE: u32 = 100;

// =============================================================================
// POLLING
// =============================================================================

/// Fixed interval between comment refresh polls, in milliseconds.
pub const COMMENT_POLL_INTERVAL_MS: u64 = 5_000;
