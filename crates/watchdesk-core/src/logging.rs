//! Structured logging schema and field name constants for watchdesk.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Failed request surfaced to the caller, fatal refresh failure |
//! | WARN  | Recoverable issue (rejected file, failed draft persist, best-effort delete) |
//! | INFO  | Lifecycle events (login, logout, batch upload completion) |
//! | DEBUG | Decision points (refresh queued vs. started, route decisions) |
//! | TRACE | Per-chunk progress ticks, per-item iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID attached to every outgoing request.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "client", "upload", "session"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "login", "refresh", "upload_one", "stage_files"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// HTTP method of the outgoing request.
pub const METHOD: &str = "method";

/// Request path relative to the base URL.
pub const PATH: &str = "path";

/// HTTP status code of the response.
pub const HTTP_STATUS: &str = "http_status";

/// Number of continuations queued behind an in-flight refresh.
pub const QUEUE_DEPTH: &str = "queue_depth";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Incident being operated on.
pub const INCIDENT_ID: &str = "incident_id";

/// Index of an attachment item within the tray.
pub const ITEM_INDEX: &str = "item_index";

/// Name of the file being staged or uploaded.
pub const FILE_NAME: &str = "file_name";

/// Size of the file in bytes.
pub const FILE_SIZE: &str = "file_size";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Upload progress percentage (0-100).
pub const PROGRESS_PCT: &str = "progress_pct";

/// Number of results returned by a list or poll.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
