//! Application-wide constants.

/// File extensions accepted for upload. Matching is case-insensitive.
pub const ALLOWED_EXTENSIONS: &[&str] = &["mp3", "mp4", "wav", "avi", "mov", "mkv"];

/// TTL of presigned URLs handed out by the service-level stream URL operation (3 hours).
pub const STREAM_URL_TTL_SECS: u64 = 10_800;

/// TTL of presigned URLs returned by the direct-fetch stream endpoint (1 hour).
pub const DIRECT_STREAM_URL_TTL_SECS: u64 = 3_600;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound applied to the page size of public listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Content type used when the client does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
