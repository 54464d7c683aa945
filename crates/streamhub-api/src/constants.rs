//! API constants

/// Prefix of every versioned route.
pub const API_PREFIX: &str = "/api/v1";

/// Route serving local-provider files.
pub const FILES_PREFIX: &str = "/files";
