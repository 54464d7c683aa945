//! Database repositories for data access layer
//!
//! Each repository owns one table. Services reach them through the traits in
//! [`traits`] so tests can substitute in-memory stores.

pub mod media;
pub mod traits;
pub mod user;

pub use media::MediaRepository;
pub use user::UserRepository;

/// Escape LIKE wildcards so user input is matched literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
