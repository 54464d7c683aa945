//! StreamHub API Library
//!
//! HTTP handlers, services and application setup for the media hosting API.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
pub mod telemetry;
pub mod test_helpers;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{MediaService, MediaUpload, UserService};
pub use state::AppState;
