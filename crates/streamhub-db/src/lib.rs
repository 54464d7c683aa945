//! StreamHub database layer
//!
//! PostgreSQL repositories for media and users, and the repository traits the
//! API services depend on.

pub mod db;

pub use db::traits::{MediaStore, UserStore};
pub use db::{MediaRepository, UserRepository};
