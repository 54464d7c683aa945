pub mod media;
pub mod user;

pub use media::{MediaService, MediaUpload};
pub use user::UserService;
