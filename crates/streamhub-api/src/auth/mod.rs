//! Authentication: HS256 JWTs, bcrypt password hashes and the bearer-token middleware.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::JwtService;
pub use middleware::{auth_middleware, AuthState};
pub use models::{AuthUser, JwtClaims};
