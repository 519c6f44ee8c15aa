pub mod dtos;
pub mod jwt;
pub mod middleware;

pub use middleware::{AdminUser, AuthError, AuthenticatedUser};
