//! Authentication and authorization

pub mod jwt;
pub mod role;

pub use jwt::AuthUser;
