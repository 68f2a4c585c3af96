//! # EDU Security
//! 
//! Security utilities: access token issue/verification and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
