//! # EDU Core
//! 
//! Domain types, repository and workflow ports, and the services that sit
//! between the HTTP layer and the tenant-scoped storage.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
