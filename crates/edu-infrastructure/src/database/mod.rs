//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod executor;
pub(crate) mod locks;
pub mod migrations;
pub mod postgres;
mod error;

pub(crate) use error::db_error;

pub use connection::create_pool;
pub use executor::{NamespaceExecutor, NamespaceTransaction};
pub use migrations::run_directory_migrations;
pub use postgres::{PgFoundationRepository, PgStudentRepository, PgTenantDirectory, PgTenantUserRepository};
