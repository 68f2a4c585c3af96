//! # EDU Infrastructure
//! 
//! PostgreSQL adapters: connection pool, namespace-scoped executor, tenant
//! directory, and the provisioning/deprovisioning workflows.

pub mod baseline;
pub mod database;
pub mod lifecycle;

pub use baseline::{BaselineError, BaselineSchema};
pub use database::{
    create_pool, run_directory_migrations, NamespaceExecutor, NamespaceTransaction,
    PgFoundationRepository, PgStudentRepository, PgTenantDirectory, PgTenantUserRepository,
};
pub use lifecycle::PgTenantLifecycle;
