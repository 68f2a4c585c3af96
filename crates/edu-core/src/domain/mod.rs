//! # EDU Core - Domain Module
//!
//! Domain entities for the tenant directory and tenant-scoped data.

pub mod namespace;
pub mod context;
pub mod tenant;
pub mod foundation;
pub mod user;
pub mod student;

// Re-export all entities and enums
pub use namespace::NamespaceKey;
pub use context::{ExecutionContext, Principal, Role};
pub use tenant::{ProvisionTenant, Tenant, TenantProvisioning};
pub use foundation::Foundation;
pub use user::TenantUser;
pub use student::{NewStudent, Student};
