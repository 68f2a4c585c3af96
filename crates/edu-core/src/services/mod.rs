//! Domain services (business logic)

pub mod tenant_context;
pub mod tenant_service;
pub mod foundation_service;
pub mod auth_service;
pub mod student_service;

pub use tenant_context::{ResolutionMode, TenantContextResolver};
pub use tenant_service::TenantService;
pub use foundation_service::FoundationService;
pub use auth_service::{AuthService, LoginResult, UserInfo};
pub use student_service::StudentService;
