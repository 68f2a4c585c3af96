//! Repository and workflow traits (ports)

pub mod tenant_directory;
pub mod foundation_repository;
pub mod tenant_lifecycle;
pub mod user_repository;
pub mod student_repository;

pub use tenant_directory::TenantDirectory;
pub use foundation_repository::FoundationRepository;
pub use tenant_lifecycle::TenantLifecycle;
pub use user_repository::TenantUserRepository;
pub use student_repository::StudentRepository;

#[cfg(any(test, feature = "mocks"))]
pub use tenant_directory::MockTenantDirectory;
#[cfg(any(test, feature = "mocks"))]
pub use foundation_repository::MockFoundationRepository;
#[cfg(any(test, feature = "mocks"))]
pub use tenant_lifecycle::MockTenantLifecycle;
#[cfg(any(test, feature = "mocks"))]
pub use user_repository::MockTenantUserRepository;
#[cfg(any(test, feature = "mocks"))]
pub use student_repository::MockStudentRepository;
