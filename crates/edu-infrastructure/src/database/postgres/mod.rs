//! PostgreSQL repository implementations

pub mod foundation_repo_impl;
pub mod student_repo_impl;
pub mod tenant_directory_impl;
pub mod user_repo_impl;

pub use foundation_repo_impl::PgFoundationRepository;
pub use student_repo_impl::PgStudentRepository;
pub use tenant_directory_impl::PgTenantDirectory;
pub use user_repo_impl::PgTenantUserRepository;
