use std::sync::Arc;

use sqlx::PgPool;

use edu_core::services::{
    AuthService, FoundationService, StudentService, TenantContextResolver, TenantService,
};

/// Shared handler state. Built once at startup from the immutable config.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub resolver: Arc<TenantContextResolver>,
    pub auth_service: Arc<AuthService>,
    pub tenant_service: Arc<TenantService>,
    pub foundation_service: Arc<FoundationService>,
    pub student_service: Arc<StudentService>,
    /// Name of the pre-authentication tenant header
    pub tenant_header: Arc<str>,
    pub admin_api_key: Arc<str>,
}
