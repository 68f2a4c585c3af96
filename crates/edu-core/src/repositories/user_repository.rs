//! Tenant user repository trait (port)

use async_trait::async_trait;
use crate::domain::{ExecutionContext, TenantUser};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TenantUserRepository: Send + Sync {
    async fn find_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
    ) -> Result<Option<TenantUser>, DomainError>;
}
