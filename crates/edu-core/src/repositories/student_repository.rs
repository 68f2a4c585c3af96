//! Student repository trait (port)

use async_trait::async_trait;
use crate::domain::{ExecutionContext, NewStudent, Student};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self, ctx: &ExecutionContext) -> Result<Vec<Student>, DomainError>;
    async fn create(&self, ctx: &ExecutionContext, student: &NewStudent) -> Result<Student, DomainError>;
}
