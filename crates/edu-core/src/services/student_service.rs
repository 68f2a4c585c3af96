//! Student service (tenant-scoped entity module)

use std::sync::Arc;

use validator::Validate;

use crate::domain::{ExecutionContext, NewStudent, Role, Student};
use crate::error::DomainError;
use crate::repositories::StudentRepository;

pub struct StudentService {
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn list(&self, ctx: &ExecutionContext) -> Result<Vec<Student>, DomainError> {
        ctx.require_role(&[Role::Admin, Role::Teacher, Role::Staff])?;
        self.students.list(ctx).await
    }

    pub async fn create(&self, ctx: &ExecutionContext, student: NewStudent) -> Result<Student, DomainError> {
        ctx.require_role(&[Role::Admin, Role::Staff])?;
        let student = student.normalized();
        student.validate()?;
        self.students.create(ctx, &student).await
    }
}
