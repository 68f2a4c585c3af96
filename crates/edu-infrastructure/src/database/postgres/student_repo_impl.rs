// ============================================================================
// EDU Infrastructure - PostgreSQL Student Repository
// File: crates/edu-infrastructure/src/database/postgres/student_repo_impl.rs
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use edu_core::domain::{ExecutionContext, NewStudent, Student};
use edu_core::error::DomainError;
use edu_core::repositories::StudentRepository;

use crate::database::{db_error, NamespaceExecutor};

pub struct PgStudentRepository {
    executor: Arc<NamespaceExecutor>,
}

impl PgStudentRepository {
    pub fn new(executor: Arc<NamespaceExecutor>) -> Self {
        Self { executor }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: Uuid,
    student_number: String,
    full_name: String,
    birth_date: Option<chrono::NaiveDate>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            student_number: row.student_number,
            full_name: row.full_name,
            birth_date: row.birth_date,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn list(&self, ctx: &ExecutionContext) -> Result<Vec<Student>, DomainError> {
        self.executor
            .run(ctx, |conn| {
                Box::pin(async move {
                    let rows: Vec<StudentRow> = sqlx::query_as(
                        r#"
                        SELECT id, student_number, full_name, birth_date, created_at
                        FROM students
                        ORDER BY student_number
                        "#,
                    )
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(|e| db_error("listing students", e))?;

                    Ok(rows.into_iter().map(Into::into).collect())
                })
            })
            .await
    }

    async fn create(&self, ctx: &ExecutionContext, student: &NewStudent) -> Result<Student, DomainError> {
        let student = student.clone();
        self.executor
            .run(ctx, move |conn| {
                Box::pin(async move {
                    let row: StudentRow = sqlx::query_as(
                        r#"
                        INSERT INTO students (id, student_number, full_name, birth_date)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id, student_number, full_name, birth_date, created_at
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(&student.student_number)
                    .bind(&student.full_name)
                    .bind(student.birth_date)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|e| insert_error(e, &student))?;

                    Ok(row.into())
                })
            })
            .await
    }
}

fn insert_error(err: sqlx::Error, student: &NewStudent) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::StudentNumberAlreadyExists(student.student_number.clone());
        }
    }
    db_error("creating student", err)
}
