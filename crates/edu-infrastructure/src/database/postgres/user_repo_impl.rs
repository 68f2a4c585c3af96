// ============================================================================
// EDU Infrastructure - PostgreSQL Tenant User Repository
// File: crates/edu-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================
//! Users live inside each tenant namespace; table names are unqualified and
//! resolve through the executor's `search_path`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use edu_core::domain::{ExecutionContext, Role, TenantUser};
use edu_core::error::DomainError;
use edu_core::repositories::TenantUserRepository;

use crate::database::{db_error, NamespaceExecutor};

pub struct PgTenantUserRepository {
    executor: Arc<NamespaceExecutor>,
}

impl PgTenantUserRepository {
    pub fn new(executor: Arc<NamespaceExecutor>) -> Self {
        Self { executor }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for TenantUser {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role).ok_or_else(|| {
            DomainError::DatabaseError(format!("user {} has unknown role '{}'", row.id, row.role))
        })?;

        Ok(TenantUser {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TenantUserRepository for PgTenantUserRepository {
    async fn find_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
    ) -> Result<Option<TenantUser>, DomainError> {
        let email = email.to_string();
        self.executor
            .run(ctx, move |conn| {
                Box::pin(async move {
                    let row: Option<UserRow> = sqlx::query_as(
                        r#"
                        SELECT id, email, password_hash, full_name, role, is_active, created_at
                        FROM users
                        WHERE email = $1
                        "#,
                    )
                    .bind(&email)
                    .fetch_optional(&mut *conn)
                    .await
                    .map_err(|e| db_error("finding user by email", e))?;

                    row.map(TenantUser::try_from).transpose()
                })
            })
            .await
    }
}
