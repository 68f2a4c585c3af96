//! User stored inside a tenant namespace

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Role;

#[derive(Debug, Clone)]
pub struct TenantUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
