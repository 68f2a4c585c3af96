//! Foundation (ownership group) entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Foundation {
    pub id: Uuid,

    #[validate(length(min = 2, max = 150, message = "Foundation name must be between 2 and 150 characters"))]
    pub name: String,

    /// Derived; ignored on writes
    pub tenant_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Foundation {
    pub fn new(name: String) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let foundation = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            tenant_count: 0,
            created_at: now,
            updated_at: now,
        };

        foundation.validate()?;
        Ok(foundation)
    }

    pub fn rename(&mut self, name: String) -> Result<(), validator::ValidationErrors> {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
        self.validate()
    }
}
