//! Student entity (tenant-scoped)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub student_number: String,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewStudent {
    #[validate(length(min = 1, max = 32, message = "Student number must be between 1 and 32 characters"))]
    pub student_number: String,

    #[validate(length(min = 2, max = 150, message = "Full name must be between 2 and 150 characters"))]
    pub full_name: String,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl NewStudent {
    /// Trims the text fields; validation runs on the trimmed values.
    pub fn normalized(mut self) -> Self {
        self.student_number = self.student_number.trim().to_string();
        self.full_name = self.full_name.trim().to_string();
        self
    }
}
