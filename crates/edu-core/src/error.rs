//! Domain errors

use thiserror::Error;
use uuid::Uuid;

/// Coarse classification used by the HTTP layer and by the workflows to
/// decide what gets wrapped as a workflow failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    ProvisioningFailure,
    DeprovisioningFailure,
    /// The commit of an atomic workflow failed; its outcome must be checked.
    OutcomeUnknown,
    Infrastructure,
    Internal,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid namespace key: {0}")]
    InvalidNamespaceKey(String),

    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Foundation not found: {0}")]
    FoundationNotFound(Uuid),

    #[error("Namespace key already exists: {0}")]
    NamespaceKeyAlreadyExists(String),

    #[error("Admin email already exists: {0}")]
    AdminEmailAlreadyExists(String),

    #[error("Student number already exists: {0}")]
    StudentNumberAlreadyExists(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Provisioning failed: {0}")]
    ProvisioningFailure(String),

    #[error("Deprovisioning failed: {0}")]
    DeprovisioningFailure(String),

    #[error("Transaction outcome unknown: {0}")]
    OutcomeUnknown(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ValidationError(_) | DomainError::InvalidNamespaceKey(_) => {
                ErrorKind::Validation
            }
            DomainError::TenantNotFound(_) | DomainError::FoundationNotFound(_) => {
                ErrorKind::NotFound
            }
            DomainError::NamespaceKeyAlreadyExists(_)
            | DomainError::AdminEmailAlreadyExists(_)
            | DomainError::StudentNumberAlreadyExists(_) => ErrorKind::Conflict,
            DomainError::Unauthorized(_) | DomainError::InvalidCredentials => ErrorKind::Unauthorized,
            DomainError::Forbidden(_) => ErrorKind::Forbidden,
            DomainError::ProvisioningFailure(_) => ErrorKind::ProvisioningFailure,
            DomainError::DeprovisioningFailure(_) => ErrorKind::DeprovisioningFailure,
            DomainError::OutcomeUnknown(_) => ErrorKind::OutcomeUnknown,
            DomainError::DatabaseError(_) => ErrorKind::Infrastructure,
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// Errors the caller caused and can correct (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation
                | ErrorKind::NotFound
                | ErrorKind::Conflict
                | ErrorKind::Unauthorized
                | ErrorKind::Forbidden
        )
    }

    /// Wraps a failure raised inside the provisioning transaction. Client
    /// errors and an unknown commit outcome keep their identity.
    pub fn into_provisioning_failure(self) -> Self {
        if self.is_client_error() || self.kind() == ErrorKind::OutcomeUnknown {
            self
        } else {
            DomainError::ProvisioningFailure(self.to_string())
        }
    }

    /// Same as [`DomainError::into_provisioning_failure`] for deprovisioning.
    pub fn into_deprovisioning_failure(self) -> Self {
        if self.is_client_error() || self.kind() == ErrorKind::OutcomeUnknown {
            self
        } else {
            DomainError::DeprovisioningFailure(self.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_wrapping_keeps_client_errors() {
        let conflict = DomainError::NamespaceKeyAlreadyExists("sma1".into());
        assert_eq!(conflict.into_provisioning_failure().kind(), ErrorKind::Conflict);

        let missing = DomainError::FoundationNotFound(Uuid::nil());
        assert_eq!(missing.into_deprovisioning_failure().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_workflow_wrapping_hides_infrastructure_errors() {
        let err = DomainError::DatabaseError("relation \"users\" does not exist".into());
        assert_eq!(err.into_provisioning_failure().kind(), ErrorKind::ProvisioningFailure);

        let err = DomainError::DatabaseError("connection reset".into());
        assert_eq!(err.into_deprovisioning_failure().kind(), ErrorKind::DeprovisioningFailure);

        let err = DomainError::OutcomeUnknown("commit interrupted".into());
        assert_eq!(err.into_provisioning_failure().kind(), ErrorKind::OutcomeUnknown);
    }
}
