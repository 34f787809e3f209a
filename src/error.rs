use diesel::result::DatabaseErrorKind;
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Error type for all registry operations. Constraint failures reported by
/// SQLite are classified into the typed variants so that callers can tell a
/// rejected write from an infrastructure problem.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {detail}")]
    ForeignKeyViolation { detail: String },

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RegistryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            ) => RegistryError::UniqueViolation {
                constraint: info.message().to_string(),
            },
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => RegistryError::ForeignKeyViolation {
                detail: info.message().to_string(),
            },
            other => RegistryError::Database(other),
        }
    }
}

pub(crate) fn invalid(
    field: &'static str,
    reason: impl Into<String>,
) -> RegistryError {
    RegistryError::Invalid {
        field,
        reason: reason.into(),
    }
}
