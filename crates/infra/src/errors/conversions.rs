//! Conversions from external infrastructure errors into domain errors.

use rusqlite::Error as SqlError;
use tutorium_domain::TutoriumError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TutoriumError);

impl From<InfraError> for TutoriumError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TutoriumError> for InfraError {
    fn from(value: TutoriumError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTutoriumError {
    fn into_tutorium(self) -> TutoriumError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → TutoriumError */
/* -------------------------------------------------------------------------- */

impl IntoTutoriumError for SqlError {
    fn into_tutorium(self) -> TutoriumError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        TutoriumError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        TutoriumError::Database("database is locked".into())
                    }
                    // Unique index and primary key violations carry domain
                    // meaning here: a slot or an email is already taken.
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        TutoriumError::Conflict("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        TutoriumError::Database("foreign key constraint violation".into())
                    }
                    _ => TutoriumError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => TutoriumError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                TutoriumError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                TutoriumError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                TutoriumError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                TutoriumError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => TutoriumError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => TutoriumError::Database("invalid SQL query".into()),
            other => TutoriumError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_tutorium())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
