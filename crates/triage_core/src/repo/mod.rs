//! Persistence layer: a string key-value store and the patient record
//! layout on top of it.
//!
//! # Responsibility
//! - Define storage contracts independent of SQLite.
//! - Keep key naming and JSON encoding inside the persistence boundary.
//!
//! # Invariants
//! - Writes validate records before serialization.
//! - Reads reject corrupt or invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::profile::RecordValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv_repo;
pub mod patient_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    Json {
        key: String,
        source: serde_json::Error,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Json { key, source } => write!(f, "invalid JSON under `{key}`: {source}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Json { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
