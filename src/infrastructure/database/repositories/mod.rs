//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod attendance_repository;
pub mod notebook_repository;
pub(crate) mod query;
pub mod repository_provider;
pub mod volunteer_repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use repository_provider::SeaOrmRepositoryProvider;

use log::debug;
use sea_orm::{DbErr, SqlErr};

/// Decode a JSON array column; malformed content reads as empty.
pub(crate) fn decode_list(raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            debug!("Discarding malformed list column {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

pub(crate) fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
