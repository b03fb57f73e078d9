use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with {field} {value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// A storage constraint rejected the write. `code` names the conflict.
    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable name, returned to API clients next to the message.
    pub fn code(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{}_NOT_FOUND", entity.to_uppercase()),
            Self::Validation(_) => "VALIDATION_ERROR".to_string(),
            Self::Conflict { code, .. } => code.to_string(),
            Self::Unauthorized(_) => "UNAUTHORIZED".to_string(),
            Self::Forbidden(_) => "FORBIDDEN".to_string(),
            Self::Database(_) => "UNSPECIFIED_ERROR".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_code_uses_entity_name() {
        let err = DomainError::not_found("Volunteer", "id", 42);
        assert_eq!(err.code(), "VOLUNTEER_NOT_FOUND");
        assert_eq!(err.to_string(), "Volunteer with id 42 not found");
    }

    #[test]
    fn conflict_keeps_its_code() {
        let err = DomainError::conflict("VOLUNTEER_ALREADY_EXISTS", "taken");
        assert_eq!(err.code(), "VOLUNTEER_ALREADY_EXISTS");
        assert_eq!(err.to_string(), "taken");
    }
}
