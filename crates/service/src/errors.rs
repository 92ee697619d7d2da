use models::errors::{ModelError, ValidationKind};
use thiserror::Error;

/// Lookups that came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundKind {
    #[error("{entity} with id {id} not found")]
    EntityNotFound { entity: &'static str, id: i32 },
    #[error("no {entity} match the given criteria")]
    NoResults { entity: &'static str },
}

/// Writes rejected because of other rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictKind {
    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists { entity: &'static str, field: &'static str, value: String },
    #[error("{entity} with id {id} is referenced by deposits and cannot be deleted")]
    ReferentialBlock { entity: &'static str, id: i32 },
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationKind),
    #[error(transparent)]
    NotFound(#[from] NotFoundKind),
    #[error(transparent)]
    Conflict(#[from] ConflictKind),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound(NotFoundKind::EntityNotFound { entity, id })
    }

    pub fn no_results(entity: &'static str) -> Self {
        Self::NotFound(NotFoundKind::NoResults { entity })
    }

    pub fn already_exists(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict(ConflictKind::AlreadyExists { entity, field, value: value.into() })
    }

    pub fn referential_block(entity: &'static str, id: i32) -> Self {
        Self::Conflict(ConflictKind::ReferentialBlock { entity, id })
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Unique(msg) => ServiceError::Conflict(ConflictKind::UniqueViolation(msg)),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::from(e).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(ServiceError::not_found("bank", 999).to_string(), "bank with id 999 not found");
        assert_eq!(
            ServiceError::already_exists("bank", "bik", "123456789").to_string(),
            "bank with bik '123456789' already exists"
        );
        assert_eq!(
            ServiceError::referential_block("client", 4).to_string(),
            "client with id 4 is referenced by deposits and cannot be deleted"
        );
    }

    #[test]
    fn model_unique_maps_to_conflict() {
        let e: ServiceError = ModelError::Unique("bank_name_key".into()).into();
        assert!(matches!(e, ServiceError::Conflict(ConflictKind::UniqueViolation(_))));
        let e: ServiceError = ModelError::Db("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(m) if m == "boom"));
    }
}
