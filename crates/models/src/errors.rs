use std::fmt;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// One rejected field of an incoming payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(v: &[FieldViolation]) -> String {
    v.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Structural problems with a request, detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationKind {
    #[error("{}", join_violations(.0))]
    InvalidFields(Vec<FieldViolation>),
    #[error("invalid {field} '{value}'; allowed values: {}", .allowed.join(", "))]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },
    #[error("unknown sort field '{field}'; allowed fields: {}", .allowed.join(", "))]
    UnknownSortField {
        field: String,
        allowed: Vec<&'static str>,
    },
    #[error("malformed request: {0}")]
    Malformed(String),
}

/// Collects every violation of one payload so they are reported together.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self { Self::default() }

    pub fn check(&mut self, result: Result<(), FieldViolation>) {
        if let Err(v) = result {
            self.0.push(v);
        }
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Returns `value` when nothing was collected.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationKind> {
        if self.0.is_empty() { Ok(value) } else { Err(self.into_kind()) }
    }

    pub fn into_kind(self) -> ValidationKind {
        ValidationKind::InvalidFields(self.0)
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unique constraint violated: {0}")]
    Unique(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Unique(msg),
            _ => ModelError::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_are_joined_in_order() {
        let mut v = Violations::new();
        v.check(Err(FieldViolation::new("name", "must not be blank")));
        v.check(Ok(()));
        v.push(FieldViolation::new("bik", "must be exactly 9 digits"));
        let err = v.finish(()).unwrap_err();
        assert_eq!(err.to_string(), "name: must not be blank; bik: must be exactly 9 digits");
    }

    #[test]
    fn empty_violations_pass_value_through() {
        assert_eq!(Violations::new().finish(7).unwrap(), 7);
    }

    #[test]
    fn enum_error_lists_allowed_values() {
        let err = ValidationKind::InvalidEnumValue { field: "legalForm", value: "LLC".into(), allowed: vec!["ООО", "АО"] };
        assert_eq!(err.to_string(), "invalid legalForm 'LLC'; allowed values: ООО, АО");
    }
}
