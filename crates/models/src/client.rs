use sea_orm::{entity::prelude::*, ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldViolation, ModelError};
use crate::legal_form::LegalForm;

pub const NAME_MAX_LEN: usize = 255;
pub const SHORT_NAME_MAX_LEN: usize = 100;
pub const ADDRESS_MAX_LEN: usize = 500;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub short_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub legal_form: LegalForm,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Deposit }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Deposit => Entity::has_many(crate::deposit::Entity).into(),
        }
    }
}

impl Related<crate::deposit::Entity> for Entity {
    fn to() -> RelationDef { Relation::Deposit.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields a client is created or overwritten with.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientFields {
    pub name: String,
    pub short_name: Option<String>,
    pub address: Option<String>,
    pub legal_form: LegalForm,
}

fn max_len(field: &'static str, value: &str, max: usize, what: &str) -> Result<(), FieldViolation> {
    if value.chars().count() > max {
        return Err(FieldViolation::new(field, format!("{what} must not exceed {max} characters")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), FieldViolation> {
    if name.trim().is_empty() {
        return Err(FieldViolation::new("name", "client name is required"));
    }
    max_len("name", name, NAME_MAX_LEN, "client name")
}

pub fn validate_short_name(short_name: Option<&str>) -> Result<(), FieldViolation> {
    short_name.map_or(Ok(()), |s| max_len("shortName", s, SHORT_NAME_MAX_LEN, "short name"))
}

pub fn validate_address(address: Option<&str>) -> Result<(), FieldViolation> {
    address.map_or(Ok(()), |a| max_len("address", a, ADDRESS_MAX_LEN, "address"))
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: ClientFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        short_name: Set(fields.short_name),
        address: Set(fields.address),
        legal_form: Set(fields.legal_form),
    };
    Ok(am.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(db: &C, client: Model) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(client.id),
        name: Set(client.name),
        short_name: Set(client.short_name),
        address: Set(client.address),
        legal_form: Set(client.legal_form),
    };
    Ok(am.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_only_checked_when_present() {
        assert!(validate_short_name(None).is_ok());
        assert!(validate_address(None).is_ok());
        assert!(validate_short_name(Some(&"x".repeat(100))).is_ok());
        assert_eq!(validate_short_name(Some(&"x".repeat(101))).unwrap_err().field, "shortName");
        assert!(validate_address(Some(&"x".repeat(501))).is_err());
    }

    #[test]
    fn blank_name_rejected() {
        assert_eq!(validate_name("").unwrap_err().field, "name");
        assert!(validate_name("Иван Иванов").is_ok());
    }

    #[test]
    fn serializes_label_and_nulls() {
        let c = Model { id: 3, name: "Рога и копыта".into(), short_name: None, address: None, legal_form: LegalForm::Ooo };
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "name": "Рога и копыта", "shortName": null, "address": null, "legalForm": "ООО"})
        );
    }
}
