use sea_orm::{entity::prelude::*, ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldViolation, ModelError};

pub const NAME_MAX_LEN: usize = 255;
pub const BIK_LEN: usize = 9;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bank")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub bik: String,
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

pub fn validate_name(name: &str) -> Result<(), FieldViolation> {
    if name.trim().is_empty() {
        return Err(FieldViolation::new("name", "bank name is required"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(FieldViolation::new("name", format!("bank name must not exceed {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_bik(bik: &str) -> Result<(), FieldViolation> {
    if bik.len() != BIK_LEN || !bik.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldViolation::new("bik", "BIK must consist of exactly 9 digits"));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, bik: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        bik: Set(bik.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every mutable column of an existing row.
pub async fn update<C: ConnectionTrait>(db: &C, bank: Model) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(bank.id),
        name: Set(bank.name),
        bik: Set(bank.bik),
    };
    Ok(am.update(db).await?)
}
