use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    entity::prelude::*, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldViolation, ModelError};
use crate::{bank, client};

pub const TERM_MONTHS_MIN: i32 = 1;
/// Upper bound accepted on requests. The table CHECK allows up to 600.
pub const TERM_MONTHS_MAX: i32 = 300;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposit")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub bank_id: i32,
    pub opening_date: Date,
    #[sea_orm(column_type = "Double")]
    pub percentage: f64,
    pub term_months: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client, Bank }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClientId)
                .to(client::Column::Id)
                .into(),
            Relation::Bank => Entity::belongs_to(bank::Entity)
                .from(Column::BankId)
                .to(bank::Column::Id)
                .into(),
        }
    }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<bank::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bank.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields a deposit row is created or overwritten with.
#[derive(Clone, Debug, PartialEq)]
pub struct DepositFields {
    pub client_id: i32,
    pub bank_id: i32,
    pub opening_date: Date,
    pub percentage: f64,
    pub term_months: i32,
}

/// A deposit with its client and bank embedded, as served over HTTP.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositDetails {
    pub id: i32,
    pub client: client::Model,
    pub bank: bank::Model,
    pub opening_date: Date,
    pub percentage: f64,
    pub term_months: i32,
}

impl DepositDetails {
    pub fn from_parts(row: Model, client: client::Model, bank: bank::Model) -> Self {
        Self {
            id: row.id,
            client,
            bank,
            opening_date: row.opening_date,
            percentage: row.percentage,
            term_months: row.term_months,
        }
    }

    pub fn client_id(&self) -> i32 { self.client.id }

    pub fn bank_id(&self) -> i32 { self.bank.id }
}

pub fn validate_percentage(percentage: f64) -> Result<(), FieldViolation> {
    if !percentage.is_finite() || percentage <= 0.0 {
        return Err(FieldViolation::new("percentage", "percentage must be greater than 0"));
    }
    Ok(())
}

pub fn validate_term_months(term_months: i32) -> Result<(), FieldViolation> {
    if !(TERM_MONTHS_MIN..=TERM_MONTHS_MAX).contains(&term_months) {
        return Err(FieldViolation::new(
            "termMonths",
            format!("term must be between {TERM_MONTHS_MIN} and {TERM_MONTHS_MAX} months"),
        ));
    }
    Ok(())
}

pub fn validate_opening_date(opening_date: Date, today: Date) -> Result<(), FieldViolation> {
    if opening_date > today {
        return Err(FieldViolation::new("openingDate", "opening date must be today or earlier"));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: DepositFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        client_id: Set(fields.client_id),
        bank_id: Set(fields.bank_id),
        opening_date: Set(fields.opening_date),
        percentage: Set(fields.percentage),
        term_months: Set(fields.term_months),
    };
    Ok(am.insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: i32, fields: DepositFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(id),
        client_id: Set(fields.client_id),
        bank_id: Set(fields.bank_id),
        opening_date: Set(fields.opening_date),
        percentage: Set(fields.percentage),
        term_months: Set(fields.term_months),
    };
    Ok(am.update(db).await?)
}

/// Load the clients and banks referenced by `rows` (two queries in total)
/// and embed them, keeping the order of `rows`.
pub async fn attach_references<C: ConnectionTrait>(db: &C, rows: Vec<Model>) -> Result<Vec<DepositDetails>, ModelError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let client_ids: BTreeSet<i32> = rows.iter().map(|d| d.client_id).collect();
    let bank_ids: BTreeSet<i32> = rows.iter().map(|d| d.bank_id).collect();

    let clients: HashMap<i32, client::Model> = client::Entity::find()
        .filter(client::Column::Id.is_in(client_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let banks: HashMap<i32, bank::Model> = bank::Entity::find()
        .filter(bank::Column::Id.is_in(bank_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    rows.into_iter()
        .map(|row| {
            let client = clients.get(&row.client_id).cloned().ok_or_else(|| {
                ModelError::Db(format!("deposit {} references missing client {}", row.id, row.client_id))
            })?;
            let bank = banks.get(&row.bank_id).cloned().ok_or_else(|| {
                ModelError::Db(format!("deposit {} references missing bank {}", row.id, row.bank_id))
            })?;
            Ok(DepositDetails::from_parts(row, client, bank))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn percentage_must_be_positive() {
        assert!(validate_percentage(0.01).is_ok());
        assert!(validate_percentage(0.0).is_err());
        assert!(validate_percentage(-1.5).is_err());
        assert!(validate_percentage(f64::NAN).is_err());
    }

    #[test]
    fn term_bounds_inclusive() {
        assert!(validate_term_months(1).is_ok());
        assert!(validate_term_months(300).is_ok());
        assert!(validate_term_months(0).is_err());
        assert!(validate_term_months(301).is_err());
        assert!(validate_term_months(600).is_err());
    }

    #[test]
    fn opening_date_not_in_future() {
        let today = day(2024, 5, 10);
        assert!(validate_opening_date(today, today).is_ok());
        assert!(validate_opening_date(day(2020, 1, 1), today).is_ok());
        assert_eq!(validate_opening_date(day(2024, 5, 11), today).unwrap_err().field, "openingDate");
    }

    #[test]
    fn details_serialize_nested() {
        let details = DepositDetails {
            id: 7,
            client: client::Model { id: 1, name: "Иван".into(), short_name: Some("И".into()), address: None, legal_form: crate::LegalForm::Ip },
            bank: bank::Model { id: 2, name: "Банк".into(), bik: "123456789".into() },
            opening_date: day(2024, 1, 31),
            percentage: 5.5,
            term_months: 12,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["client"]["id"], 1);
        assert_eq!(json["client"]["legalForm"], "ИП");
        assert_eq!(json["bank"]["bik"], "123456789");
        assert_eq!(json["openingDate"], "2024-01-31");
        assert_eq!(json["termMonths"], 12);
        assert_eq!(details.client_id(), 1);
        assert_eq!(details.bank_id(), 2);
    }
}
