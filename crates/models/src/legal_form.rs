use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ValidationKind;

/// Legal-entity type of a client. Stored as its code, rendered as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum LegalForm {
    #[sea_orm(string_value = "OOO")]
    Ooo,
    #[sea_orm(string_value = "AO")]
    Ao,
    #[sea_orm(string_value = "PT")]
    Pt,
    #[sea_orm(string_value = "KT")]
    Kt,
    #[sea_orm(string_value = "PK")]
    Pk,
    #[sea_orm(string_value = "IP")]
    Ip,
    #[sea_orm(string_value = "PAO")]
    Pao,
    #[sea_orm(string_value = "GUP")]
    Gup,
    #[sea_orm(string_value = "MUP")]
    Mup,
}

/// (variant, code, display label)
const TABLE: [(LegalForm, &str, &str); 9] = [
    (LegalForm::Ooo, "OOO", "ООО"),
    (LegalForm::Ao, "AO", "АО"),
    (LegalForm::Pt, "PT", "ПТ"),
    (LegalForm::Kt, "KT", "КТ"),
    (LegalForm::Pk, "PK", "ПК"),
    (LegalForm::Ip, "IP", "ИП"),
    (LegalForm::Pao, "PAO", "ПАО"),
    (LegalForm::Gup, "GUP", "ГУП"),
    (LegalForm::Mup, "MUP", "МУП"),
];

impl LegalForm {
    fn entry(self) -> &'static (LegalForm, &'static str, &'static str) {
        // every variant has exactly one row
        TABLE.iter().find(|(form, _, _)| *form == self).unwrap_or(&TABLE[0])
    }

    pub fn code(self) -> &'static str {
        self.entry().1
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }

    /// Display labels in declaration order, used in error messages.
    pub fn labels() -> Vec<&'static str> {
        TABLE.iter().map(|(_, _, label)| *label).collect()
    }

    /// Accepts the code (any ASCII case) or the exact display label.
    pub fn parse(value: &str) -> Result<Self, ValidationKind> {
        TABLE
            .iter()
            .find(|(_, code, label)| *label == value || code.eq_ignore_ascii_case(value))
            .map(|(form, _, _)| *form)
            .ok_or_else(|| ValidationKind::InvalidEnumValue {
                field: "legalForm",
                value: value.to_string(),
                allowed: Self::labels(),
            })
    }
}

impl FromStr for LegalForm {
    type Err = ValidationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LegalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for LegalForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for LegalForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
