//! Request payloads as decoded from JSON, and their validation into the
//! typed field sets the services and stores work with.

use chrono::NaiveDate;
use models::client::{self, ClientFields};
use models::deposit::{self, DepositFields};
use models::errors::{FieldViolation, ValidationKind, Violations};
use models::{bank, LegalForm};
use serde::{Deserialize, Serialize};

fn required<T>(violations: &mut Violations, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        violations.push(FieldViolation::new(field, "is required"));
    }
    value
}

/// Validated bank fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankDraft {
    pub name: String,
    pub bik: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInput {
    pub name: Option<String>,
    pub bik: Option<String>,
}

impl BankInput {
    pub fn new(name: impl Into<String>, bik: impl Into<String>) -> Self {
        Self { name: Some(name.into()), bik: Some(bik.into()) }
    }

    pub fn validate(self) -> Result<BankDraft, ValidationKind> {
        let mut v = Violations::new();
        let name = required(&mut v, "name", self.name);
        let bik = required(&mut v, "bik", self.bik);
        if let Some(name) = &name {
            v.check(bank::validate_name(name));
        }
        if let Some(bik) = &bik {
            v.check(bank::validate_bik(bik));
        }
        match (name, bik) {
            (Some(name), Some(bik)) => v.finish(BankDraft { name, bik }),
            // a missing required value has already been recorded
            _ => Err(v.into_kind()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub address: Option<String>,
    /// Code or display label; resolved during validation.
    pub legal_form: Option<String>,
}

impl ClientInput {
    /// An unknown legal form is reported on its own, ahead of field checks.
    pub fn validate(self) -> Result<ClientFields, ValidationKind> {
        let legal_form = self.legal_form.as_deref().map(LegalForm::parse).transpose()?;

        let mut v = Violations::new();
        let name = required(&mut v, "name", self.name);
        let legal_form = required(&mut v, "legalForm", legal_form);
        if let Some(name) = &name {
            v.check(client::validate_name(name));
        }
        v.check(client::validate_short_name(self.short_name.as_deref()));
        v.check(client::validate_address(self.address.as_deref()));

        match (name, legal_form) {
            (Some(name), Some(legal_form)) => {
                v.finish(ClientFields { name, short_name: self.short_name, address: self.address, legal_form })
            }
            _ => Err(v.into_kind()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInput {
    pub client_id: Option<i32>,
    pub bank_id: Option<i32>,
    pub opening_date: Option<NaiveDate>,
    pub percentage: Option<f64>,
    pub term_months: Option<i32>,
}

impl DepositInput {
    pub fn validate(self, today: NaiveDate) -> Result<DepositFields, ValidationKind> {
        let mut v = Violations::new();
        let client_id = required(&mut v, "clientId", self.client_id);
        let bank_id = required(&mut v, "bankId", self.bank_id);
        let opening_date = required(&mut v, "openingDate", self.opening_date);
        let percentage = required(&mut v, "percentage", self.percentage);
        let term_months = required(&mut v, "termMonths", self.term_months);

        if let Some(date) = opening_date {
            v.check(deposit::validate_opening_date(date, today));
        }
        if let Some(p) = percentage {
            v.check(deposit::validate_percentage(p));
        }
        if let Some(t) = term_months {
            v.check(deposit::validate_term_months(t));
        }

        match (client_id, bank_id, opening_date, percentage, term_months) {
            (Some(client_id), Some(bank_id), Some(opening_date), Some(percentage), Some(term_months)) => {
                v.finish(DepositFields { client_id, bank_id, opening_date, percentage, term_months })
            }
            _ => Err(v.into_kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn violated_fields(err: ValidationKind) -> Vec<&'static str> {
        match err {
            ValidationKind::InvalidFields(v) => v.into_iter().map(|f| f.field).collect(),
            other => panic!("expected field violations, got {other:?}"),
        }
    }

    #[test]
    fn bank_input_collects_all_violations() {
        let err = BankInput { name: Some("  ".into()), bik: Some("12ab".into()) }.validate().unwrap_err();
        assert_eq!(violated_fields(err), vec!["name", "bik"]);

        let err = BankInput::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "name: is required; bik: is required");

        let draft = BankInput::new("Test", "123456789").validate().unwrap();
        assert_eq!(draft, BankDraft { name: "Test".into(), bik: "123456789".into() });
    }

    #[test]
    fn client_input_resolves_legal_form() {
        let fields = ClientInput { name: Some("Ромашка".into()), legal_form: Some("ooo".into()), ..Default::default() }
            .validate()
            .unwrap();
        assert_eq!(fields.legal_form, LegalForm::Ooo);
        assert_eq!(fields.short_name, None);

        let fields = ClientInput { name: Some("Ромашка".into()), legal_form: Some("ПАО".into()), ..Default::default() }
            .validate()
            .unwrap();
        assert_eq!(fields.legal_form, LegalForm::Pao);
    }

    #[test]
    fn client_unknown_legal_form_wins() {
        let err = ClientInput { name: None, legal_form: Some("LLC".into()), ..Default::default() }.validate().unwrap_err();
        assert!(matches!(err, ValidationKind::InvalidEnumValue { field: "legalForm", .. }));
    }

    #[test]
    fn client_missing_legal_form_and_long_short_name() {
        let err = ClientInput { name: Some("Иванов".into()), short_name: Some("x".repeat(101)), ..Default::default() }
            .validate()
            .unwrap_err();
        assert_eq!(violated_fields(err), vec!["legalForm", "shortName"]);
    }

    #[test]
    fn deposit_input_rules() {
        let ok = DepositInput {
            client_id: Some(1),
            bank_id: Some(2),
            opening_date: Some(today()),
            percentage: Some(4.2),
            term_months: Some(300),
        };
        let fields = ok.clone().validate(today()).unwrap();
        assert_eq!(fields.term_months, 300);

        let future = DepositInput { opening_date: today().succ_opt(), ..ok.clone() };
        assert_eq!(violated_fields(future.validate(today()).unwrap_err()), vec!["openingDate"]);

        let bad = DepositInput { percentage: Some(0.0), term_months: Some(301), ..ok };
        assert_eq!(violated_fields(bad.validate(today()).unwrap_err()), vec!["percentage", "termMonths"]);

        let empty = DepositInput::default().validate(today()).unwrap_err();
        assert_eq!(violated_fields(empty), vec!["clientId", "bankId", "openingDate", "percentage", "termMonths"]);
    }

    #[test]
    fn deposit_input_reads_camel_case_json() {
        let input: DepositInput = serde_json::from_str(
            r#"{"clientId":1,"bankId":2,"openingDate":"2024-06-01","percentage":5.5,"termMonths":12}"#,
        )
        .unwrap();
        assert_eq!(input.opening_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(input.term_months, Some(12));
    }
}
