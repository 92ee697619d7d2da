use chrono::NaiveDate;
use models::deposit::DepositDetails;
use models::{bank, client, LegalForm};

/// A predicate over one record. Absent criteria match everything.
pub trait Criteria<T> {
    fn matches(&self, item: &T) -> bool;

    fn and<K>(self, other: K) -> And<Self, K>
    where
        Self: Sized,
        K: Criteria<T>,
    {
        And(self, other)
    }
}

/// Conjunction of two criteria.
#[derive(Debug, Clone)]
pub struct And<A, B>(pub A, pub B);

impl<T, A: Criteria<T>, B: Criteria<T>> Criteria<T> for And<A, B> {
    fn matches(&self, item: &T) -> bool {
        self.0.matches(item) && self.1.matches(item)
    }
}

/// Keep the items matching `criteria`, in their original order.
pub fn filter<T, C: Criteria<T>>(items: Vec<T>, criteria: &C) -> Vec<T> {
    items.into_iter().filter(|item| criteria.matches(item)).collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `None` criterion passes; a present criterion never matches a missing value.
fn optional_contains(value: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => value.is_some_and(|v| contains_ignore_case(v, needle)),
    }
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankCriteria {
    pub name: Option<String>,
    pub bik: Option<String>,
}

impl Criteria<bank::Model> for BankCriteria {
    fn matches(&self, bank: &bank::Model) -> bool {
        optional_contains(Some(&bank.name), self.name.as_deref())
            && self.bik.as_deref().map_or(true, |bik| bank.bik.contains(bik))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientCriteria {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub address: Option<String>,
    pub legal_form: Option<LegalForm>,
}

impl Criteria<client::Model> for ClientCriteria {
    fn matches(&self, client: &client::Model) -> bool {
        optional_contains(Some(&client.name), self.name.as_deref())
            && optional_contains(client.short_name.as_deref(), self.short_name.as_deref())
            && optional_contains(client.address.as_deref(), self.address.as_deref())
            && self.legal_form.map_or(true, |form| client.legal_form == form)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepositCriteria {
    pub client_id: Option<i32>,
    pub bank_id: Option<i32>,
    pub opening_date_from: Option<NaiveDate>,
    pub opening_date_to: Option<NaiveDate>,
    pub min_percentage: Option<f64>,
    pub max_percentage: Option<f64>,
    pub min_term: Option<i32>,
    pub max_term: Option<i32>,
}

impl Criteria<DepositDetails> for DepositCriteria {
    fn matches(&self, d: &DepositDetails) -> bool {
        self.client_id.map_or(true, |id| d.client_id() == id)
            && self.bank_id.map_or(true, |id| d.bank_id() == id)
            && within(d.opening_date, self.opening_date_from, self.opening_date_to)
            && within(d.percentage, self.min_percentage, self.max_percentage)
            && within(d.term_months, self.min_term, self.max_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bank(id: i32, name: &str, bik: &str) -> bank::Model {
        bank::Model { id, name: name.into(), bik: bik.into() }
    }

    fn client(id: i32, name: &str, short_name: Option<&str>, address: Option<&str>, form: LegalForm) -> client::Model {
        client::Model {
            id,
            name: name.into(),
            short_name: short_name.map(Into::into),
            address: address.map(Into::into),
            legal_form: form,
        }
    }

    fn deposit(id: i32, client_id: i32, bank_id: i32, day: u32, percentage: f64, term: i32) -> DepositDetails {
        DepositDetails {
            id,
            client: client(client_id, &format!("c{client_id}"), None, None, LegalForm::Ip),
            bank: bank(bank_id, &format!("b{bank_id}"), "000000000"),
            opening_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            percentage,
            term_months: term,
        }
    }

    #[test]
    fn bank_name_is_case_insensitive_bik_is_not() {
        let banks = vec![bank(1, "Сбербанк", "044525225"), bank(2, "Альфа", "044525593"), bank(3, "ВТБ", "ABC000000")];

        let by_name = filter(banks.clone(), &BankCriteria { name: Some("СБЕР".into()), bik: None });
        assert_eq!(by_name.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1]);

        let by_bik = filter(banks.clone(), &BankCriteria { name: None, bik: Some("abc".into()) });
        assert!(by_bik.is_empty());

        let both = filter(banks, &BankCriteria { name: Some("а".into()), bik: Some("4525".into()) });
        assert_eq!(both.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn missing_optional_field_only_fails_present_criterion() {
        let clients = vec![
            client(1, "Иванов", None, None, LegalForm::Ip),
            client(2, "Ромашка", Some("Ром"), Some("Москва, Тверская 1"), LegalForm::Ooo),
        ];

        let all = filter(clients.clone(), &ClientCriteria { name: Some("".into()), ..Default::default() });
        assert_eq!(all.len(), 2);

        let short = filter(clients.clone(), &ClientCriteria { short_name: Some("ром".into()), ..Default::default() });
        assert_eq!(short.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);

        let addr = filter(clients.clone(), &ClientCriteria { address: Some("москва".into()), ..Default::default() });
        assert_eq!(addr.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);

        let form = filter(clients, &ClientCriteria { legal_form: Some(LegalForm::Ip), ..Default::default() });
        assert_eq!(form.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn deposit_bounds_are_inclusive() {
        let deposits = vec![deposit(1, 1, 1, 10, 2.5, 6), deposit(2, 2, 1, 20, 8.5, 12), deposit(3, 1, 2, 30, 5.0, 24)];

        let min_pct = filter(deposits.clone(), &DepositCriteria { min_percentage: Some(5.0), ..Default::default() });
        assert_eq!(min_pct.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 3]);

        let dates = filter(
            deposits.clone(),
            &DepositCriteria {
                opening_date_from: NaiveDate::from_ymd_opt(2024, 1, 10),
                opening_date_to: NaiveDate::from_ymd_opt(2024, 1, 20),
                ..Default::default()
            },
        );
        assert_eq!(dates.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);

        let terms = filter(deposits.clone(), &DepositCriteria { min_term: Some(12), max_term: Some(12), ..Default::default() });
        assert_eq!(terms.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);

        let refs = filter(deposits, &DepositCriteria { client_id: Some(1), bank_id: Some(2), ..Default::default() });
        assert_eq!(refs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn only_high_rate_deposit_passes_min_percentage() {
        let deposits = vec![deposit(1, 1, 1, 1, 2.5, 12), deposit(2, 1, 1, 2, 8.5, 12)];
        let hits = filter(deposits, &DepositCriteria { min_percentage: Some(5.0), ..Default::default() });
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].percentage, 8.5);
    }

    fn arb_deposit() -> impl Strategy<Value = DepositDetails> {
        (1..50i32, 1..4i32, 1..4i32, 1..29u32, 1..200u32, 1..300i32)
            .prop_map(|(id, c, b, day, pct, term)| deposit(id, c, b, day, pct as f64 / 10.0, term))
    }

    fn arb_criteria() -> impl Strategy<Value = DepositCriteria> {
        (
            proptest::option::of(1..4i32),
            proptest::option::of(1..4i32),
            proptest::option::of(1..29u32),
            proptest::option::of(1..29u32),
            proptest::option::of(1..200u32),
            proptest::option::of(1..300i32),
        )
            .prop_map(|(client_id, bank_id, from, to, min_pct, max_term)| DepositCriteria {
                client_id,
                bank_id,
                opening_date_from: from.and_then(|d| NaiveDate::from_ymd_opt(2024, 1, d)),
                opening_date_to: to.and_then(|d| NaiveDate::from_ymd_opt(2024, 1, d)),
                min_percentage: min_pct.map(|p| p as f64 / 10.0),
                max_term,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_empty_criteria_is_identity(items in prop::collection::vec(arb_deposit(), 0..30)) {
            prop_assert_eq!(filter(items.clone(), &DepositCriteria::default()), items);
        }

        #[test]
        fn prop_sequential_filters_equal_conjunction(
            items in prop::collection::vec(arb_deposit(), 0..30),
            k1 in arb_criteria(),
            k2 in arb_criteria(),
        ) {
            let sequential = filter(filter(items.clone(), &k1), &k2);
            let combined = filter(items, &k1.and(k2));
            prop_assert_eq!(sequential, combined);
        }

        #[test]
        fn prop_filter_preserves_relative_order(
            items in prop::collection::vec(arb_deposit(), 0..30),
            k in arb_criteria(),
        ) {
            // tag by position so equal records stay distinguishable
            let tagged: Vec<(usize, DepositDetails)> = items.into_iter().enumerate().collect();
            let kept = filter(tagged, &Tagged(k));
            let positions: Vec<usize> = kept.iter().map(|(i, _)| *i).collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            prop_assert_eq!(positions, sorted);
        }

        #[test]
        fn prop_bank_filter_result_is_subset(
            names in prop::collection::vec("[a-zA-Zа-яА-Я]{0,8}", 0..20),
            needle in proptest::option::of("[a-zа-я]{0,3}"),
        ) {
            let banks: Vec<bank::Model> = names
                .iter()
                .enumerate()
                .map(|(i, n)| bank(i as i32, n, "123456789"))
                .collect();
            let criteria = BankCriteria { name: needle.clone(), bik: None };
            let kept = filter(banks.clone(), &criteria);
            prop_assert!(kept.iter().all(|b| banks.contains(b)));
            prop_assert!(kept.iter().all(|b| criteria.matches(b)));
            if needle.is_none() {
                prop_assert_eq!(kept.len(), banks.len());
            }
        }
    }

    struct Tagged(DepositCriteria);

    impl Criteria<(usize, DepositDetails)> for Tagged {
        fn matches(&self, item: &(usize, DepositDetails)) -> bool {
            self.0.matches(&item.1)
        }
    }
}
