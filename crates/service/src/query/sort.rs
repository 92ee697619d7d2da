use std::cmp::Ordering;

use models::deposit::DepositDetails;
use models::errors::ValidationKind;
use models::{bank, client};

pub const DEFAULT_SORT_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// `desc` in any case sorts descending; anything else ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("desc") => Direction::Desc,
            _ => Direction::Asc,
        }
    }

    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

/// A sortable column of one entity, addressed by its JSON field name.
pub trait SortField: Sized + Copy + Default + 'static {
    type Item;

    /// Accepted names, in the order they are listed in errors.
    const NAMES: &'static [&'static str];

    fn from_index(index: usize) -> Self;

    fn name(self) -> &'static str;

    fn compare(self, a: &Self::Item, b: &Self::Item) -> Ordering;

    fn id_of(item: &Self::Item) -> i32;

    fn parse(raw: &str) -> Result<Self, ValidationKind> {
        Self::NAMES
            .iter()
            .position(|name| *name == raw)
            .map(Self::from_index)
            .ok_or_else(|| ValidationKind::UnknownSortField { field: raw.to_string(), allowed: Self::NAMES.to_vec() })
    }
}

/// Sort key plus direction. Ties always fall back to ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F: SortField> Sort<F> {
    pub fn new(field: F, direction: Direction) -> Self {
        Self { field, direction }
    }

    pub fn parse(sort_by: Option<&str>, direction: Option<&str>) -> Result<Self, ValidationKind> {
        let field = F::parse(sort_by.unwrap_or(DEFAULT_SORT_FIELD))?;
        Ok(Self { field, direction: Direction::parse(direction) })
    }

    pub fn compare(&self, a: &F::Item, b: &F::Item) -> Ordering {
        self.direction
            .apply(self.field.compare(a, b))
            .then_with(|| F::id_of(a).cmp(&F::id_of(b)))
    }

    pub fn sort(&self, items: &mut [F::Item]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BankSortField {
    #[default]
    Id,
    Name,
    Bik,
}

impl SortField for BankSortField {
    type Item = bank::Model;
    const NAMES: &'static [&'static str] = &["id", "name", "bik"];

    fn from_index(index: usize) -> Self {
        [Self::Id, Self::Name, Self::Bik].get(index).copied().unwrap_or_default()
    }

    fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    fn compare(self, a: &bank::Model, b: &bank::Model) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Bik => a.bik.cmp(&b.bik),
        }
    }

    fn id_of(item: &bank::Model) -> i32 { item.id }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSortField {
    #[default]
    Id,
    Name,
    ShortName,
    Address,
    LegalForm,
}

impl SortField for ClientSortField {
    type Item = client::Model;
    const NAMES: &'static [&'static str] = &["id", "name", "shortName", "address", "legalForm"];

    fn from_index(index: usize) -> Self {
        [Self::Id, Self::Name, Self::ShortName, Self::Address, Self::LegalForm]
            .get(index)
            .copied()
            .unwrap_or_default()
    }

    fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    // missing optional values sort first; SeaOrmStore asks SQL for the same
    fn compare(self, a: &client::Model, b: &client::Model) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::ShortName => a.short_name.cmp(&b.short_name),
            Self::Address => a.address.cmp(&b.address),
            Self::LegalForm => a.legal_form.code().cmp(b.legal_form.code()),
        }
    }

    fn id_of(item: &client::Model) -> i32 { item.id }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepositSortField {
    #[default]
    Id,
    ClientId,
    BankId,
    OpeningDate,
    Percentage,
    TermMonths,
}

impl SortField for DepositSortField {
    type Item = DepositDetails;
    const NAMES: &'static [&'static str] = &["id", "clientId", "bankId", "openingDate", "percentage", "termMonths"];

    fn from_index(index: usize) -> Self {
        [Self::Id, Self::ClientId, Self::BankId, Self::OpeningDate, Self::Percentage, Self::TermMonths]
            .get(index)
            .copied()
            .unwrap_or_default()
    }

    fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    fn compare(self, a: &DepositDetails, b: &DepositDetails) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::ClientId => a.client_id().cmp(&b.client_id()),
            Self::BankId => a.bank_id().cmp(&b.bank_id()),
            Self::OpeningDate => a.opening_date.cmp(&b.opening_date),
            Self::Percentage => a.percentage.total_cmp(&b.percentage),
            Self::TermMonths => a.term_months.cmp(&b.term_months),
        }
    }

    fn id_of(item: &DepositDetails) -> i32 { item.id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::LegalForm;
    use proptest::prelude::*;

    fn bank(id: i32, name: &str, bik: &str) -> bank::Model {
        bank::Model { id, name: name.into(), bik: bik.into() }
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(Direction::parse(None), Direction::Asc);
        assert_eq!(Direction::parse(Some("DESC")), Direction::Desc);
        assert_eq!(Direction::parse(Some("desc")), Direction::Desc);
        assert_eq!(Direction::parse(Some("sideways")), Direction::Asc);
    }

    #[test]
    fn defaults_to_id_ascending() {
        let sort = Sort::<BankSortField>::parse(None, None).unwrap();
        assert_eq!(sort, Sort::new(BankSortField::Id, Direction::Asc));
    }

    #[test]
    fn unknown_field_is_rejected_with_allowed_names() {
        let err = Sort::<DepositSortField>::parse(Some("amount"), None).unwrap_err();
        assert_eq!(
            err,
            ValidationKind::UnknownSortField {
                field: "amount".into(),
                allowed: vec!["id", "clientId", "bankId", "openingDate", "percentage", "termMonths"],
            }
        );
        // field names are the camelCase JSON names
        assert!(Sort::<ClientSortField>::parse(Some("short_name"), None).is_err());
        assert_eq!(Sort::<ClientSortField>::parse(Some("shortName"), None).unwrap().field, ClientSortField::ShortName);
    }

    #[test]
    fn names_round_trip() {
        for (i, name) in ClientSortField::NAMES.iter().enumerate() {
            let field = ClientSortField::from_index(i);
            assert_eq!(field.name(), *name);
            assert_eq!(ClientSortField::parse(name).unwrap(), field);
        }
        assert_eq!(DepositSortField::TermMonths.name(), "termMonths");
    }

    #[test]
    fn descending_name_with_id_tiebreak() {
        let mut banks = vec![bank(3, "Б", "3"), bank(1, "А", "1"), bank(2, "Б", "2")];
        Sort::new(BankSortField::Name, Direction::Desc).sort(&mut banks);
        assert_eq!(banks.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }

    #[test]
    fn client_legal_form_sorts_by_code() {
        let c = |id, form| client::Model { id, name: format!("c{id}"), short_name: None, address: None, legal_form: form };
        let mut clients = vec![c(1, LegalForm::Pao), c(2, LegalForm::Ao), c(3, LegalForm::Ip)];
        Sort::new(ClientSortField::LegalForm, Direction::Asc).sort(&mut clients);
        assert_eq!(clients.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }

    proptest! {
        #[test]
        fn prop_sort_is_total_and_id_breaks_ties(
            rows in prop::collection::vec(("[a-c]{1}", "[0-9]{2}"), 0..25),
            desc in any::<bool>(),
        ) {
            let mut banks: Vec<bank::Model> = rows
                .iter()
                .enumerate()
                .map(|(i, (n, b))| bank(i as i32, n, b))
                .collect();
            let direction = if desc { Direction::Desc } else { Direction::Asc };
            let sort = Sort::new(BankSortField::Name, direction);
            sort.sort(&mut banks);
            for pair in banks.windows(2) {
                prop_assert_ne!(sort.compare(&pair[0], &pair[1]), Ordering::Greater);
                if pair[0].name == pair[1].name {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
