//! In-memory query engine: criteria predicates applied to an already sorted
//! collection, and the sort keys the stores order by.

pub mod criteria;
pub mod sort;

pub use criteria::{filter, And, BankCriteria, ClientCriteria, Criteria, DepositCriteria};
pub use sort::{BankSortField, ClientSortField, DepositSortField, Direction, Sort, SortField};
