//! Descriptors and records the report engine reads: groupable entities,
//! query rows, budget records and raw transactions.

pub mod account;
pub mod category;
pub mod common;
pub mod payee;
pub mod row;
pub mod transaction;

pub use account::Account;
pub use category::{Category, CategoryGroup, CategorySet};
pub use common::{Identifiable, NamedEntity};
pub use payee::Payee;
pub use row::{BudgetRecord, GroupField, Row, RowKind};
pub use transaction::Transaction;
