//! Loads a yearly expenditure file into a relational schema: category names
//! are normalised into a shared lookup table and transaction rows are
//! appended to a table scoped to the processed year.
//!
//! This library provides the parsing and storage layers; the
//! `expense_importer` binary wires them to a command line.

#![warn(missing_docs)]

mod category;
mod config;
mod db;
mod error;
mod expense;
mod import;
mod statement;

pub use category::{Category, CategoryName};
pub use config::Config;
pub use db::{DatabaseID, initialize};
pub use error::Error;
pub use expense::Expense;
pub use import::{ImportSummary, import_file, import_statement};
pub use statement::{ExpenseRow, ParsedStatement, parse_statement};
