/*! This module defines traits for interacting with the importer's database
and the function that ensures the schema objects exist. */

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::{Error, category::Category, expense::Expense};

/// Alias for the integer type used for database row IDs.
pub type DatabaseID = i64;

/// A trait for mapping a `rusqlite::Row` from the database to a concrete
/// rust type.
pub(crate) trait MapRow {
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from column `offset`.
    ///
    /// Useful when tables have been joined and two types are constructed
    /// from the one query.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the shared categories table and the expense table for `year` if
/// they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection, year: u16) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    Category::create_table(&transaction)?;
    Expense::create_table(&transaction, year)?;

    transaction.commit()?;

    Ok(())
}
