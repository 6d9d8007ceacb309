//! The end to end import flow: read the expenditure file for a year, parse
//! it, resolve category ids and append the valid rows to the year-scoped
//! expense table in a single transaction.

use std::{collections::HashSet, fs, io};

use rusqlite::Connection;

use crate::{
    Error,
    category::Category,
    config::Config,
    db::initialize,
    expense::Expense,
    statement::parse_statement,
};

/// What an import run did, reported once the batch has committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows appended to the year-scoped table.
    pub inserted: usize,

    /// Rows dropped by validation.
    pub skipped: usize,

    /// Rows kept with a substituted time.
    pub corrected: usize,

    /// Distinct categories referenced by the inserted rows.
    pub categories: usize,
}

/// Import the expenditure file for `year` into the configured database.
///
/// The input file is read before the database is opened, so a missing file
/// never creates or touches the database.
///
/// # Errors
/// This function will return an error if:
/// - the input file is missing or unreadable,
/// - a non-empty price field is not a number,
/// - or there is an SQL error, in which case nothing is committed.
pub fn import_file(config: &Config, year: u16) -> Result<ImportSummary, Error> {
    let path = config.input_path(year);
    let text = fs::read_to_string(&path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => Error::InputFileNotFound(path.display().to_string()),
        _ => Error::InputFileUnreadable(path.display().to_string(), error.to_string()),
    })?;

    let connection = Connection::open(&config.db_path)?;
    connection.pragma_update(None, "foreign_keys", true)?;

    import_statement(&connection, year, &text)
}

/// Parse `text` and append its valid rows to the expense table for `year`.
///
/// Schema objects are created if absent. For each valid row the category is
/// looked up by exact name and inserted on first encounter; the resolved
/// rows are then batch inserted. Category resolution and the batch insert
/// run inside one transaction, committed at the end: any database error
/// aborts the run with nothing committed. Invalid rows never reach the
/// batch.
///
/// # Errors
/// This function will return an error if a non-empty price field is not a
/// number or if there is an SQL error.
pub fn import_statement(
    connection: &Connection,
    year: u16,
    text: &str,
) -> Result<ImportSummary, Error> {
    let parsed = parse_statement(text)?;

    initialize(connection, year)?;

    let transaction = connection.unchecked_transaction()?;

    let mut expenses = Vec::with_capacity(parsed.rows.len());
    let mut category_ids = HashSet::new();

    for row in parsed.rows {
        let category = Category::find_or_create(&transaction, &row.category)?;
        category_ids.insert(category.id);

        expenses.push(Expense {
            category_id: category.id,
            description: row.description,
            price: row.price,
            date: row.date,
            time: row.time,
            location: row.location,
            method: row.method,
        });
    }

    Expense::insert_batch(&transaction, year, &expenses)?;
    transaction.commit()?;

    Ok(ImportSummary {
        inserted: expenses.len(),
        skipped: parsed.skipped,
        corrected: parsed.corrected,
        categories: category_ids.len(),
    })
}


#[cfg(test)]
mod import_file_tests {
    use std::{fs, path::PathBuf};

    use crate::{Config, Error};

    use super::import_file;

    /// A scratch directory that is removed when the test ends.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(test_name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "expense_importer_{test_name}_{}",
                std::process::id()
            ));
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn config(&self) -> Config {
            Config {
                db_path: self.0.join("expenses.db"),
                data_dir: self.0.clone(),
            }
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn missing_input_file_fails_without_creating_a_database() {
        let scratch = ScratchDir::new("missing_input");
        let config = scratch.config();

        let result = import_file(&config, 1999);

        let expected = config.input_path(1999).display().to_string();
        assert_eq!(result, Err(Error::InputFileNotFound(expected)));
        assert!(!config.db_path.exists());
    }

    #[test]
    fn imports_file_named_after_year() {
        let scratch = ScratchDir::new("imports_file");
        let config = scratch.config();
        fs::write(
            config.input_path(2024),
            "Food,Lunch,12.50,2024-03-01,12:30,Cafe,Card",
        )
        .unwrap();

        let summary = import_file(&config, 2024).unwrap();

        assert_eq!(summary.inserted, 1);
        assert!(config.db_path.exists());
    }
}
