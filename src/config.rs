//! Runtime configuration for the importer.
//!
//! Database and data locations are resolved from environment variables,
//! with command line flags taking precedence over both the environment and
//! the built-in defaults.

use std::{env, path::PathBuf};

/// Environment variable naming the SQLite database file.
pub const DB_PATH_VAR: &str = "EXPENSE_IMPORTER_DB";

/// Environment variable naming the directory that holds the input files.
pub const DATA_DIR_VAR: &str = "EXPENSE_IMPORTER_DATA_DIR";

const DEFAULT_DB_PATH: &str = "expenses.db";

/// Where the importer finds its input files and its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the SQLite database file. Created on first use.
    pub db_path: PathBuf,

    /// Directory searched for `expenditures_<year>` files.
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration from the environment and apply overrides.
    ///
    /// `db_path` and `data_dir` are typically the values of command line
    /// flags. When an override is `None` the corresponding environment
    /// variable is consulted, and failing that a default: `expenses.db`
    /// next to the working directory, and the working directory itself for
    /// input files.
    pub fn from_env(db_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        let db_path = db_path
            .or_else(|| env::var_os(DB_PATH_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let data_dir = data_dir
            .or_else(|| env::var_os(DATA_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        Self { db_path, data_dir }
    }

    /// The conventional input file for `year`: `<data_dir>/expenditures_<year>`.
    pub fn input_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(format!("expenditures_{year}"))
    }
}

#[cfg(test)]
mod config_tests {
    use std::path::PathBuf;

    use super::Config;

    #[test]
    fn overrides_win() {
        let config = Config::from_env(
            Some(PathBuf::from("/var/db/spending.db")),
            Some(PathBuf::from("/var/data")),
        );

        assert_eq!(config.db_path, PathBuf::from("/var/db/spending.db"));
        assert_eq!(config.data_dir, PathBuf::from("/var/data"));
    }

    #[test]
    fn input_path_follows_naming_convention() {
        let config = Config {
            db_path: PathBuf::from("expenses.db"),
            data_dir: PathBuf::from("/var/data"),
        };

        assert_eq!(
            config.input_path(2024),
            PathBuf::from("/var/data/expenditures_2024")
        );
    }
}
