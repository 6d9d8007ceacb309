//! This file defines the `Category` type: a named grouping of expenses,
//! deduplicated by exact name match.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    db::{DatabaseID, MapRow},
};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from a raw field value.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    /// This function will return an error if `name` is empty after trimming.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`,
    /// because if the non-empty invariant is violated it will cause
    /// incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses, e.g., 'Groceries', 'Eating Out', 'Transport'.
///
/// Categories are created lazily the first time a name is encountered and
/// are never updated or deleted by the importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The id of the category row.
    pub id: DatabaseID,

    /// The name of the category.
    pub name: CategoryName,
}

impl Category {
    pub(crate) fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                category_name TEXT NOT NULL UNIQUE
            )",
            (),
        )?;

        Ok(())
    }

    /// Look up a category by exact name, inserting a new row if absent.
    ///
    /// Matching is case-sensitive: names differing only in case resolve to
    /// distinct categories.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    pub fn find_or_create(connection: &Connection, name: &CategoryName) -> Result<Self, Error> {
        let selected = connection
            .prepare("SELECT id, category_name FROM categories WHERE category_name = :name")?
            .query_row(&[(":name", name.as_ref())], Category::map_row);

        match selected {
            Ok(category) => Ok(category),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                connection.execute(
                    "INSERT INTO categories (category_name) VALUES (?1)",
                    (name.as_ref(),),
                )?;

                Ok(Self {
                    id: connection.last_insert_rowid(),
                    name: name.clone(),
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Retrieve every category in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    pub fn select_all(connection: &Connection) -> Result<Vec<Self>, Error> {
        connection
            .prepare("SELECT id, category_name FROM categories")?
            .query_map([], Category::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }
}

impl MapRow for Category {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        Ok(Self { id, name })
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::Error;

    use super::CategoryName;

    #[test]
    fn new_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_fails_on_whitespace_only_string() {
        let category_name = CategoryName::new("  \n ");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let category_name = CategoryName::new(" Food ").unwrap();

        assert_eq!(category_name.as_ref(), "Food");
    }
}

#[cfg(test)]
mod category_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{Category, CategoryName};

    fn init_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn, 2024).unwrap();
        conn
    }

    #[test]
    fn find_or_create_inserts_new_category() {
        let conn = init_db();
        let name = CategoryName::new("Food").unwrap();

        let category = Category::find_or_create(&conn, &name).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
    }

    #[test]
    fn find_or_create_reuses_existing_id() {
        let conn = init_db();
        let name = CategoryName::new("Food").unwrap();

        let first = Category::find_or_create(&conn, &name).unwrap();
        let second = Category::find_or_create(&conn, &name).unwrap();

        assert_eq!(first, second);
        assert_eq!(Category::select_all(&conn).unwrap().len(), 1);
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let conn = init_db();

        let upper =
            Category::find_or_create(&conn, &CategoryName::new("Food").unwrap()).unwrap();
        let lower =
            Category::find_or_create(&conn, &CategoryName::new("food").unwrap()).unwrap();

        assert_ne!(upper.id, lower.id);
        assert_eq!(Category::select_all(&conn).unwrap().len(), 2);
    }
}
