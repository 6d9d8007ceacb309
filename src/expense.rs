//! This file defines the `Expense` type and its year-scoped storage.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::{
    Error,
    db::{DatabaseID, MapRow},
};

/// One transaction line from an expenditure file, bound to a category row.
///
/// Expense rows are append-only: the importer never updates or deletes
/// them, and re-importing overlapping data duplicates rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The id of the category the expense belongs to.
    pub category_id: DatabaseID,

    /// What the money was spent on.
    pub description: String,

    /// The amount spent. An empty price field is stored as NULL.
    pub price: Option<f64>,

    /// The calendar date of the transaction.
    pub date: Date,

    /// The time of day of the transaction.
    pub time: Time,

    /// Where the transaction took place.
    pub location: String,

    /// The payment method, e.g., 'Card' or 'Cash'.
    pub method: String,
}

impl Expense {
    pub(crate) fn create_table(connection: &Connection, year: u16) -> Result<(), rusqlite::Error> {
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS expenses{year} (
                    id INTEGER PRIMARY KEY,
                    category_id INTEGER NOT NULL,
                    description TEXT NOT NULL,
                    price REAL,
                    date TEXT NOT NULL,
                    time TEXT NOT NULL,
                    location TEXT NOT NULL,
                    method TEXT NOT NULL,
                    FOREIGN KEY(category_id) REFERENCES categories(id)
                )"
            ),
            (),
        )?;

        Ok(())
    }

    /// Append `expenses` to the expense table for `year`.
    ///
    /// The caller decides the transaction boundary.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - a `category_id` does not refer to a valid category,
    /// - or there is some other SQL error.
    pub fn insert_batch(
        connection: &Connection,
        year: u16,
        expenses: &[Expense],
    ) -> Result<(), Error> {
        let mut statement = connection.prepare(&format!(
            "INSERT INTO expenses{year}
             (category_id, description, price, date, time, location, method)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        ))?;

        for expense in expenses {
            statement.execute((
                expense.category_id,
                &expense.description,
                expense.price,
                expense.date,
                expense.time,
                &expense.location,
                &expense.method,
            ))?;
        }

        Ok(())
    }

    /// Retrieve the expenses for `year` in insertion order.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    pub fn select_all(connection: &Connection, year: u16) -> Result<Vec<Self>, Error> {
        connection
            .prepare(&format!(
                "SELECT category_id, description, price, date, time, location, method
                 FROM expenses{year} ORDER BY id"
            ))?
            .query_map([], Expense::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }
}

impl MapRow for Expense {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            category_id: row.get(offset)?,
            description: row.get(offset + 1)?,
            price: row.get(offset + 2)?,
            date: row.get(offset + 3)?,
            time: row.get(offset + 4)?,
            location: row.get(offset + 5)?,
            method: row.get(offset + 6)?,
        })
    }
}

#[cfg(test)]
mod expense_tests {
    use rusqlite::Connection;
    use time::macros::{date, time};

    use crate::{
        category::{Category, CategoryName},
        db::initialize,
    };

    use super::Expense;

    fn init_db_with_category() -> (Connection, Category) {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        initialize(&conn, 2024).unwrap();

        let category =
            Category::find_or_create(&conn, &CategoryName::new("Food").unwrap()).unwrap();

        (conn, category)
    }

    #[test]
    fn insert_batch_persists_all_fields() {
        let (conn, category) = init_db_with_category();

        let expenses = vec![
            Expense {
                category_id: category.id,
                description: "Lunch".to_string(),
                price: Some(12.5),
                date: date!(2024 - 03 - 01),
                time: time!(12:30),
                location: "Cafe".to_string(),
                method: "Card".to_string(),
            },
            Expense {
                category_id: category.id,
                description: "Snack".to_string(),
                price: None,
                date: date!(2024 - 03 - 02),
                time: time!(00:00),
                location: "Dairy".to_string(),
                method: "Cash".to_string(),
            },
        ];

        Expense::insert_batch(&conn, 2024, &expenses).unwrap();

        assert_eq!(Expense::select_all(&conn, 2024).unwrap(), expenses);
    }

    #[test]
    fn insert_batch_rejects_unknown_category() {
        let (conn, category) = init_db_with_category();

        let expense = Expense {
            category_id: category.id + 42,
            description: "Lunch".to_string(),
            price: Some(12.5),
            date: date!(2024 - 03 - 01),
            time: time!(12:30),
            location: "Cafe".to_string(),
            method: "Card".to_string(),
        };

        let result = Expense::insert_batch(&conn, 2024, &[expense]);

        assert!(result.is_err());
    }
}
