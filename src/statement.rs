//! Functions to parse yearly expenditure files.
//!
//! A file holds one logical record set: rows are separated by `;` and
//! fields within a row by `,`, in the fixed order category, description,
//! price, date, time, location, method.

use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, category::CategoryName};

const FIELD_COUNT: usize = 7;

const CATEGORY_FIELD: usize = 0;
const DESCRIPTION_FIELD: usize = 1;
const PRICE_FIELD: usize = 2;
const DATE_FIELD: usize = 3;
const TIME_FIELD: usize = 4;
const LOCATION_FIELD: usize = 5;
const METHOD_FIELD: usize = 6;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]");

/// A single parsed row, not yet bound to a category row in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    /// The category name the row declares.
    pub category: CategoryName,

    /// What the money was spent on.
    pub description: String,

    /// The amount spent, or `None` for an empty price field.
    pub price: Option<f64>,

    /// The calendar date of the transaction.
    pub date: Date,

    /// The time of day of the transaction. `00:00` when the field could
    /// not be parsed.
    pub time: Time,

    /// Where the transaction took place.
    pub location: String,

    /// The payment method.
    pub method: String,
}

/// The outcome of parsing one expenditure file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedStatement {
    /// Rows that passed validation, in file order.
    pub rows: Vec<ExpenseRow>,

    /// Number of rows dropped by validation.
    pub skipped: usize,

    /// Number of rows kept with the time substituted by `00:00`.
    pub corrected: usize,
}

/// Parse the content of an expenditure file.
///
/// Rows that fail validation (fewer than seven fields, an empty category,
/// an unparseable date) are skipped with a diagnostic and parsing
/// continues. A row with an unparseable time is kept with the time
/// replaced by `00:00`. One diagnostic line is emitted per skipped or
/// corrected row.
///
/// # Errors
/// This function will return an [Error::InvalidPrice] if a non-empty price
/// field is not a number. There is no skip path for a malformed price.
pub fn parse_statement(text: &str) -> Result<ParsedStatement, Error> {
    let mut statement = ParsedStatement::default();

    for row in text.trim().split(';') {
        let fields: Vec<&str> = row.split(',').collect();

        if fields.len() < FIELD_COUNT {
            tracing::warn!("Skipping row with insufficient values: {row}");
            statement.skipped += 1;
            continue;
        }

        let category = match CategoryName::new(fields[CATEGORY_FIELD]) {
            Ok(category) => category,
            Err(_) => {
                tracing::warn!("Skipping row with invalid category value: {row}");
                statement.skipped += 1;
                continue;
            }
        };

        let price = parse_price(fields[PRICE_FIELD])?;

        let date = match Date::parse(fields[DATE_FIELD].trim(), &DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                tracing::warn!("Skipping row with invalid date format: {row}");
                statement.skipped += 1;
                continue;
            }
        };

        let time_field = fields[TIME_FIELD].trim();
        let time = match Time::parse(time_field, &TIME_FORMAT) {
            Ok(time) => time,
            Err(_) => {
                tracing::warn!("Invalid time format, using default value '00:00': {time_field}");
                statement.corrected += 1;
                Time::MIDNIGHT
            }
        };

        statement.rows.push(ExpenseRow {
            category,
            description: fields[DESCRIPTION_FIELD].trim().to_string(),
            price,
            date,
            time,
            location: fields[LOCATION_FIELD].trim().to_string(),
            method: fields[METHOD_FIELD].trim().to_string(),
        });
    }

    Ok(statement)
}

fn parse_price(field: &str) -> Result<Option<f64>, Error> {
    let field = field.trim();

    if field.is_empty() {
        return Ok(None);
    }

    field
        .parse()
        .map(Some)
        .map_err(|_| Error::InvalidPrice(field.to_string()))
}
