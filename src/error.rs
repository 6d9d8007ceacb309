//! Defines the crate level error type.

/// The errors that may occur during an import run.
///
/// Recoverable row problems (short rows, bad dates, bad times) never become
/// an `Error`; they are reported as diagnostics and the run continues.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The input file for the requested year does not exist.
    #[error("file \"{0}\" not found")]
    InputFileNotFound(String),

    /// The input file exists but could not be read.
    #[error("could not read \"{0}\": {1}")]
    InputFileUnreadable(String, String),

    /// An empty string was used to create a category name.
    #[error("an empty string is not a valid category name")]
    EmptyCategoryName,

    /// A non-empty price field could not be parsed as a number.
    ///
    /// Unlike the date and time fields, a malformed price has no skip or
    /// substitute path and aborts the whole run.
    #[error("could not parse \"{0}\" as a price")]
    InvalidPrice(String),

    /// The requested row could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
