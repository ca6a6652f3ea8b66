//! Field extraction from free listing text
//!
//! Pure functions turning the raw salary, experience and publish-date strings of a
//! listing into typed values. No I/O and no hidden state: the same input always
//! yields the same output.
//!
//! # Example
//!
//! ```
//! use vacancy_harvest::extract::{parse_experience, parse_salary};
//! use vacancy_harvest::model::Currency;
//!
//! let salary = parse_salary("от 50 000 ₸ на руки").unwrap();
//! assert_eq!(salary.min, Some(50_000));
//! assert_eq!(salary.max, None);
//! assert_eq!(salary.currency, Currency::Kzt);
//! assert!(!salary.brutto);
//!
//! let experience = parse_experience("от 6 месяцев").unwrap();
//! assert_eq!(experience.min, Some(0.5));
//! ```

mod clean;
mod date;
mod experience;
mod salary;

pub use clean::{numeric_tokens, strip_trailing_lone_digit};
pub use date::{month_number, parse_date};
pub use experience::parse_experience;
pub use salary::parse_salary;

use thiserror::Error;

/// Errors raised while interpreting listing text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No number found in {field} text '{text}'")]
    NoNumber { field: &'static str, text: String },

    #[error("Number '{token}' is out of range")]
    InvalidNumber { token: String },

    #[error("Date text '{0}' is not '<day> <month> <year>'")]
    MalformedDate(String),

    #[error("Unknown month '{0}'")]
    UnknownMonth(String),

    #[error("Date '{0}' does not exist")]
    InvalidDate(String),
}

/// Result type for field extraction
pub type ParseResult<T> = Result<T, ParseError>;

/// Returns true if `word` appears as a whole word in `text`, ignoring case
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| w == word)
}

/// Returns true if `phrase` appears anywhere in `text`, ignoring case and
/// treating every run of whitespace as a single space
pub(crate) fn contains_phrase(text: &str, phrase: &str) -> bool {
    let folded = text.split_whitespace().collect::<Vec<_>>().join(" ");
    folded.to_lowercase().contains(phrase)
}
