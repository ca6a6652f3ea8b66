use crate::extract::{ParseError, ParseResult};
use chrono::NaiveDate;

/// Genitive month names as they appear in publish dates, January first
const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Maps a month name to its number (1-12)
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// Parses a `<day> <month name> <year>` publish date
///
/// Tokens past the third are ignored.
///
/// # Errors
///
/// - `MalformedDate` when fewer than three tokens are present or day/year are not numbers
/// - `UnknownMonth` when the month word is not in the table
/// - `InvalidDate` when the day does not exist in that month
pub fn parse_date(text: &str) -> ParseResult<NaiveDate> {
    let mut words = text.split_whitespace();
    let (Some(day), Some(month), Some(year)) = (words.next(), words.next(), words.next()) else {
        return Err(ParseError::MalformedDate(text.to_string()));
    };

    let day: u32 = day
        .parse()
        .map_err(|_| ParseError::MalformedDate(text.to_string()))?;
    let month = month_number(month).ok_or_else(|| ParseError::UnknownMonth(month.to_string()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| ParseError::MalformedDate(text.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ParseError::InvalidDate(text.to_string()))
}
