use crate::extract::{contains_phrase, contains_word, numeric_tokens, ParseError, ParseResult};
use crate::model::ExperienceRange;

/// Text shown when no experience is required
const NO_EXPERIENCE: &str = "Без опыта";

/// Words and phrases that turn a single number into a lower bound
const LOWER_BOUND_WORDS: [&str; 2] = ["от", "более"];
const LOWER_BOUND_PHRASES: [&str; 1] = ["не менее"];

/// Stem of the word "month" in every grammatical form
const MONTH_STEM: &str = "месяц";

/// Parses a raw experience string into an [`ExperienceRange`] in years
///
/// "Без опыта" yields `{0, 0}`. Otherwise two numbers form `{min, max}`; a single
/// number is a lower bound when the text says "от", "более" or "не менее", and an
/// upper bound otherwise. Values given in months are divided by 12.
///
/// # Errors
///
/// `ParseError::NoNumber` when the text holds no number.
pub fn parse_experience(text: &str) -> ParseResult<ExperienceRange> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized == NO_EXPERIENCE {
        return Ok(ExperienceRange::NONE_REQUIRED);
    }

    let tokens = numeric_tokens(text);
    let values = tokens
        .iter()
        .take(2)
        .map(|t| to_years(t))
        .collect::<ParseResult<Vec<f64>>>()?;

    let (min, max) = match values.as_slice() {
        [] => {
            return Err(ParseError::NoNumber {
                field: "experience",
                text: text.to_string(),
            })
        }
        [single] if is_lower_bound(text) => (Some(*single), None),
        [single] => (None, Some(*single)),
        [low, high, ..] => (Some(*low), Some(*high)),
    };

    let range = ExperienceRange { min, max };
    if contains_phrase(text, MONTH_STEM) {
        return Ok(ExperienceRange {
            min: range.min.map(|m| m / 12.0),
            max: range.max.map(|m| m / 12.0),
        });
    }
    Ok(range)
}

fn is_lower_bound(text: &str) -> bool {
    LOWER_BOUND_WORDS.iter().any(|w| contains_word(text, w))
        || LOWER_BOUND_PHRASES.iter().any(|p| contains_phrase(text, p))
}

fn to_years(token: &str) -> ParseResult<f64> {
    token
        .parse::<u32>()
        .map(f64::from)
        .map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
        })
}
