use crate::extract::{contains_phrase, contains_word, numeric_tokens, ParseError, ParseResult};
use crate::model::{Currency, SalaryRange};

/// Word marking an upper bound ("up to")
const UP_TO: &str = "до";

/// Word marking a lower bound ("from")
const FROM: &str = "от";

/// Phrase marking a paid-out, after-tax figure
const PAID_OUT: &str = "на руки";

/// Pre-tax note ("before tax deduction"); its "до" is not an upper bound
const BEFORE_TAX: &str = "до вычета";

/// Parses a raw salary string into a [`SalaryRange`]
///
/// # Rules
///
/// | Tokens | Text contains | Result |
/// |--------|---------------|--------|
/// | 2+     | -             | `min = t0, max = t1` |
/// | 1      | "до"          | `min = None, max = t0` |
/// | 1      | "от"          | `min = t0, max = None` |
/// | 1      | neither       | `min = max = t0` |
///
/// "до" is checked first, so the two bound markers never both apply. The "до" of
/// the pre-tax note "до вычета налогов" is ignored. Currency is
/// detected from the symbol in the input text, and `brutto` is false only when
/// the text says the figure is paid out.
///
/// # Errors
///
/// `ParseError::NoNumber` when the text holds no number.
pub fn parse_salary(text: &str) -> ParseResult<SalaryRange> {
    let tokens = numeric_tokens(text);
    let values = tokens
        .iter()
        .take(2)
        .map(|t| to_amount(t))
        .collect::<ParseResult<Vec<u64>>>()?;
    let bounds = without_tax_note(text);

    let (min, max) = match values.as_slice() {
        [] => {
            return Err(ParseError::NoNumber {
                field: "salary",
                text: text.to_string(),
            })
        }
        [single] if contains_word(&bounds, UP_TO) => (None, Some(*single)),
        [single] if contains_word(&bounds, FROM) => (Some(*single), None),
        [single] => (Some(*single), Some(*single)),
        [low, high, ..] => (Some(*low), Some(*high)),
    };

    Ok(SalaryRange {
        min,
        max,
        currency: Currency::detect(text),
        brutto: !contains_phrase(text, PAID_OUT),
    })
}

/// Lowercased text with whitespace folded and the pre-tax note removed
fn without_tax_note(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace(BEFORE_TAX, " ")
}

fn to_amount(token: &str) -> ParseResult<u64> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_in_tenge() {
        for (a, b) in [(100_000u64, 150_000u64), (5, 9), (1_000, 2_500_000)] {
            let text = format!("{}–{} ₸", a, b);
            let salary = parse_salary(&text).unwrap();
            assert_eq!(
                salary,
                SalaryRange {
                    min: Some(a),
                    max: Some(b),
                    currency: Currency::Kzt,
                    brutto: true,
                }
            );
        }
    }

    #[test]
    fn test_range_with_grouped_thousands() {
        let salary = parse_salary("100\u{202f}000 – 150\u{202f}000 ₽ до вычета налогов").unwrap();
        assert_eq!(salary.min, Some(100_000));
        assert_eq!(salary.max, Some(150_000));
        assert_eq!(salary.currency, Currency::Local);
        assert!(salary.brutto);
    }

    #[test]
    fn test_up_to() {
        let salary = parse_salary("до 100000 руб.").unwrap();
        assert_eq!(salary.min, None);
        assert_eq!(salary.max, Some(100_000));
        assert_eq!(salary.currency, Currency::Local);
    }

    #[test]
    fn test_from_paid_out() {
        let salary = parse_salary("от 50 000 на руки").unwrap();
        assert_eq!(salary.min, Some(50_000));
        assert_eq!(salary.max, None);
        assert!(!salary.brutto);
    }

    #[test]
    fn test_single_value_without_marker() {
        let salary = parse_salary("3 000 $").unwrap();
        assert_eq!(salary.min, Some(3_000));
        assert_eq!(salary.max, Some(3_000));
        assert_eq!(salary.currency, Currency::Usd);
    }

    #[test]
    fn test_up_to_wins_over_from() {
        let salary = parse_salary("до 5 000 €, оплата от компании").unwrap();
        assert_eq!(salary.min, None);
        assert_eq!(salary.max, Some(5_000));
        assert_eq!(salary.currency, Currency::Eur);
    }

    #[test]
    fn test_from_before_tax_keeps_lower_bound() {
        let salary = parse_salary("от 150 000 ₽ до вычета налогов").unwrap();
        assert_eq!(
            salary,
            SalaryRange {
                min: Some(150_000),
                max: None,
                currency: Currency::Local,
                brutto: true,
            }
        );
    }

    #[test]
    fn test_up_to_before_tax() {
        let salary = parse_salary("до 90 000 ₽ До\u{a0}вычета налогов").unwrap();
        assert_eq!(salary.min, None);
        assert_eq!(salary.max, Some(90_000));
        assert!(salary.brutto);
    }

    #[test]
    fn test_single_value_before_tax() {
        let salary = parse_salary("120 000 ₽ до вычета налогов").unwrap();
        assert_eq!(salary.min, Some(120_000));
        assert_eq!(salary.max, Some(120_000));
    }

    #[test]
    fn test_trailing_lone_digit_is_dropped() {
        let salary = parse_salary("от 100 000 5").unwrap();
        assert_eq!(salary.min, Some(100_000));
        assert_eq!(salary.max, None);
    }

    #[test]
    fn test_no_number() {
        let err = parse_salary("по договорённости").unwrap_err();
        assert!(matches!(err, ParseError::NoNumber { field: "salary", .. }));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = parse_salary("99999999999999999999999 ₽").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_is_deterministic() {
        let text = "от 50 000 до 80 000 ₽ на руки";
        assert_eq!(parse_salary(text), parse_salary(text));
    }
}
