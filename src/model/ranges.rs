//! Typed values produced by field extraction

use std::fmt;

/// Salary currency, detected from the symbol in the raw salary text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// Local currency (rouble), used when no other symbol is present
    #[default]
    Local,
    Usd,
    Kzt,
    Eur,
}

impl Currency {
    /// Currencies in detection precedence order, with their symbols
    ///
    /// `Local` is the fallback and is never detected by symbol.
    pub const DETECTION_ORDER: [(Currency, char); 3] = [
        (Currency::Usd, '$'),
        (Currency::Kzt, '₸'),
        (Currency::Eur, '€'),
    ];

    /// Symbol written to the dataset
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Local => "₽",
            Self::Usd => "$",
            Self::Kzt => "₸",
            Self::Eur => "€",
        }
    }

    /// Detects the currency of a raw salary string
    pub fn detect(text: &str) -> Self {
        Self::DETECTION_ORDER
            .iter()
            .find(|(_, symbol)| text.contains(*symbol))
            .map(|(currency, _)| *currency)
            .unwrap_or_default()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A disclosed salary range
///
/// A listing without a salary carries no `SalaryRange` at all (`Option::None` on the
/// record). When one exists at least one of `min`/`max` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub currency: Currency,

    /// True when the figure is before tax withholding, false when it is the
    /// paid-out amount
    pub brutto: bool,
}

/// Required experience in years
///
/// Fractional when the source text is expressed in months.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExperienceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ExperienceRange {
    /// The "no experience required" range
    pub const NONE_REQUIRED: ExperienceRange = ExperienceRange {
        min: Some(0.0),
        max: Some(0.0),
    };
}
