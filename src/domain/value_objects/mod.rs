//! Value Objects for the storefront product page

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque variant identifier, stable across page loads and shared links.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl From<&str> for VariantId {
    fn from(value: &str) -> Self { Self::new(value) }
}

/// Identifier of a gallery image (a variant's featured image, a gallery slide).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// 1-based option slot. A product declares at most three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionPosition(u8);

impl OptionPosition {
    pub const MAX: u8 = 3;
    pub const ALL: [OptionPosition; 3] = [OptionPosition(1), OptionPosition(2), OptionPosition(3)];

    pub fn new(value: u8) -> Result<Self, OptionPositionError> {
        if (1..=Self::MAX).contains(&value) { Ok(Self(value)) } else { Err(OptionPositionError::OutOfRange(value)) }
    }
    pub fn get(&self) -> u8 { self.0 }
    /// Zero-based slot index for fixed-size option arrays.
    pub fn index(&self) -> usize { usize::from(self.0 - 1) }

    /// Parses a selector index such as `option2`.
    pub fn from_selector_index(index: &str) -> Result<Self, OptionPositionError> {
        let digits = index.strip_prefix("option").ok_or_else(|| OptionPositionError::Malformed(index.to_string()))?;
        let value: u8 = digits.parse().map_err(|_| OptionPositionError::Malformed(index.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u8> for OptionPosition {
    type Error = OptionPositionError;
    fn try_from(value: u8) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<OptionPosition> for u8 {
    fn from(position: OptionPosition) -> Self { position.0 }
}

impl fmt::Display for OptionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum OptionPositionError { OutOfRange(u8), Malformed(String) }
impl std::error::Error for OptionPositionError {}
impl fmt::Display for OptionPositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(v) => write!(f, "option position {v} outside 1..=3"),
            Self::Malformed(s) => write!(f, "malformed option index {s:?}"),
        }
    }
}

/// Money value object, a non-negative amount in minor currency units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub fn from_minor(cents: u64) -> Self { Self(cents) }
    pub fn minor_units(&self) -> u64 { self.0 }
    pub fn amount(&self) -> Decimal { Decimal::from_i128_with_scale(i128::from(self.0), 2) }
    pub fn format(&self, format: &MoneyFormat) -> String { format.render(*self) }
}

/// Storefront money template such as `${{amount}}` or `{{amount_with_comma_separator}} €`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoneyFormat {
    template: String,
    placeholder: AmountStyle,
    start: usize,
    end: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AmountStyle { Amount, NoDecimals, CommaSeparator, NoDecimalsCommaSeparator }

impl MoneyFormat {
    pub fn new(template: impl Into<String>) -> Result<Self, MoneyFormatError> {
        let template = template.into();
        let start = template.find("{{").ok_or(MoneyFormatError::MissingPlaceholder)?;
        let close = template[start..].find("}}").ok_or(MoneyFormatError::MissingPlaceholder)?;
        let name = template[start + 2..start + close].trim();
        let placeholder = match name {
            "amount" => AmountStyle::Amount,
            "amount_no_decimals" => AmountStyle::NoDecimals,
            "amount_with_comma_separator" => AmountStyle::CommaSeparator,
            "amount_no_decimals_with_comma_separator" => AmountStyle::NoDecimalsCommaSeparator,
            other => return Err(MoneyFormatError::UnknownPlaceholder(other.to_string())),
        };
        Ok(Self { start, end: start + close + 2, placeholder, template })
    }

    pub fn template(&self) -> &str { &self.template }

    fn render(&self, money: Money) -> String {
        let amount = match self.placeholder {
            AmountStyle::Amount => delimited(money, 2, ",", "."),
            AmountStyle::NoDecimals => delimited(money, 0, ",", "."),
            AmountStyle::CommaSeparator => delimited(money, 2, ".", ","),
            AmountStyle::NoDecimalsCommaSeparator => delimited(money, 0, ".", ","),
        };
        format!("{}{}{}", &self.template[..self.start], amount, &self.template[self.end..])
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self { template: "${{amount}}".to_string(), placeholder: AmountStyle::Amount, start: 1, end: 11 }
    }
}

impl TryFrom<String> for MoneyFormat {
    type Error = MoneyFormatError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<MoneyFormat> for String {
    fn from(format: MoneyFormat) -> Self { format.template }
}

fn delimited(money: Money, precision: u32, thousands: &str, decimal: &str) -> String {
    let rounded = money.amount().round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 { grouped.push_str(thousands); }
        grouped.push(digit);
    }
    match fraction {
        Some(fraction) if precision > 0 => format!("{grouped}{decimal}{fraction}"),
        _ => grouped,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum MoneyFormatError { MissingPlaceholder, UnknownPlaceholder(String) }
impl std::error::Error for MoneyFormatError {}
impl fmt::Display for MoneyFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPlaceholder => write!(f, "money format has no {{{{amount}}}} placeholder"),
            Self::UnknownPlaceholder(name) => write!(f, "unknown money placeholder {name:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_option_position_range() {
        assert!(OptionPosition::new(0).is_err());
        assert!(OptionPosition::new(4).is_err());
        assert_eq!(OptionPosition::new(3).unwrap().index(), 2);
    }
    #[test]
    fn test_selector_index() {
        assert_eq!(OptionPosition::from_selector_index("option2").unwrap().get(), 2);
        assert!(OptionPosition::from_selector_index("size").is_err());
        assert!(OptionPosition::from_selector_index("option9").is_err());
    }
    #[test]
    fn test_money_amount() { assert_eq!(Money::from_minor(1999).amount(), Decimal::new(1999, 2)); }
    #[test]
    fn test_money_format_styles() {
        let money = Money::from_minor(123_456_789);
        assert_eq!(money.format(&MoneyFormat::default()), "$1,234,567.89");
        assert_eq!(money.format(&MoneyFormat::new("{{ amount_no_decimals }} USD").unwrap()), "1,234,568 USD");
        assert_eq!(money.format(&MoneyFormat::new("{{amount_with_comma_separator}} €").unwrap()), "1.234.567,89 €");
        assert_eq!(money.format(&MoneyFormat::new("{{amount_no_decimals_with_comma_separator}}kr").unwrap()), "1.234.568kr");
    }
    #[test]
    fn test_money_format_small_amounts() {
        assert_eq!(Money::from_minor(5).format(&MoneyFormat::default()), "$0.05");
        assert_eq!(Money::from_minor(1000).format(&MoneyFormat::default()), "$10.00");
        assert_eq!(Money::from_minor(150).format(&MoneyFormat::new("{{amount_no_decimals}}").unwrap()), "2");
    }
    #[test]
    fn test_money_format_rejects_unknown() {
        assert_eq!(MoneyFormat::new("$"), Err(MoneyFormatError::MissingPlaceholder));
        assert!(matches!(MoneyFormat::new("{{price}}"), Err(MoneyFormatError::UnknownPlaceholder(_))));
    }
    #[test]
    fn test_default_format_matches_parsed() { assert_eq!(MoneyFormat::default(), MoneyFormat::new("${{amount}}").unwrap()); }
}
