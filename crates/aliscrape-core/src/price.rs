//! Representative price derivation from the loosely-typed price fields the
//! marketplace API returns.
//!
//! A price field may be absent, a single number, a number rendered as text,
//! a delimited range (`"9.99 - 12.99"`, `"1,2,3"`, `"4;5"`, `"6|7"`), or a JSON
//! array mixing numbers and strings. Every function here is total: tokens
//! that do not parse are dropped and the worst case is an empty sequence
//! (or a `0.0` display price).

use serde_json::Value;

use crate::record::NormalizedRecord;

/// Delimiters tried in priority order; the first one present in the text
/// decides how it is split.
const PRICE_DELIMITERS: [&str; 4] = [" - ", ",", ";", "|"];

/// Lower and upper bound derived from a discount/original price pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Builds the range from already-parsed price sequences.
    ///
    /// `min` prefers the discount prices and falls back to the original
    /// prices; `max` prefers the original prices and falls back to the
    /// discount prices.
    #[must_use]
    pub fn from_parsed(discount: &[f64], original: &[f64]) -> Self {
        let min = lowest(discount).or_else(|| lowest(original));
        let max = highest(original).or_else(|| highest(discount));
        Self { min, max }
    }

    /// Midpoint of the range rounded to cents, or whichever bound exists,
    /// or `0.0` when neither does.
    #[must_use]
    pub fn display_price(self) -> f64 {
        match (self.min, self.max) {
            (Some(min), Some(max)) => round_cents((min + max) / 2.0),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => 0.0,
        }
    }
}

/// Splits a price string into its numeric tokens.
///
/// Unparsable and non-finite tokens are skipped.
#[must_use]
pub fn parse_price_text(raw: &str) -> Vec<f64> {
    match PRICE_DELIMITERS.iter().find(|delim| raw.contains(**delim)) {
        Some(delim) => raw.split(delim).filter_map(parse_token).collect(),
        None => parse_token(raw).into_iter().collect(),
    }
}

/// Extracts numeric prices from a raw JSON price field.
///
/// Strings are split with [`parse_price_text`]; arrays contribute each of
/// their number or string elements. Anything else yields nothing.
#[must_use]
pub fn parse_price_value(value: &Value) -> Vec<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).into_iter().collect(),
        Value::String(s) => parse_price_text(s),
        Value::Array(items) => items
            .iter()
            .flat_map(|item| match item {
                Value::Number(_) | Value::String(_) => parse_price_value(item),
                _ => Vec::new(),
            })
            .collect(),
        Value::Null | Value::Bool(_) | Value::Object(_) => Vec::new(),
    }
}

/// Returns the price range of a normalized record.
#[must_use]
pub fn resolve_price_range(record: &NormalizedRecord) -> PriceRange {
    PriceRange::from_parsed(
        &parse_price_text(&record.discount_price),
        &parse_price_text(&record.original_price),
    )
}

/// Returns the single price shown for a normalized record.
#[must_use]
pub fn resolve_display_price(record: &NormalizedRecord) -> f64 {
    resolve_price_range(record).display_price()
}

/// Same as [`resolve_display_price`] but over raw JSON price fields, for
/// callers holding the API values directly.
#[must_use]
pub fn resolve_display_price_values(discount: &Value, original: &Value) -> f64 {
    PriceRange::from_parsed(&parse_price_value(discount), &parse_price_value(original))
        .display_price()
}

/// Renders a price for export: whole numbers keep one decimal place
/// (`12.0`), everything else uses the shortest exact form (`11.49`).
#[must_use]
pub fn format_price(price: f64) -> String {
    if price.is_finite() && price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{price:.1}")
    } else {
        format!("{price}")
    }
}

fn parse_token(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn lowest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn highest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Rounds to two decimals on the exact binary value, ties to even.
///
/// A value can only sit exactly between two cents when it is an odd number
/// of eighths (`x.125`, `x.375`, ...); everything else is decided by the
/// exact decimal expansion `{:.2}` formatting works from.
fn round_cents(value: f64) -> f64 {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        let lower = (value * 100.0).floor();
        let cents = if lower.rem_euclid(2.0) == 0.0 {
            lower
        } else {
            lower + 1.0
        };
        cents / 100.0
    } else {
        format!("{value:.2}").parse().unwrap_or(value)
    }
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
