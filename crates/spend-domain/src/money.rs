//! Decimal parsing, rounding and display helpers shared by every money field.

use std::str::FromStr;

use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};

/// Number of fractional digits shown for every amount.
pub const DISPLAY_SCALE: u32 = 2;

/// Largest amount accepted from user input: one quadrillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Parses user-entered text as a decimal. Surrounding whitespace is ignored;
/// anything else that is not a plain decimal number yields `None`.
pub fn parse_strict(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// Reads the leading decimal number of `text`, ignoring trailing garbage
/// (`"42.50 usd"` reads as 42.50). Text without a leading number reads as zero.
pub fn parse_lenient(text: &str) -> Decimal {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        if fraction_end > fraction_start {
            has_digits = true;
            end = fraction_end;
        }
    }
    if !has_digits {
        return Decimal::ZERO;
    }
    let candidate = trimmed[..end].trim_start_matches('+');
    let candidate = if candidate.starts_with('.') {
        format!("0{candidate}")
    } else if candidate.starts_with("-.") {
        format!("-0{}", &candidate[1..])
    } else {
        candidate.to_string()
    };
    Decimal::from_str(&candidate).unwrap_or(Decimal::ZERO)
}

/// Rounds to cents, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders `value` with exactly two fractional digits, e.g. `"450.25"`.
pub fn format_cents(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(DISPLAY_SCALE);
    rounded.to_string()
}

/// Reads a float through its shortest decimal rendering, so `0.1` stays `0.1`.
pub(crate) fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or(Decimal::ZERO)
}

/// Sum that clamps at the representable range instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

/// Income is stored as a JSON number. Values a float cannot hold exactly are
/// written as decimal text instead. Legacy blobs may carry `null` (a failed
/// parse that was serialized) or a numeric string; both are read leniently.
pub(crate) mod serde_income {
    use rust_decimal::{prelude::ToPrimitive, Decimal};
    use serde::{de::IgnoredAny, Deserialize, Deserializer, Serializer};

    use super::{decimal_from_f64, parse_lenient};

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.fract().is_zero() {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match value.to_f64() {
            Some(float) if decimal_from_f64(float) == *value => serializer.serialize_f64(float),
            _ => serializer.serialize_str(&value.normalize().to_string()),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIncome {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawIncome::deserialize(deserializer)? {
            RawIncome::Number(number) => decimal_from_f64(number),
            RawIncome::Text(text) => parse_lenient(&text),
            RawIncome::Other(_) => Decimal::ZERO,
        })
    }
}

/// Expense amounts keep the text the user typed. Numbers are accepted on read.
pub(crate) mod serde_amount_text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(f64),
        Missing(Option<()>),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => text,
            RawAmount::Number(number) => number.to_string(),
            RawAmount::Missing(_) => String::new(),
        })
    }
}
