//! POKT / uPOKT conversion.
//!
//! 1 POKT = 1,000,000 uPOKT. All amounts are [`BigUint`]s: on-chain values
//! routinely exceed what an `f64` represents exactly, and the protocol has no
//! notion of fractional uPOKT.

use std::fmt;

use num_bigint::BigUint;
use num_format::{Locale, ToFormattedString};
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};

/// An amount of uPOKT.
pub type Amount = BigUint;

/// uPOKT per POKT.
pub const MICRO_UNITS_PER_POKT: u64 = 1_000_000;

/// A caller supplied quantity of POKT, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Text(String),
    Integer(i128),
    Whole(BigUint),
    Float(f64),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Text(s) => write!(f, "{s:?}"),
            Quantity::Integer(n) => write!(f, "{n}"),
            Quantity::Whole(n) => write!(f, "{n}"),
            Quantity::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Quantity::Text(value)
    }
}

impl From<BigUint> for Quantity {
    fn from(value: BigUint) -> Self {
        Quantity::Whole(value)
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        Quantity::Whole(BigUint::from(value))
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Float(value)
    }
}

macro_rules! integer_quantity {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Quantity {
                fn from(value: $ty) -> Self {
                    Quantity::Integer(i128::from(value))
                }
            }
        )*
    };
}

integer_quantity!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Quantity {
    fn into_whole(self) -> Result<BigUint> {
        let invalid = |q: &Quantity| Error::InvalidQuantity(q.to_string());
        match self {
            Quantity::Text(ref s) => parse_decimal(s).ok_or_else(|| invalid(&self)),
            Quantity::Integer(n) => u128::try_from(n).map(BigUint::from).map_err(|_| invalid(&self)),
            Quantity::Whole(n) => Ok(n),
            Quantity::Float(n) => {
                if !n.is_finite() || n.fract() != 0.0 || n < 0.0 {
                    return Err(invalid(&self));
                }
                BigUint::from_f64(n).ok_or_else(|| invalid(&self))
            },
        }
    }
}

/// Converts a whole amount of POKT to uPOKT.
///
/// # Errors
///
/// Returns [`Error::InvalidQuantity`] if the quantity has a fractional part,
/// is negative or not finite, or is a string that is not a plain base 10
/// integer. Nothing is ever truncated.
///
/// # Example
///
/// ```rust
/// use pocket_query::to_micro_units;
///
/// assert_eq!(to_micro_units("100").unwrap().to_string(), "100000000");
/// assert_eq!(to_micro_units(8000u32).unwrap().to_string(), "8000000000");
/// assert!(to_micro_units(4.2).is_err());
/// ```
pub fn to_micro_units(quantity: impl Into<Quantity>) -> Result<Amount> {
    let whole = quantity.into().into_whole()?;
    Ok(whole * MICRO_UNITS_PER_POKT)
}

/// Format uPOKT as a human readable string (e.g. "1,234.567890 POKT").
pub fn format_pokt(amount: &Amount) -> String {
    let divisor = BigUint::from(MICRO_UNITS_PER_POKT);
    let whole = amount / &divisor;
    let fractional = (amount % &divisor).to_u64().unwrap_or_default();

    format!("{}.{:06} POKT", whole.to_formatted_string(&Locale::en), fractional)
}

fn parse_decimal(s: &str) -> Option<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(s.as_bytes(), 10)
}

/// Reads an amount from a JSON value that is either a decimal string or a
/// non-negative integer.
///
/// Numbers are read from their textual form, so integers past `u64` are kept
/// exact when the JSON parser preserved their digits. Ones it already turned
/// into floats (e.g. `1e30`) are rejected; the gateway sends large amounts as
/// strings.
pub(crate) fn amount_from_json(value: &serde_json::Value) -> Option<Amount> {
    match value {
        serde_json::Value::String(s) => parse_decimal(s),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(u64),
}

pub(crate) fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Amount, D::Error> {
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => {
            parse_decimal(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid amount {s:?}")))
        },
        StringOrNumber::Number(n) => Ok(BigUint::from(n)),
    }
}

pub(crate) fn serialize_amount<S: Serializer>(amount: &Amount, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&amount.to_string())
}

pub(crate) fn serialize_optional_amount<S: Serializer>(
    amount: &Option<Amount>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => serializer.serialize_some(&amount.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Heights arrive as JSON numbers from some endpoints and as strings from
/// others.
pub(crate) fn deserialize_u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer {s:?}"))),
        StringOrNumber::Number(n) => Ok(n),
    }
}

pub(crate) fn u64_from_json(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
