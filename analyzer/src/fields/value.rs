use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A resolved field value: exact decimal, count, or text.
///
/// Serializes untagged: decimals as strings (exchange convention),
/// counts as numbers, text as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Decimal(Decimal),
    Int(u64),
    Text(String),
}

impl FieldValue {
    /// Total order for sorting symbols by a field.
    ///
    /// Values of a single field share a variant; across numeric
    /// variants, comparison is by numeric value, and numbers sort
    /// before text.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Decimal(a), Decimal(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Decimal(a), Int(b)) => a.cmp(&rust_decimal::Decimal::from(*b)),
            (Int(a), Decimal(b)) => rust_decimal::Decimal::from(*a).cmp(b),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
        }
    }

    /// Absolute difference between two numeric values; `None` for text.
    pub fn abs_delta(&self, other: &FieldValue) -> Option<FieldValue> {
        use FieldValue::*;
        match (self, other) {
            (Decimal(a), Decimal(b)) => Some(Decimal((*a - *b).abs())),
            (Int(a), Int(b)) => Some(Int(a.abs_diff(*b))),
            (Decimal(a), Int(b)) | (Int(b), Decimal(a)) => {
                Some(Decimal((*a - rust_decimal::Decimal::from(*b)).abs()))
            }
            _ => None,
        }
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compare_decimals() {
        let a = FieldValue::Decimal(dec!(10));
        let b = FieldValue::Decimal(dec!(20));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_compare_across_numeric_variants() {
        let a = FieldValue::Int(3);
        let b = FieldValue::Decimal(dec!(2.5));
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_eq!(b.compare(&a), Ordering::Less);
    }

    #[test]
    fn test_abs_delta_decimal() {
        let a = FieldValue::Decimal(dec!(10));
        let b = FieldValue::Decimal(dec!(12.5));
        assert_eq!(a.abs_delta(&b), Some(FieldValue::Decimal(dec!(2.5))));
        assert_eq!(b.abs_delta(&a), Some(FieldValue::Decimal(dec!(2.5))));
    }

    #[test]
    fn test_abs_delta_int() {
        let a = FieldValue::Int(5);
        let b = FieldValue::Int(8);
        assert_eq!(a.abs_delta(&b), Some(FieldValue::Int(3)));
    }

    #[test]
    fn test_abs_delta_text_is_none() {
        let a = FieldValue::Text("ETH".to_string());
        let b = FieldValue::Text("BTC".to_string());
        assert_eq!(a.abs_delta(&b), None);
    }

    #[test]
    fn test_serialize() {
        assert_eq!(
            serde_json::to_string(&FieldValue::Decimal(dec!(1.5))).unwrap(),
            "\"1.5\""
        );
        assert_eq!(serde_json::to_string(&FieldValue::Int(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&FieldValue::Text("BTCUSDT".to_string())).unwrap(),
            "\"BTCUSDT\""
        );
    }
}
