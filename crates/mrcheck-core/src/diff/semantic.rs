//! Semantic equality over decoded object content
//!
//! Two documents are semantically equal when their normalized forms are
//! identical. Normalization:
//!
//! - elides `null`, empty strings, empty mappings and empty sequences inside
//!   mappings (a field set to its default equals an absent field), except
//!   that an empty string stays content inside the free-form maps `data`,
//!   `stringData`, `binaryData`, `labels` and `annotations`
//! - rewrites integral floats as integers (`2.0 == 2`)
//! - canonicalizes resource quantities found directly under `limits`,
//!   `requests`, `capacity`, `allocatable`, `hard` and `used` mappings, so
//!   `"1Gi" == "1024Mi"` and `"500m" == "0.5"`
//!
//! Mapping key order never matters; sequence order always does.

use serde_json::{Map, Number, Value};

/// Mappings whose scalar values are resource quantities
const QUANTITY_PARENTS: &[&str] = &["limits", "requests", "capacity", "allocatable", "hard", "used"];

/// Free-form string maps whose entries are content even when empty
const CONTENT_PARENTS: &[&str] = &["data", "stringData", "binaryData", "labels", "annotations"];

/// Largest magnitude at which every integral `f64` is exactly representable
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

const NANOS: i128 = 1_000_000_000;

pub fn semantic_eq(a: &Value, b: &Value) -> bool {
    a == b || normalize(a) == normalize(b)
}

/// Produce the canonical form used for comparison
pub fn normalize(value: &Value) -> Value {
    normalize_value(value, MapKind::Plain)
}

/// How the entries of the mapping being normalized are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapKind {
    Plain,
    Quantity,
    Content,
}

impl MapKind {
    fn of(key: &str) -> Self {
        if QUANTITY_PARENTS.contains(&key) {
            MapKind::Quantity
        } else if CONTENT_PARENTS.contains(&key) {
            MapKind::Content
        } else {
            MapKind::Plain
        }
    }
}

fn normalize_value(value: &Value, kind: MapKind) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, child) in map {
                let normalized = if kind == MapKind::Quantity && is_scalar(child) {
                    quantity_value(child).unwrap_or_else(|| normalize_value(child, MapKind::Plain))
                } else {
                    normalize_value(child, MapKind::of(key))
                };
                let keep_empty_string = kind == MapKind::Content && normalized.is_string();
                if keep_empty_string || !is_default(&normalized) {
                    out.insert(key.clone(), normalized);
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| normalize_value(v, MapKind::Plain)).collect()),
        Value::Number(n) => normalize_number(n),
        other => other.clone(),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_))
}

fn is_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn normalize_number(n: &Number) -> Value {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT {
                return Value::from(f as i64);
            }
        }
    }
    Value::Number(n.clone())
}

fn quantity_value(value: &Value) -> Option<Value> {
    let nanos = match value {
        Value::String(s) => parse_quantity(s)?,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i128::from(i).checked_mul(NANOS)?
            } else {
                let scaled = (n.as_f64()? * NANOS as f64).round();
                if !scaled.is_finite() {
                    return None;
                }
                scaled as i128
            }
        }
        _ => return None,
    };
    Some(Value::String(format!("{}n", nanos)))
}

/// Parse a resource quantity into nano-units
///
/// Accepts an optionally signed decimal number followed by a binary suffix
/// (`Ki`..`Ei`), a decimal suffix (`n`, `u`, `m`, `k`, `M`..`E`) or an
/// exponent (`e3`). Returns `None` for anything else, or when the value is
/// not a whole number of nano-units.
pub fn parse_quantity(text: &str) -> Option<i128> {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
        .unwrap_or(text.len());
    let (number, suffix) = text.split_at(split);

    let (negative, digits) = match number.as_bytes().first() {
        Some(b'-') => (true, &number[1..]),
        Some(b'+') => (false, &number[1..]),
        _ => (false, number),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    let mantissa: i128 = format!("{}{}", int_part, frac_part).parse().ok()?;
    let scale = i32::try_from(frac_part.len()).ok()?;

    let (binary_power, decimal_exp): (u32, i32) = match suffix {
        "" => (0, 0),
        "Ki" => (1, 0),
        "Mi" => (2, 0),
        "Gi" => (3, 0),
        "Ti" => (4, 0),
        "Pi" => (5, 0),
        "Ei" => (6, 0),
        "n" => (0, -9),
        "u" => (0, -6),
        "m" => (0, -3),
        "k" => (0, 3),
        "M" => (0, 6),
        "G" => (0, 9),
        "T" => (0, 12),
        "P" => (0, 15),
        "E" => (0, 18),
        s if s.starts_with('e') || s.starts_with('E') => (0, s[1..].parse().ok()?),
        _ => return None,
    };

    let mut value = mantissa.checked_mul(1024i128.checked_pow(binary_power)?)?;
    let shift = 9i32.checked_add(decimal_exp)?.checked_sub(scale)?;
    if shift >= 0 {
        value = value.checked_mul(10i128.checked_pow(u32::try_from(shift).ok()?)?)?;
    } else {
        let divisor = 10i128.checked_pow(u32::try_from(-shift).ok()?)?;
        if value % divisor != 0 {
            return None;
        }
        value /= divisor;
    }
    Some(if negative { -value } else { value })
}
