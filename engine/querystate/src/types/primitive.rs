use ordered_float::OrderedFloat;

use super::{QueryType, Type};
use crate::value::Value;

#[derive(Clone, Copy, Debug)]
pub struct StringType;

#[derive(Clone, Copy, Debug)]
pub struct IntType;

#[derive(Clone, Copy, Debug)]
pub struct FloatType;

#[derive(Clone, Copy, Debug)]
pub struct BoolType;

pub fn string() -> Type {
    Type::new(StringType)
}

pub fn int() -> Type {
    Type::new(IntType)
}

pub fn float() -> Type {
    Type::new(FloatType)
}

pub fn boolean() -> Type {
    Type::new(BoolType)
}

impl QueryType for StringType {
    fn parse(&self, input: &str) -> Option<Value> {
        Some(Value::String(input.to_string()))
    }

    fn serialize(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => plain_text(other),
        }
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::String(a), Value::String(b)) if a == b)
    }

    fn describe(&self) -> String {
        "string".into()
    }
}

impl QueryType for IntType {
    fn parse(&self, input: &str) -> Option<Value> {
        parse_int_prefix(input).map(Value::Int)
    }

    fn serialize(&self, value: &Value) -> String {
        match value {
            Value::Int(n) => n.to_string(),
            other => plain_text(other),
        }
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::Int(a), Value::Int(b)) if a == b)
    }

    fn describe(&self) -> String {
        "int".into()
    }
}

impl QueryType for FloatType {
    fn parse(&self, input: &str) -> Option<Value> {
        parse_float_prefix(input).map(|f| Value::Float(OrderedFloat(f)))
    }

    fn serialize(&self, value: &Value) -> String {
        match value {
            Value::Float(f) => format_float(f.0),
            other => plain_text(other),
        }
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        // Exact comparison: values round-trip through decimal text.
        matches!((left, right), (Value::Float(a), Value::Float(b)) if a.0 == b.0)
    }

    fn describe(&self) -> String {
        "float".into()
    }
}

impl QueryType for BoolType {
    fn parse(&self, input: &str) -> Option<Value> {
        Some(Value::Bool(input == "true" || input == "1"))
    }

    fn serialize(&self, value: &Value) -> String {
        match value {
            Value::Bool(true) => "1".into(),
            Value::Bool(false) => "0".into(),
            other => plain_text(other),
        }
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::Bool(a), Value::Bool(b)) if a == b)
    }

    fn describe(&self) -> String {
        "boolean".into()
    }
}

/// Leading integer prefix: optional whitespace, optional sign, then decimal
/// digits or `0x`/`0X` followed by hex digits. Anything after the digits is
/// ignored. Values outside `i64` fail.
fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let len = rest
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }
    let digits = &rest[..len];
    if negative {
        i64::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

/// Longest leading decimal literal (`[+-]digits[.digits][e[+-]digits]`) or
/// `Infinity`. Anything after it is ignored.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0usize;
    let mut negative = false;
    if let Some(sign @ (b'+' | b'-')) = bytes.first() {
        negative = *sign == b'-';
        end = 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = count_digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse().ok()
}

/// Shortest decimal text that parses back to the same float.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_infinite() {
        if value.is_sign_negative() {
            "-Infinity".into()
        } else {
            "Infinity".into()
        }
    } else if value == 0.0 {
        "0".into()
    } else {
        value.to_string()
    }
}

/// Fallback rendering for a value handed to a descriptor of another kind.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => format_float(f.0),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::Tuple(components) => components
            .iter()
            .map(|(_, v)| plain_text(v))
            .collect::<Vec<_>>()
            .join(","),
        Value::Array(items) => items.iter().map(plain_text).collect::<Vec<_>>().join(","),
    }
}
