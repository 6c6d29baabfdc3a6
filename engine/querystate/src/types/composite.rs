//! Combinators that decorate existing descriptors while keeping the
//! [`QueryType`] contract intact.

use super::{primitive, split_parts, QueryType, Type};
use crate::value::Value;

/// Fixed-arity positional composite with named components.
#[derive(Debug)]
pub struct TupleType {
    components: Vec<(String, Type)>,
    separator: String,
}

/// Variable-length homogeneous sequence packed into one parameter value.
#[derive(Debug)]
pub struct ArrayType {
    element: Type,
    separator: String,
}

/// Accepts exactly one value of the base type.
#[derive(Debug)]
pub struct LiteralType {
    base: Type,
    value: Value,
}

/// Accepts a finite allow-set of values of the base type.
#[derive(Debug)]
pub struct EnumType {
    base: Type,
    values: Vec<Value>,
}

pub fn tuple<K: Into<String>>(
    components: impl IntoIterator<Item = (K, Type)>,
    separator: impl Into<String>,
) -> Type {
    Type::new(TupleType {
        components: components
            .into_iter()
            .map(|(name, ty)| (name.into(), ty))
            .collect(),
        separator: separator.into(),
    })
}

pub fn array(element: Type, separator: impl Into<String>) -> Type {
    Type::new(ArrayType {
        element,
        separator: separator.into(),
    })
}

pub fn literal(base: Type, value: impl Into<Value>) -> Type {
    Type::new(LiteralType {
        base,
        value: value.into(),
    })
}

pub fn enumeration<V: Into<Value>>(base: Type, values: impl IntoIterator<Item = V>) -> Type {
    Type::new(EnumType {
        base,
        values: values.into_iter().map(Into::into).collect(),
    })
}

/// String enumeration shorthand.
pub fn one_of<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Type {
    enumeration(
        primitive::string(),
        values.into_iter().map(|s| Value::from(s.as_ref())),
    )
}

impl QueryType for TupleType {
    fn parse(&self, input: &str) -> Option<Value> {
        let parts = split_parts(input, &self.separator);
        if parts.len() != self.components.len() {
            return None;
        }
        let mut parsed = Vec::with_capacity(parts.len());
        for ((name, ty), part) in self.components.iter().zip(parts) {
            parsed.push((name.clone(), ty.parse(part)?));
        }
        Some(Value::Tuple(parsed))
    }

    fn serialize(&self, value: &Value) -> String {
        self.components
            .iter()
            .map(|(name, ty)| {
                value
                    .tuple_component(name)
                    .map(|component| ty.serialize(component))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(self.separator.as_str())
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        self.components.iter().all(|(name, ty)| {
            match (left.tuple_component(name), right.tuple_component(name)) {
                (Some(a), Some(b)) => ty.equals(a, b),
                (None, None) => true,
                _ => false,
            }
        })
    }

    fn describe(&self) -> String {
        let components = self
            .components
            .iter()
            .map(|(name, ty)| format!("{name}: {}", ty.describe()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("tuple{{{components}}} by {:?}", self.separator)
    }
}

impl QueryType for ArrayType {
    fn parse(&self, input: &str) -> Option<Value> {
        // Present-but-empty is an empty sequence, never a failure.
        if input.is_empty() {
            return Some(Value::Array(Vec::new()));
        }
        split_parts(input, &self.separator)
            .into_iter()
            .map(|part| self.element.parse(part))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }

    fn serialize(&self, value: &Value) -> String {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.element.serialize(item))
                .collect::<Vec<_>>()
                .join(self.separator.as_str()),
            single => self.element.serialize(single),
        }
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Array(xs), Value::Array(ys)) => {
                xs.len() == ys.len()
                    && xs.iter().zip(ys).all(|(x, y)| self.element.equals(x, y))
            }
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!("array<{}> by {:?}", self.element.describe(), self.separator)
    }
}

impl QueryType for LiteralType {
    fn parse(&self, input: &str) -> Option<Value> {
        self.base
            .parse(input)
            .filter(|parsed| self.base.equals(parsed, &self.value))
    }

    fn serialize(&self, _value: &Value) -> String {
        self.base.serialize(&self.value)
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        self.base.equals(left, right)
    }

    fn describe(&self) -> String {
        format!(
            "literal<{}> {}",
            self.base.describe(),
            self.base.serialize(&self.value)
        )
    }
}

impl QueryType for EnumType {
    fn parse(&self, input: &str) -> Option<Value> {
        self.base.parse(input).filter(|parsed| {
            self.values
                .iter()
                .any(|allowed| self.base.equals(parsed, allowed))
        })
    }

    fn serialize(&self, value: &Value) -> String {
        self.base.serialize(value)
    }

    fn equals(&self, left: &Value, right: &Value) -> bool {
        self.base.equals(left, right)
    }

    fn describe(&self) -> String {
        let values = self
            .values
            .iter()
            .map(|value| self.base.serialize(value))
            .collect::<Vec<_>>()
            .join("|");
        format!("enum<{}> {values}", self.base.describe())
    }
}
