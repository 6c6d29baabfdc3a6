use std::fmt::{self, Display, Formatter};

use ordered_float::OrderedFloat;

/// The decoded value model shared by every type descriptor.
///
/// A value never encodes "absent"; absence lives one level up, in
/// [`FieldValue`](crate::FieldValue), as an `Option`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    String(String),
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    /// Named positional components, in the order the tuple type declares them.
    Tuple(Vec<(String, Value)>),
    Array(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Tuple(_) => "tuple",
            Value::Array(_) => "array",
        }
    }

    /// Build a tuple value from `(name, value)` pairs.
    pub fn tuple<K, V>(components: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Tuple(
            components
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a tuple component by name.
    pub fn tuple_component(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Tuple(components) => components
                .iter()
                .find(|(component, _)| component == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(OrderedFloat(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

// Debug-oriented rendering; query-string text always goes through a type's
// `serialize`.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{}", x.0),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Tuple(components) => {
                f.write_str("(")?;
                for (idx, (name, value)) in components.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str(")")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (idx, value) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_only_their_kind() {
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::from("3").as_int(), None);
        assert_eq!(Value::from(1.5).as_float(), Some(1.5));
        assert_eq!(Value::Int(1).as_float(), None);
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from("true").as_bool(), None);
        assert_eq!(Value::from("eu").as_str(), Some("eu"));

        let list = Value::array(["EU", "NA"]);
        assert_eq!(
            list.as_array(),
            Some(&[Value::from("EU"), Value::from("NA")][..])
        );
        assert_eq!(Value::from(false).as_array(), None);
    }

    #[test]
    fn tuple_components_are_found_by_name() {
        let center = Value::tuple([("lat", 1.5), ("lng", -2.0)]);
        assert_eq!(center.tuple_component("lng").and_then(Value::as_float), Some(-2.0));
        assert_eq!(center.tuple_component("zoom"), None);
        assert_eq!(center.to_string(), "(lat=1.5, lng=-2)");
    }
}
