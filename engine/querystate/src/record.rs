use crate::error::{QueryStateError, QueryStateResult};
use crate::value::Value;

/// Decoded value of one field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// `None` is the absent marker of a scalar field without a default.
    Scalar(Option<Value>),
    Multiple(Vec<Value>),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Scalar(_) => "scalar",
            FieldValue::Multiple(_) => "multiple",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Scalar(None))
    }
}

/// Decoded state of a schema: field values in schema declaration order.
///
/// A record is a plain value. It holds no reference to the schema that
/// produced it, and the codec never mutates one it was handed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value in place.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_scalar(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, FieldValue::Scalar(Some(value.into())))
    }

    pub fn with_absent(self, name: impl Into<String>) -> Self {
        self.with(name, FieldValue::Scalar(None))
    }

    pub fn with_multiple<V: Into<Value>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.with(
            name,
            FieldValue::Multiple(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Scalar value of `name`, or `None` when missing, absent or multiple.
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match self.get(name) {
            Some(FieldValue::Scalar(value)) => value.as_ref(),
            _ => None,
        }
    }

    /// Sequence value of `name`; empty when missing or not a multiple field.
    pub fn multiple(&self, name: &str) -> &[Value] {
        match self.get(name) {
            Some(FieldValue::Multiple(values)) => values,
            _ => &[],
        }
    }

    /// Like [`Record::scalar`], but explains why no value is available.
    pub fn require_scalar(&self, name: &str) -> QueryStateResult<&Value> {
        match self.get(name) {
            None => Err(QueryStateError::MissingField(name.to_string())),
            Some(FieldValue::Scalar(Some(value))) => Ok(value),
            Some(FieldValue::Scalar(None)) => Err(QueryStateError::AbsentField(name.to_string())),
            Some(other) => Err(QueryStateError::FieldKind {
                field: name.to_string(),
                expected: "scalar",
                found: other.kind(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}
