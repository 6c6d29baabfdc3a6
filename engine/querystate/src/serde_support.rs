//! Bridge between records and typed Rust structs, through `serde_json`.
//!
//! A struct mirrors a schema field by field: scalars without a default map to
//! `Option<T>`, multiple fields to `Vec<T>`, tuples to nested structs whose
//! field names match the tuple components.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};

use crate::error::{QueryStateError, QueryStateResult};
use crate::field::Field;
use crate::record::{FieldValue, Record};
use crate::schema::Schema;
use crate::types::primitive::format_float;
use crate::types::Type;
use crate::value::Value;

impl Value {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Int(n) => JsonValue::Number((*n).into()),
            // Non-finite floats have no JSON number form.
            Value::Float(f) => Number::from_f64(f.0)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(format_float(f.0))),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Tuple(components) => JsonValue::Object(
                components
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    /// Structural conversion; `null` anywhere yields `None`.
    pub fn from_json(json: &JsonValue) -> Option<Value> {
        match json {
            JsonValue::Null => None,
            JsonValue::Bool(b) => Some(Value::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Some(Value::Int(i)),
                None => n.as_f64().map(Value::from),
            },
            JsonValue::String(s) => Some(Value::String(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            JsonValue::Object(entries) => entries
                .iter()
                .map(|(name, value)| Value::from_json(value).map(|v| (name.clone(), v)))
                .collect::<Option<Vec<_>>>()
                .map(Value::Tuple),
        }
    }
}

impl Record {
    /// JSON object keyed by field name; absent scalars become `null`.
    pub fn to_json(&self) -> JsonValue {
        let mut out = Map::new();
        for (name, value) in self.iter() {
            let json = match value {
                FieldValue::Scalar(None) => JsonValue::Null,
                FieldValue::Scalar(Some(value)) => value.to_json(),
                FieldValue::Multiple(values) => {
                    JsonValue::Array(values.iter().map(Value::to_json).collect())
                }
            };
            out.insert(name.to_string(), json);
        }
        JsonValue::Object(out)
    }

    /// Build a record for `schema` from a JSON object. Missing keys and
    /// `null` take the field's default state; every value must come back
    /// unchanged from its type's text form.
    pub fn from_json(schema: &Schema, json: &JsonValue) -> QueryStateResult<Record> {
        let JsonValue::Object(entries) = json else {
            return Err(QueryStateError::Serde("expected a JSON object".into()));
        };
        let mut record = Record::new();
        for (name, field) in schema.iter() {
            let json = entries.get(name).unwrap_or(&JsonValue::Null);
            let value = match field {
                Field::Scalar { ty, default } => match json {
                    JsonValue::Null => FieldValue::Scalar(default.clone()),
                    json => FieldValue::Scalar(Some(coerce(name, ty, json)?)),
                },
                Field::Multiple { ty } => match json {
                    JsonValue::Null => FieldValue::Multiple(Vec::new()),
                    JsonValue::Array(items) => FieldValue::Multiple(
                        items
                            .iter()
                            .map(|item| coerce(name, ty, item))
                            .collect::<QueryStateResult<Vec<_>>>()?,
                    ),
                    other => {
                        return Err(QueryStateError::Serde(format!(
                            "field `{name}` expects an array, found {other}"
                        )))
                    }
                },
            };
            record.set(name, value);
        }
        Ok(record)
    }
}

// Route the value through the type's text form so JSON numbers land on the
// right kind (a float field given `1` decodes to `1.0`), then reject anything
// the type narrowed or replaced on the way.
fn coerce(name: &str, ty: &Type, json: &JsonValue) -> QueryStateResult<Value> {
    Value::from_json(json)
        .and_then(|value| ty.parse(&ty.serialize(&value)))
        .filter(|parsed| same_json(parsed, json))
        .ok_or_else(|| {
            QueryStateError::Serde(format!("field `{name}`: {json} does not fit {ty}"))
        })
}

fn same_json(value: &Value, json: &JsonValue) -> bool {
    match (value, json) {
        (Value::String(a), JsonValue::String(b)) => a == b,
        (Value::Bool(a), JsonValue::Bool(b)) => a == b,
        (Value::Int(a), JsonValue::Number(b)) => match b.as_i64() {
            Some(b) => b == *a,
            None => b.as_f64() == Some(*a as f64),
        },
        (Value::Float(a), JsonValue::Number(b)) => b.as_f64() == Some(a.0),
        (Value::Float(a), JsonValue::String(b)) => !a.0.is_finite() && format_float(a.0) == *b,
        (Value::Tuple(components), JsonValue::Object(entries)) => {
            components.len() == entries.len()
                && components.iter().all(|(name, component)| {
                    entries
                        .get(name)
                        .is_some_and(|entry| same_json(component, entry))
                })
        }
        (Value::Array(items), JsonValue::Array(entries)) => {
            items.len() == entries.len()
                && items
                    .iter()
                    .zip(entries)
                    .all(|(item, entry)| same_json(item, entry))
        }
        _ => false,
    }
}

/// Decode a record into a typed struct.
pub fn from_record<T: DeserializeOwned>(record: &Record) -> QueryStateResult<T> {
    serde_json::from_value(record.to_json()).map_err(|err| QueryStateError::Serde(err.to_string()))
}

/// Encode a typed struct into a record for `schema`.
pub fn to_record<T: Serialize + ?Sized>(schema: &Schema, value: &T) -> QueryStateResult<Record> {
    let json =
        serde_json::to_value(value).map_err(|err| QueryStateError::Serde(err.to_string()))?;
    Record::from_json(schema, &json)
}
