//! The four schema-level operations: [`defaults`], [`parse`], [`serialize`]
//! and [`equals`].
//!
//! All of them are total. Query strings are user-editable, so every parse
//! failure is absorbed at the field it happened in: a scalar falls back to its
//! declared default (or absence), a multiple field falls back to the empty
//! sequence. Nothing is ever reported to the caller.

use tracing::{debug, warn};

use crate::field::Field;
use crate::query::{Multimap, QueryParams};
use crate::record::{FieldValue, Record};
use crate::schema::Schema;
use crate::types::Type;
use crate::value::Value;

/// Initial state of `schema`, and the baseline for default elision.
pub fn defaults(schema: &Schema) -> Record {
    schema
        .iter()
        .map(|(name, field)| (name, default_for(field)))
        .collect()
}

fn default_for(field: &Field) -> FieldValue {
    match field {
        Field::Scalar { default, .. } => FieldValue::Scalar(default.clone()),
        Field::Multiple { .. } => FieldValue::Multiple(Vec::new()),
    }
}

/// Decode `params` against `schema`. Keys the schema does not declare are
/// ignored.
pub fn parse<M: Multimap + ?Sized>(schema: &Schema, params: &M) -> Record {
    schema
        .iter()
        .map(|(name, field)| {
            let value = match field {
                Field::Multiple { ty } => parse_multiple(name, ty, params.get_all(name)),
                Field::Scalar { ty, default } => {
                    FieldValue::Scalar(parse_scalar(name, ty, default, params.get(name)))
                }
            };
            (name, value)
        })
        .collect()
}

fn parse_multiple(name: &str, ty: &Type, raw: Vec<&str>) -> FieldValue {
    let parsed = raw
        .iter()
        .map(|input| ty.parse(input))
        .collect::<Option<Vec<_>>>();
    match parsed {
        Some(values) => FieldValue::Multiple(values),
        None => {
            // One bad occurrence discards the whole list.
            debug!(field = name, inputs = ?raw, "unparseable occurrence, using empty sequence");
            FieldValue::Multiple(Vec::new())
        }
    }
}

fn parse_scalar(
    name: &str,
    ty: &Type,
    default: &Option<Value>,
    raw: Option<&str>,
) -> Option<Value> {
    let Some(input) = raw else {
        return default.clone();
    };
    match ty.parse(input) {
        Some(value) => Some(value),
        None => {
            debug!(field = name, input, "unparseable value, using default");
            default.clone()
        }
    }
}

/// Encode `record` into a fresh [`QueryParams`], eliding defaults.
pub fn serialize(schema: &Schema, record: &Record) -> QueryParams {
    let mut params = QueryParams::new();
    serialize_into(schema, record, &mut params);
    params
}

/// Write `record` into `params`, touching only keys whose value differs from
/// the field's default. Several schemas with distinct field names can share
/// one target this way.
pub fn serialize_into<M: Multimap + ?Sized>(schema: &Schema, record: &Record, params: &mut M) {
    for (name, field) in schema.iter() {
        let Some(value) = record.get(name) else {
            continue;
        };
        match (field, value) {
            (_, FieldValue::Scalar(None)) => {}
            (Field::Multiple { ty }, FieldValue::Multiple(values)) => {
                for value in values {
                    params.append(name, ty.serialize(value));
                }
            }
            (Field::Scalar { ty, default }, FieldValue::Scalar(Some(value))) => {
                let is_default = default
                    .as_ref()
                    .is_some_and(|default| ty.equals(value, default));
                if !is_default {
                    params.set(name, ty.serialize(value));
                }
            }
            (field, value) => {
                warn!(
                    field = name,
                    expected = field_kind(field),
                    found = value.kind(),
                    "record value does not match field cardinality, skipping"
                );
            }
        }
    }
}

/// True when every field of `schema` holds equal values in `left` and
/// `right`, compared with the field's own type.
pub fn equals(schema: &Schema, left: &Record, right: &Record) -> bool {
    schema.iter().all(|(name, field)| {
        let ty = field.ty();
        let left = normalized(field, left.get(name));
        let right = normalized(field, right.get(name));
        match (left, right) {
            (FieldValue::Scalar(None), FieldValue::Scalar(None)) => true,
            (FieldValue::Scalar(Some(a)), FieldValue::Scalar(Some(b))) => ty.equals(&a, &b),
            (FieldValue::Multiple(xs), FieldValue::Multiple(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(&ys).all(|(x, y)| ty.equals(x, y))
            }
            _ => false,
        }
    })
}

// A missing or mis-shaped entry reads as the field's empty state.
fn normalized(field: &Field, value: Option<&FieldValue>) -> FieldValue {
    match (field, value) {
        (Field::Scalar { .. }, Some(value @ FieldValue::Scalar(_)))
        | (Field::Multiple { .. }, Some(value @ FieldValue::Multiple(_))) => value.clone(),
        (Field::Scalar { .. }, _) => FieldValue::Scalar(None),
        (Field::Multiple { .. }, _) => FieldValue::Multiple(Vec::new()),
    }
}

fn field_kind(field: &Field) -> &'static str {
    match field {
        Field::Scalar { .. } => "scalar",
        Field::Multiple { .. } => "multiple",
    }
}
