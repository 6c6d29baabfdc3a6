//! Type descriptors: the parse / serialize / equals capability bundle for one
//! kind of query-string value.
//!
//! Primitives live in [`primitive`], combinators that build new descriptors
//! out of existing ones live in [`composite`]. Both hand out [`Type`] handles,
//! so combinators nest freely (an array of enumerations, a tuple of floats)
//! without the codec engine knowing the concrete shape.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::value::Value;

pub mod composite;
pub mod primitive;

pub use composite::{array, enumeration, literal, one_of, tuple};
pub use primitive::{boolean, float, int, string};

/// Capability contract every type descriptor implements.
///
/// `parse` returns `None` for unparseable input; it must never panic.
/// `serialize` is total: a value of an unexpected shape still renders to
/// some text. `equals` must be reflexive and symmetric, and must hold between
/// a value and `parse(serialize(value))` whenever that parse succeeds.
pub trait QueryType: Debug + Send + Sync {
    fn parse(&self, input: &str) -> Option<Value>;

    fn serialize(&self, value: &Value) -> String;

    fn equals(&self, left: &Value, right: &Value) -> bool;

    /// Human-readable signature, e.g. `array<int> by ","`.
    fn describe(&self) -> String;
}

/// Shared handle to a type descriptor.
#[derive(Clone)]
pub struct Type(Arc<dyn QueryType>);

impl Type {
    pub fn new(ty: impl QueryType + 'static) -> Self {
        Self(Arc::new(ty))
    }

    pub fn parse(&self, input: &str) -> Option<Value> {
        self.0.parse(input)
    }

    pub fn serialize(&self, value: &Value) -> String {
        self.0.serialize(value)
    }

    pub fn equals(&self, left: &Value, right: &Value) -> bool {
        self.0.equals(left, right)
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }
}

impl Debug for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Split on `separator`; an empty separator never splits.
pub(crate) fn split_parts<'a>(input: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        vec![input]
    } else {
        input.split(separator).collect()
    }
}
