/* Copyright (c) 2026 Olle Mårtensson. This Source Code Form is subject to the terms of the Eclipse Public License, v. 2.0. */
//! querystate: typed, schema-driven URL query-string codec.
//!
//! A [`Schema`] names the pieces of application state that live in the URL
//! (filters, sort order, map viewport). The codec turns a query string into a
//! [`Record`] of decoded values and back, eliding values equal to their
//! declared defaults so default state produces a parameter-free URL, and
//! degrading malformed input to defaults instead of failing.
//!
//! # Examples
//! ```
//! use querystate::types::{array, boolean, int, string};
//! use querystate::{defaults, equals, multiple, parse, scalar_with_default, schema, serialize};
//! use querystate::{QueryParams, Value};
//!
//! let filters = schema([
//!     ("q", scalar_with_default(string(), "")),
//!     ("attending", scalar_with_default(boolean(), false)),
//!     ("minDays", scalar_with_default(int(), 1)),
//!     ("tag", multiple(string())),
//!     ("ids", scalar_with_default(array(int(), ","), Value::Array(Vec::new()))),
//! ]);
//!
//! let record = parse(&filters, &QueryParams::parse("?q=furry&minDays=oops&tag=a&tag=b"));
//! assert_eq!(record.scalar("q"), Some(&Value::from("furry")));
//! assert_eq!(record.scalar("minDays"), Some(&Value::Int(1)));
//! assert!(!equals(&filters, &record, &defaults(&filters)));
//!
//! let query = serialize(&filters, &record).to_query_string();
//! assert_eq!(query, "q=furry&tag=a&tag=b");
//! assert!(serialize(&filters, &defaults(&filters)).is_empty());
//! ```

pub mod codec;
mod error;
pub mod field;
pub mod presets;
pub mod query;
pub mod record;
pub mod schema;
pub mod types;
pub mod value;

#[cfg(feature = "serde")]
pub mod serde_support;

pub use codec::{defaults, equals, parse, serialize, serialize_into};
pub use error::{QueryStateError, QueryStateResult};
pub use field::{multiple, scalar, scalar_with_default, Field};
pub use presets::Preset;
pub use query::{Multimap, QueryParams};
pub use record::{FieldValue, Record};
pub use schema::{schema, Schema};
pub use types::{QueryType, Type};
pub use value::Value;

#[cfg(feature = "serde")]
pub use serde_support::{from_record, to_record};
