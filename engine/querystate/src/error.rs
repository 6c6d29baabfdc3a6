use thiserror::Error;

/// Result alias used across the crate.
pub type QueryStateResult<T> = Result<T, QueryStateError>;

/// Errors surfaced by the helpers around the codec.
///
/// The codec operations themselves (`defaults`, `parse`, `serialize`,
/// `equals`) are total and never produce these.
#[derive(Debug, Error)]
pub enum QueryStateError {
    #[error("unknown preset schema: {0}")]
    UnknownPreset(String),
    #[error("field `{0}` is not declared by the record")]
    MissingField(String),
    #[error("field `{field}` holds a {found} value, expected {expected}")]
    FieldKind {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("field `{0}` is absent")]
    AbsentField(String),
    #[error("serde conversion error: {0}")]
    Serde(String),
}
