use crate::types::Type;
use crate::value::Value;

/// One named slot of a [`Schema`](crate::Schema).
#[derive(Clone, Debug)]
pub enum Field {
    /// At most one query parameter. Without a default the decoded value may
    /// be absent; with one it is always present.
    Scalar { ty: Type, default: Option<Value> },
    /// Any number of repeated query parameters, decoded as a sequence.
    Multiple { ty: Type },
}

impl Field {
    pub fn ty(&self) -> &Type {
        match self {
            Field::Scalar { ty, .. } | Field::Multiple { ty } => ty,
        }
    }

    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Field::Scalar { default, .. } => default.as_ref(),
            Field::Multiple { .. } => None,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Field::Multiple { .. })
    }
}

pub fn scalar(ty: Type) -> Field {
    Field::Scalar { ty, default: None }
}

pub fn scalar_with_default(ty: Type, default: impl Into<Value>) -> Field {
    Field::Scalar {
        ty,
        default: Some(default.into()),
    }
}

pub fn multiple(ty: Type) -> Field {
    Field::Multiple { ty }
}
