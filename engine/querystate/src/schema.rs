use std::fmt::{self, Display, Formatter};

use crate::field::Field;

/// Ordered mapping from field name to [`Field`].
///
/// Declaration order is the canonical order for serialization. A schema owns
/// no state; the codec operations in [`crate::codec`] take it by reference.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<(String, Field)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Re-declaring a name replaces the earlier descriptor in
    /// place, keeping its position.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = field,
            None => self.fields.push((name, field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, field)| field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Group `(name, field)` pairs into a schema.
pub fn schema<K: Into<String>>(fields: impl IntoIterator<Item = (K, Field)>) -> Schema {
    let mut out = Schema::new();
    for (name, field) in fields {
        out.insert(name, field);
    }
    out
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, field) in self.iter() {
            match field {
                Field::Scalar { ty, default: None } => writeln!(f, "{name}: {ty}")?,
                Field::Scalar {
                    ty,
                    default: Some(default),
                } => writeln!(f, "{name}: {ty} = {}", ty.serialize(default))?,
                Field::Multiple { ty } => writeln!(f, "{name}: multiple {ty}")?,
            }
        }
        Ok(())
    }
}
