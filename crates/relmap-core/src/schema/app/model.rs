use super::{Field, FieldId};
use crate::{graph::TypeId, schema::Name};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    /// The model's own fields. Fields inherited from the parent are not
    /// repeated here.
    pub fields: Vec<Field>,

    /// The mapped superclass, if any
    pub parent: Option<ModelId>,

    /// True for the topmost model of a hierarchy that has at least one
    /// subclass. Rows of such a model carry a discriminator.
    pub polymorphic: bool,
}

/// Uniquely identifies a model. Models share indices with the type graph
/// declarations they were classified from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    pub fn field(&self, id: impl Into<FieldId>) -> &Field {
        let id = id.into();
        assert_eq!(self.id, id.model);
        &self.fields[id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl ModelId {
    /// Create a `FieldId` representing the current model's field at index
    /// `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId { model: self, index }
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl From<TypeId> for ModelId {
    fn from(value: TypeId) -> Self {
        ModelId(value.0)
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
