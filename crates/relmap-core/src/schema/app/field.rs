use super::ModelId;
use crate::graph::{CollectionKind, EnumId, Primitive};
use crate::schema::db;

use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name as declared
    pub name: String,

    /// What the field holds
    pub ty: FieldTy,

    /// True when the declared type admits the absent value
    pub nullable: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldTy {
    /// A single primitive value
    Scalar(Primitive),

    /// One variant of a declared enumeration, stored by name
    Enum(EnumId),

    /// Holds a mapped type itself, stored by name
    TypeRef(ModelId),

    /// A type with a user-supplied storage mapping
    Custom(Custom),

    /// A single reference to another mapped type
    NestedOne(ModelId),

    /// A collection of mapped types declared as shared between owners
    NestedMany(CollectionOfComposite),

    /// A collection of primitives or enum variants
    CollectionOfScalar(CollectionOfScalar),

    /// A collection of mapped types
    CollectionOfComposite(CollectionOfComposite),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Custom {
    /// Declared name of the mapped type
    pub type_name: String,

    /// Column type used to store it
    pub storage_ty: db::Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOfScalar {
    pub collection: CollectionKind,
    pub element: ScalarElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarElement {
    Primitive(Primitive),
    Enum(EnumId),

    /// A type with a user-supplied storage mapping, stored inside the
    /// collection's JSON value
    Custom(Custom),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOfComposite {
    pub collection: CollectionKind,
    pub target: ModelId,
}

/// The classification tag of a field, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    OptionalScalar,
    Enum,
    NestedOne,
    NestedMany,
    CollectionOfScalar,
    CollectionOfComposite,
    TypeReference,
    Custom,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match &self.ty {
            FieldTy::Scalar(_) if self.nullable => FieldKind::OptionalScalar,
            FieldTy::Scalar(_) => FieldKind::Scalar,
            FieldTy::Enum(_) => FieldKind::Enum,
            FieldTy::TypeRef(_) => FieldKind::TypeReference,
            FieldTy::Custom(_) => FieldKind::Custom,
            FieldTy::NestedOne(_) => FieldKind::NestedOne,
            FieldTy::NestedMany(_) => FieldKind::NestedMany,
            FieldTy::CollectionOfScalar(_) => FieldKind::CollectionOfScalar,
            FieldTy::CollectionOfComposite(_) => FieldKind::CollectionOfComposite,
        }
    }

    /// The model this field points at, for relationship fields.
    pub fn target(&self) -> Option<ModelId> {
        match &self.ty {
            FieldTy::NestedOne(target) => Some(*target),
            FieldTy::NestedMany(rel) | FieldTy::CollectionOfComposite(rel) => Some(rel.target),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.target().is_some()
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self.ty,
            FieldTy::NestedMany(_)
                | FieldTy::CollectionOfScalar(_)
                | FieldTy::CollectionOfComposite(_)
        )
    }
}

impl From<&Self> for FieldId {
    fn from(val: &Self) -> Self {
        *val
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
