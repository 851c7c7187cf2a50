use crate::graph::Primitive;

use serde::{Deserialize, Serialize};

/// Storage type of a column.
///
/// These are portable types; each SQL flavor renders them with its own
/// keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Boolean,

    /// A signed 64-bit integer. Primary and foreign keys use this type.
    Integer,

    Float,

    Text,

    DateTime,

    /// A collection of scalars encoded as a single document
    Json,

    /// An enumeration stored by variant name
    Enum { name: String, variants: Vec<String> },
}

impl Type {
    pub fn from_primitive(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Bool => Self::Boolean,
            Primitive::Int => Self::Integer,
            Primitive::Float => Self::Float,
            Primitive::String => Self::Text,
            Primitive::DateTime => Self::DateTime,
        }
    }
}
