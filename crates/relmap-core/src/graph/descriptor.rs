use super::TyExpr;

use serde::{Deserialize, Serialize};

/// The complete set of type descriptors handed to the loader.
///
/// Usually deserialized from a TOML document:
///
/// ```toml
/// [[types]]
/// name = "Pose"
/// fields = [
///     { name = "position", ty = "Position" },
///     { name = "orientation", ty = "Optional[Orientation]" },
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,

    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,

    /// Opaque types that fields may reference but that are not mapped
    /// themselves. They are only storable through a custom type mapping.
    #[serde(default)]
    pub externals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,

    /// Direct superclasses in declaration order. Names that are not part of
    /// the graph are ignored.
    #[serde(default)]
    pub bases: Vec<String>,

    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,

    pub ty: TyExpr,

    /// Forces a collection of composites onto a join table.
    #[serde(default)]
    pub many_to_many: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,
    pub variants: Vec<String>,
}

impl GraphDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ty(mut self, ty: TypeDescriptor) -> Self {
        self.types.push(ty);
        self
    }

    pub fn enumeration(mut self, name: &str, variants: &[&str]) -> Self {
        self.enums.push(EnumDescriptor {
            name: name.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        });
        self
    }

    pub fn external(mut self, name: &str) -> Self {
        self.externals.push(name.to_string());
        self
    }
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: vec![],
            fields: vec![],
        }
    }

    pub fn base(mut self, name: impl Into<String>) -> Self {
        self.bases.push(name.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TyExpr>) -> Self {
        self.fields.push(FieldDeclaration {
            name: name.into(),
            ty: ty.into(),
            many_to_many: false,
        });
        self
    }

    pub fn many_to_many(mut self, name: impl Into<String>, ty: impl Into<TyExpr>) -> Self {
        self.fields.push(FieldDeclaration {
            name: name.into(),
            ty: ty.into(),
            many_to_many: true,
        });
        self
    }
}
