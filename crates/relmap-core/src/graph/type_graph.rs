use super::{CollectionKind, GraphDescriptor, Primitive, TyExpr};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::fmt;

/// The loaded type graph: every declared composite type, enum and external
/// type, with names resolved to identifiers.
///
/// Declaration order is preserved; identifiers are indices into the
/// declaration lists.
#[derive(Debug, Clone)]
pub struct TypeGraph {
    pub types: Vec<TypeDecl>,

    pub enums: Vec<EnumDecl>,

    pub externals: Vec<String>,

    lookup: IndexMap<String, Resolved>,
}

#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub id: TypeId,

    pub name: String,

    /// Mapped direct superclasses, in declaration order
    pub bases: Vec<TypeId>,

    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub ty: Ty,
    pub many_to_many: bool,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub id: EnumId,
    pub name: String,
    pub variants: Vec<String>,
}

/// A field type with names resolved against the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Primitive(Primitive),
    Composite(TypeId),
    Enum(EnumId),
    External(ExternalId),
    None,
    Optional(Box<Ty>),
    Collection(CollectionKind, Box<Ty>),
    Union(Vec<Ty>),
    TypeRef(TypeId),
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct EnumId(pub usize);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId(pub usize);

#[derive(Debug, Clone, Copy)]
enum Resolved {
    Type(TypeId),
    Enum(EnumId),
    External(ExternalId),
}

impl TypeGraph {
    /// Parses a TOML document into a [`GraphDescriptor`] and loads it.
    pub fn from_toml(src: &str) -> Result<Self> {
        let descriptor: GraphDescriptor = toml::from_str(src)?;
        Self::from_descriptor(descriptor)
    }

    pub fn from_descriptor(descriptor: GraphDescriptor) -> Result<Self> {
        let mut lookup = IndexMap::new();

        let mut declare = |name: &str, resolved: Resolved| {
            if lookup.insert(name.to_string(), resolved).is_some() {
                return Err(Error::invalid_type_graph(format!(
                    "`{name}` is declared more than once"
                )));
            }
            Ok(())
        };

        for (index, ty) in descriptor.types.iter().enumerate() {
            declare(&ty.name, Resolved::Type(TypeId(index)))?;
        }

        for (index, e) in descriptor.enums.iter().enumerate() {
            declare(&e.name, Resolved::Enum(EnumId(index)))?;
        }

        for (index, name) in descriptor.externals.iter().enumerate() {
            declare(name, Resolved::External(ExternalId(index)))?;
        }

        let mut graph = TypeGraph {
            types: Vec::with_capacity(descriptor.types.len()),
            enums: descriptor
                .enums
                .into_iter()
                .enumerate()
                .map(|(index, e)| EnumDecl {
                    id: EnumId(index),
                    name: e.name,
                    variants: e.variants,
                })
                .collect(),
            externals: descriptor.externals,
            lookup,
        };

        for (index, ty) in descriptor.types.into_iter().enumerate() {
            let mut bases = vec![];

            for base in &ty.bases {
                match graph.lookup.get(base) {
                    Some(Resolved::Type(id)) => bases.push(*id),
                    _ => log::debug!("{}: ignoring unmapped base `{base}`", ty.name),
                }
            }

            let fields = ty
                .fields
                .into_iter()
                .map(|field| {
                    let resolved = graph.resolve(&field.ty).map_err(|err| {
                        err.context(crate::err!("while loading {}.{}", ty.name, field.name))
                    })?;

                    Ok(FieldDecl {
                        name: field.name,
                        ty: resolved,
                        many_to_many: field.many_to_many,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            graph.types.push(TypeDecl {
                id: TypeId(index),
                name: ty.name,
                bases,
                fields,
            });
        }

        Ok(graph)
    }

    pub fn ty(&self, id: TypeId) -> &TypeDecl {
        &self.types[id.0]
    }

    pub fn enumeration(&self, id: EnumId) -> &EnumDecl {
        &self.enums[id.0]
    }

    pub fn external(&self, id: ExternalId) -> &str {
        &self.externals[id.0]
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeDecl> {
        match self.lookup.get(name)? {
            Resolved::Type(id) => Some(self.ty(*id)),
            _ => None,
        }
    }

    fn resolve(&self, ty: &TyExpr) -> Result<Ty> {
        Ok(match ty {
            TyExpr::Primitive(primitive) => Ty::Primitive(*primitive),
            TyExpr::Named(name) => match self.lookup.get(name) {
                Some(Resolved::Type(id)) => Ty::Composite(*id),
                Some(Resolved::Enum(id)) => Ty::Enum(*id),
                Some(Resolved::External(id)) => Ty::External(*id),
                None => {
                    return Err(Error::invalid_type_graph(format!(
                        "unknown type `{name}`"
                    )))
                }
            },
            TyExpr::None => Ty::None,
            TyExpr::Optional(inner) => Ty::Optional(Box::new(self.resolve(inner)?)),
            TyExpr::Collection(kind, element) => {
                Ty::Collection(*kind, Box::new(self.resolve(element)?))
            }
            TyExpr::Union(members) => Ty::Union(
                members
                    .iter()
                    .map(|member| self.resolve(member))
                    .collect::<Result<_>>()?,
            ),
            TyExpr::TypeRef(name) => match self.lookup.get(name) {
                Some(Resolved::Type(id)) => Ty::TypeRef(*id),
                _ => {
                    return Err(Error::invalid_type_graph(format!(
                        "`Type[{name}]` must reference a declared type"
                    )))
                }
            },
        })
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}

impl fmt::Debug for EnumId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EnumId({})", self.0)
    }
}

impl fmt::Debug for ExternalId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ExternalId({})", self.0)
    }
}
