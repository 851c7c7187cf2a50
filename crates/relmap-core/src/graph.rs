//! The input side: type descriptors supplied by an external discovery
//! mechanism, resolved into an in-memory graph of types, fields and
//! superclass edges.

mod descriptor;
pub use descriptor::{EnumDescriptor, FieldDeclaration, GraphDescriptor, TypeDescriptor};

mod ty_expr;
pub use ty_expr::{CollectionKind, Primitive, TyExpr};

mod type_graph;
pub use type_graph::{EnumDecl, EnumId, ExternalId, FieldDecl, Ty, TypeDecl, TypeGraph, TypeId};
