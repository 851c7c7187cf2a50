use super::{
    CollectionOfComposite, CollectionOfScalar, Custom, Field, FieldId, FieldTy, Model, ModelId,
    ScalarElement, Schema,
};
use crate::graph::{CollectionKind, TypeDecl, TypeGraph, TypeId};
use crate::graph::{FieldDecl, Ty};
use crate::schema::{builder::hierarchy, db, Name};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashSet;

/// Decides, once per field, how each declared field is persisted.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    graph: &'a TypeGraph,

    /// Fields whose name starts with this prefix are not persisted
    private_prefix: String,

    /// Storage types for external or composite types handled by the caller
    type_mappings: IndexMap<String, db::Type>,
}

impl<'a> Classifier<'a> {
    pub fn new(graph: &'a TypeGraph) -> Self {
        Self {
            graph,
            private_prefix: "_".to_string(),
            type_mappings: IndexMap::new(),
        }
    }

    pub fn private_prefix(&mut self, prefix: &str) -> &mut Self {
        self.private_prefix = prefix.to_string();
        self
    }

    pub fn type_mapping(&mut self, name: &str, storage_ty: db::Type) -> &mut Self {
        self.type_mappings.insert(name.to_string(), storage_ty);
        self
    }

    pub(crate) fn type_mappings(&mut self, mappings: &IndexMap<String, db::Type>) -> &mut Self {
        self.type_mappings
            .extend(mappings.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Classifies every declared type into a model.
    pub fn classify_all(&self) -> Result<Schema> {
        for decl in &self.graph.types {
            self.parent(decl)?;
        }

        hierarchy::check_acyclic(self.graph)?;

        let mut models = Vec::with_capacity(self.graph.types.len());

        for decl in &self.graph.types {
            models.push(Model {
                id: decl.id.into(),
                name: Name::new(&decl.name),
                fields: self.classify(decl.id)?,
                parent: self.parent(decl)?.map(ModelId::from),
                polymorphic: false,
            });
        }

        for index in 0..models.len() {
            let id = models[index].id;
            models[index].polymorphic =
                models[index].parent.is_none() && models.iter().any(|m| m.parent == Some(id));
        }

        Ok(Schema {
            models,
            enums: self.graph.enums.clone(),
        })
    }

    /// Classifies the persisted fields declared directly on a type.
    ///
    /// Private fields and fields redeclared from an ancestor are skipped.
    pub fn classify(&self, id: TypeId) -> Result<Vec<Field>> {
        let decl = self.graph.ty(id);
        let inherited = self.inherited_field_names(decl);
        let mut fields = vec![];

        for field in &decl.fields {
            if field.name.starts_with(&self.private_prefix) {
                log::debug!("{}.{}: private field is not persisted", decl.name, field.name);
                continue;
            }

            if inherited.contains(field.name.as_str()) {
                log::debug!("{}.{}: inherited field is not remapped", decl.name, field.name);
                continue;
            }

            let (ty, nullable) = self.classify_field(decl, field)?;

            fields.push(Field {
                id: FieldId {
                    model: id.into(),
                    index: fields.len(),
                },
                name: field.name.clone(),
                ty,
                nullable,
            });
        }

        Ok(fields)
    }

    fn parent(&self, decl: &TypeDecl) -> Result<Option<TypeId>> {
        match &decl.bases[..] {
            [] => Ok(None),
            [base] => Ok(Some(*base)),
            _ => Err(Error::unsupported_field_shape(
                &decl.name,
                None,
                "more than one mapped superclass",
            )),
        }
    }

    fn inherited_field_names(&self, decl: &TypeDecl) -> HashSet<&'a str> {
        let mut names = HashSet::new();
        let mut seen = HashSet::from([decl.id]);
        let mut next = decl.bases.first().copied();

        while let Some(id) = next {
            if !seen.insert(id) {
                break;
            }

            let ancestor = self.graph.ty(id);
            names.extend(ancestor.fields.iter().map(|field| field.name.as_str()));
            next = ancestor.bases.first().copied();
        }

        names
    }

    fn classify_field(&self, decl: &TypeDecl, field: &FieldDecl) -> Result<(FieldTy, bool)> {
        let shape_error =
            |reason: &str| Error::unsupported_field_shape(&decl.name, Some(field.name.as_str()), reason);

        let (ty, nullable) = match &field.ty {
            Ty::Optional(inner) => (&**inner, true),
            ty => (ty, false),
        };

        if field.many_to_many && !matches!(ty, Ty::Collection(..)) {
            return Err(shape_error(
                "only collections of mapped types can be declared many-to-many",
            ));
        }

        let classified = match ty {
            Ty::Primitive(primitive) => FieldTy::Scalar(*primitive),
            Ty::Enum(id) => FieldTy::Enum(*id),
            Ty::TypeRef(id) => FieldTy::TypeRef((*id).into()),
            Ty::Composite(id) => match self.custom(&self.graph.ty(*id).name) {
                Some(custom) => FieldTy::Custom(custom),
                None => FieldTy::NestedOne((*id).into()),
            },
            Ty::External(id) => {
                let name = self.graph.external(*id);
                match self.custom(name) {
                    Some(custom) => FieldTy::Custom(custom),
                    None => {
                        return Err(shape_error(&format!(
                            "no type mapping registered for external type `{name}`"
                        )))
                    }
                }
            }
            Ty::Collection(kind, element) => {
                if nullable {
                    return Err(shape_error(
                        "collections cannot be optional; use an empty collection",
                    ));
                }

                self.classify_collection(*kind, element, field.many_to_many)
                    .map_err(shape_error)?
            }
            Ty::Union(_) => {
                return Err(shape_error(
                    "union of distinct types; declare a common superclass instead",
                ))
            }
            Ty::None => return Err(shape_error("field can only hold the absent value")),
            Ty::Optional(_) => return Err(shape_error("nested optional")),
        };

        Ok((classified, nullable))
    }

    fn classify_collection(
        &self,
        collection: CollectionKind,
        element: &Ty,
        many_to_many: bool,
    ) -> core::result::Result<FieldTy, &'static str> {
        let scalar = |element| {
            if many_to_many {
                return Err("only collections of mapped types can be declared many-to-many");
            }

            Ok(FieldTy::CollectionOfScalar(CollectionOfScalar {
                collection,
                element,
            }))
        };

        match element {
            Ty::Primitive(primitive) => scalar(ScalarElement::Primitive(*primitive)),
            Ty::Enum(id) => scalar(ScalarElement::Enum(*id)),
            Ty::Composite(id) => {
                if let Some(custom) = self.custom(&self.graph.ty(*id).name) {
                    return scalar(ScalarElement::Custom(custom));
                }

                let rel = CollectionOfComposite {
                    collection,
                    target: (*id).into(),
                };

                Ok(if many_to_many {
                    FieldTy::NestedMany(rel)
                } else {
                    FieldTy::CollectionOfComposite(rel)
                })
            }
            Ty::Collection(..) => Err("nested collection"),
            Ty::Optional(_) | Ty::None => Err("collection of optional elements"),
            Ty::Union(_) => Err("collection of a union of distinct types"),
            Ty::TypeRef(_) => Err("collection of type references"),
            Ty::External(id) => match self.custom(self.graph.external(*id)) {
                Some(custom) => scalar(ScalarElement::Custom(custom)),
                None => Err("collection of an external type without a type mapping"),
            },
        }
    }

    fn custom(&self, name: &str) -> Option<Custom> {
        let storage_ty = self.type_mappings.get(name)?;

        Some(Custom {
            type_name: name.to_string(),
            storage_ty: storage_ty.clone(),
        })
    }
}
