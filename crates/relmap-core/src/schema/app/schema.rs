use super::{Field, FieldId, Model, ModelId};
use crate::graph::EnumDecl;

#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub models: Vec<Model>,

    /// Enumerations referenced by enum fields, indexed by `EnumId`
    pub enums: Vec<EnumDecl>,
}

impl Schema {
    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        &self.models[id.into().0]
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name.ident == name)
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> {
        self.models.iter()
    }

    /// Get a field by ID
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model).field(id)
    }

    /// The model followed by each of its ancestors, nearest first.
    pub fn ancestry(&self, id: impl Into<ModelId>) -> impl Iterator<Item = &Model> + '_ {
        let mut next = Some(id.into());

        std::iter::from_fn(move || {
            let model = self.model(next?);
            next = model.parent;
            Some(model)
        })
    }

    /// The topmost ancestor of a model
    pub fn root(&self, id: impl Into<ModelId>) -> &Model {
        let mut model = self.model(id);
        while let Some(parent) = model.parent {
            model = self.model(parent);
        }
        model
    }

    /// Direct subclasses of a model, in declaration order
    pub fn children(&self, id: impl Into<ModelId>) -> impl Iterator<Item = &Model> + '_ {
        let id = id.into();
        self.models
            .iter()
            .filter(move |model| model.parent == Some(id))
    }

    /// Returns true if `id` is `ancestor` or one of its subclasses.
    pub fn is_descendant(&self, id: impl Into<ModelId>, ancestor: impl Into<ModelId>) -> bool {
        let ancestor = ancestor.into();
        self.ancestry(id).any(|model| model.id == ancestor)
    }

    /// Resolves a field by name on a model or any of its ancestors.
    pub fn resolve_field(&self, id: impl Into<ModelId>, name: &str) -> Option<&Field> {
        self.ancestry(id)
            .find_map(|model| model.field_by_name(name))
    }
}
