use super::Value;

use indexmap::IndexMap;
use std::sync::Arc;

/// An instance of a mapped type: the concrete type name and its field
/// values, including inherited fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub ty: String,
    pub fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}
