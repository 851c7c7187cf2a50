pub mod app;

pub(crate) mod builder;
pub use builder::Builder;

pub mod db;

mod handle;
pub use handle::SchemaHandle;

pub mod mapping;
use mapping::Mapping;

mod name;
pub use name::Name;

mod verify;

use crate::{Error, Result, TypeGraph};
use app::ModelId;
use db::{Table, TableId};
use std::sync::Arc;

#[derive(Debug)]
pub struct Schema {
    /// Classified models
    pub app: app::Schema,

    /// Database-level schema
    pub db: Arc<db::Schema>,

    /// Maps the models to the tables that store them
    pub mapping: Mapping,

    /// Recoverable problems found while mapping, such as relationship
    /// ambiguities that fell back to a join table
    pub warnings: Vec<Error>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Maps a type graph using the default options.
    pub fn from_graph(graph: &TypeGraph) -> Result<Schema> {
        Builder::default().build(graph)
    }

    pub fn mapping_for(&self, id: impl Into<ModelId>) -> &mapping::Model {
        self.mapping.model(id)
    }

    pub fn table_for(&self, id: impl Into<ModelId>) -> &Table {
        self.db.table(self.table_id_for(id))
    }

    pub fn table_id_for(&self, id: impl Into<ModelId>) -> TableId {
        self.mapping.model(id).table
    }

    /// Looks up a model by its declared type name.
    pub fn model_by_name(&self, name: &str) -> Result<&app::Model> {
        self.app
            .model_by_name(name)
            .ok_or_else(|| crate::err!("type `{name}` is not mapped"))
    }
}
