mod field;
pub use field::Field;

mod model;
pub use model::{Discriminator, Model};

use super::app::ModelId;
use indexmap::IndexMap;

/// Defines the correspondence between classified models and the tables,
/// columns and join tables that store them.
///
/// The mapping is constructed during schema building and is immutable
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    /// Per-model mappings indexed by model identifier.
    pub models: IndexMap<ModelId, Model>,
}

impl Mapping {
    /// Returns the mapping for the specified model.
    ///
    /// # Panics
    ///
    /// Panics if the model ID does not exist in the mapping.
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub(crate) fn model_mut(&mut self, id: impl Into<ModelId>) -> &mut Model {
        self.models.get_mut(&id.into()).expect("invalid model ID")
    }
}
