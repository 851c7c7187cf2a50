use super::Field;
use crate::schema::{
    app::ModelId,
    db::{ColumnId, TableId},
};

/// Maps a single model to its backing table.
#[derive(Debug, Clone)]
pub struct Model {
    /// The model this mapping applies to.
    pub id: ModelId,

    /// The table that stores the model's own fields.
    pub table: TableId,

    /// Per-field mappings, indexed by field index within the model.
    pub fields: Vec<Field>,

    /// Present on every model that belongs to a polymorphic hierarchy.
    pub discriminator: Option<Discriminator>,
}

/// Identifies the concrete type of a row in a polymorphic hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    /// The discriminator column on the hierarchy's root table
    pub column: ColumnId,

    /// The value stored for instances of exactly this model
    pub value: String,
}
