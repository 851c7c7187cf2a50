use super::{ColumnId, TableId};

use serde::Serialize;

/// A column whose value must match the primary key of another table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignKey {
    /// The referencing column, on the table that owns this foreign key
    pub column: ColumnId,

    /// The referenced table. Foreign keys always reference the primary key.
    pub target: TableId,

    pub kind: ForeignKeyKind,

    /// Set when the constraint could not be satisfied by table ordering and
    /// must be established after all tables exist.
    pub deferred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyKind {
    /// A subclass table's primary key referencing its parent's primary key
    Inheritance,

    /// A nested one-to-one reference
    Reference,

    /// A one-to-many back-reference from a child row to its owner
    BackReference,
}

impl ForeignKey {
    pub fn is_inheritance(&self) -> bool {
        self.kind == ForeignKeyKind::Inheritance
    }
}
