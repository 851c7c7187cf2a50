use crate::schema::db::{ColumnId, JoinTableId, TableId};

/// How a single model field is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    /// The value lives in a column of the model's own table
    Column(ColumnId),

    /// A foreign key column on the model's own table referencing the
    /// target's table
    ForeignKey(ColumnId),

    /// Each element row carries a back-reference column pointing at the
    /// owner
    OneToMany { table: TableId, column: ColumnId },

    /// Owner/element pairs are stored in a join table
    ManyToMany(JoinTableId),
}

impl Field {
    /// The column storing the field on the model's own table, if any
    pub fn column(&self) -> Option<ColumnId> {
        match self {
            Self::Column(column) | Self::ForeignKey(column) => Some(*column),
            _ => None,
        }
    }
}
