use super::{Column, ColumnId, ForeignKey, Type};

use serde::Serialize;
use std::fmt;

/// A database table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,

    /// The single-column primary key
    pub primary_key: ColumnId,

    pub foreign_keys: Vec<ForeignKey>,

    /// Set on the topmost table of a polymorphic hierarchy
    pub discriminator: Option<ColumnId>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize)]
pub struct TableId(pub usize);

impl Table {
    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        assert_eq!(self.id, id.table);
        &self.columns[id.index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_column(&self) -> &Column {
        self.column(self.primary_key)
    }

    /// The foreign key declared on `column`, if any
    pub fn foreign_key(&self, column: ColumnId) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }

    /// The parent table, when this table stores a subclass
    pub fn parent(&self) -> Option<TableId> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.is_inheritance())
            .map(|fk| fk.target)
    }

    pub(crate) fn new(id: TableId, name: String) -> Self {
        Self {
            id,
            name,
            columns: vec![],
            primary_key: ColumnId { table: id, index: 0 },
            foreign_keys: vec![],
            discriminator: None,
        }
    }

    pub(crate) fn push_column(&mut self, name: String, ty: Type, nullable: bool) -> ColumnId {
        let id = ColumnId {
            table: self.id,
            index: self.columns.len(),
        };

        self.columns.push(Column {
            id,
            name,
            ty,
            nullable,
            primary_key: false,
            auto_increment: false,
        });

        id
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
