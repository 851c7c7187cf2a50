use super::{Column, ColumnId, JoinTable, JoinTableId, Table, TableId};

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    /// All tables in the schema, in declaration order
    pub tables: Vec<Table>,

    pub join_tables: Vec<JoinTable>,

    /// Every table and join table, ordered so that each one follows the
    /// tables its non-deferred foreign keys reference
    pub order: Vec<TableRef>,
}

/// Either kind of table in the emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRef {
    Table(TableId),
    JoinTable(JoinTableId),
}

impl Schema {
    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table).column(id)
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn join_table(&self, id: JoinTableId) -> &JoinTable {
        &self.join_tables[id.0]
    }

    pub fn join_table_by_name(&self, name: &str) -> Option<&JoinTable> {
        self.join_tables.iter().find(|table| table.name == name)
    }

    pub fn name_of(&self, table: TableRef) -> &str {
        match table {
            TableRef::Table(id) => &self.table(id).name,
            TableRef::JoinTable(id) => &self.join_table(id).name,
        }
    }

    /// Table names in emission order
    pub fn emission_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|table| self.name_of(*table))
    }
}
