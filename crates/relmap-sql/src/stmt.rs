mod add_foreign_key;
pub use add_foreign_key::AddForeignKey;

mod column_def;
pub use column_def::ColumnDef;

mod create_schema;

mod create_table;
pub use create_table::CreateTable;

mod foreign_key_def;
pub use foreign_key_def::ForeignKeyDef;

pub use relmap_core::stmt::*;

#[derive(Debug, Clone)]
pub enum Statement {
    AddForeignKey(AddForeignKey),
    CreateTable(CreateTable),
    Query(Query),
}

impl Statement {
    pub fn is_create_table(&self) -> bool {
        matches!(self, Statement::CreateTable(_))
    }

    pub fn is_add_foreign_key(&self) -> bool {
        matches!(self, Statement::AddForeignKey(_))
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
