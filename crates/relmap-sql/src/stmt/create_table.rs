use super::*;

use relmap_core::schema::db::{self, JoinTable, Table};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Primary key columns
    pub primary_key: Vec<String>,

    pub foreign_keys: Vec<ForeignKeyDef>,
}

impl CreateTable {
    pub fn from_table(schema: &db::Schema, table: &Table) -> CreateTable {
        CreateTable {
            name: table.name.clone(),
            columns: table.columns.iter().map(ColumnDef::from_schema).collect(),
            primary_key: vec![table.primary_key_column().name.clone()],
            foreign_keys: table
                .foreign_keys
                .iter()
                .map(|fk| ForeignKeyDef::from_schema(schema, fk))
                .collect(),
        }
    }

    /// Join tables are keyed on both columns, each referencing the primary
    /// key of its side of the relationship.
    pub fn from_join_table(schema: &db::Schema, join_table: &JoinTable) -> CreateTable {
        CreateTable {
            name: join_table.name.clone(),
            columns: join_table
                .columns
                .iter()
                .map(|column| ColumnDef {
                    name: column.name.clone(),
                    ty: column.ty.clone(),
                    not_null: true,
                    auto_increment: false,
                })
                .collect(),
            primary_key: join_table
                .columns
                .iter()
                .map(|column| column.name.clone())
                .collect(),
            foreign_keys: join_table
                .columns
                .iter()
                .map(|column| {
                    let target = schema.table(column.target);

                    ForeignKeyDef {
                        column: column.name.clone(),
                        references: target.name.clone(),
                        references_column: target.primary_key_column().name.clone(),
                        deferrable: false,
                    }
                })
                .collect(),
        }
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
