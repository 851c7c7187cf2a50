use relmap_core::schema::db::{self, ForeignKey};

/// A `FOREIGN KEY (..) REFERENCES ..` clause
#[derive(Debug, Clone)]
pub struct ForeignKeyDef {
    pub column: String,

    /// Name of the referenced table
    pub references: String,

    pub references_column: String,

    /// Check the constraint at commit rather than per statement
    pub deferrable: bool,
}

impl ForeignKeyDef {
    pub(crate) fn from_schema(schema: &db::Schema, fk: &ForeignKey) -> ForeignKeyDef {
        let target = schema.table(fk.target);

        ForeignKeyDef {
            column: schema.column(fk.column).name.clone(),
            references: target.name.clone(),
            references_column: target.primary_key_column().name.clone(),
            deferrable: fk.deferred,
        }
    }
}
