use super::*;

/// Adds a foreign key constraint to a table that already exists
#[derive(Debug, Clone)]
pub struct AddForeignKey {
    pub table: String,
    pub foreign_key: ForeignKeyDef,
}

impl From<AddForeignKey> for Statement {
    fn from(value: AddForeignKey) -> Self {
        Self::AddForeignKey(value)
    }
}
