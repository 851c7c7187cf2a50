use super::{
    db::{TableId, TableRef},
    Schema,
};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_ids_populated());

        self.verify_table_names_are_unique()?;
        self.verify_column_names_are_unique()?;
        self.verify_each_table_has_one_primary_key()?;
        self.verify_foreign_key_targets()?;
        self.verify_emission_order()?;
        Ok(())
    }

    fn verify_ids_populated(&self) -> bool {
        for (index, table) in self.schema.db.tables.iter().enumerate() {
            assert_eq!(table.id, TableId(index));

            for (index, column) in table.columns.iter().enumerate() {
                assert_eq!(column.id.table, table.id);
                assert_eq!(column.id.index, index);
            }
        }

        for model in self.schema.app.models() {
            let mapping = self.schema.mapping.model(model.id);
            assert_eq!(mapping.fields.len(), model.fields.len());
        }

        true
    }

    fn verify_table_names_are_unique(&self) -> Result<()> {
        let db = &self.schema.db;
        let mut names = HashSet::new();

        let all = db
            .tables
            .iter()
            .map(|table| &table.name)
            .chain(db.join_tables.iter().map(|table| &table.name));

        for name in all {
            if !names.insert(name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate table name `{name}`"
                )));
            }
        }

        Ok(())
    }

    fn verify_column_names_are_unique(&self) -> Result<()> {
        for table in &self.schema.db.tables {
            let mut names = HashSet::new();

            for column in &table.columns {
                if !names.insert(&column.name) {
                    return Err(Error::invalid_schema(format!(
                        "duplicate column name `{}` in table `{}`",
                        column.name, table.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_each_table_has_one_primary_key(&self) -> Result<()> {
        for table in &self.schema.db.tables {
            let count = table.columns.iter().filter(|c| c.primary_key).count();

            if count != 1 || !table.primary_key_column().primary_key {
                return Err(Error::invalid_schema(format!(
                    "table `{}` must have exactly one primary key column",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn verify_foreign_key_targets(&self) -> Result<()> {
        let db = &self.schema.db;
        let exists = |id: TableId| id.0 < db.tables.len();

        for table in &db.tables {
            for fk in &table.foreign_keys {
                if !exists(fk.target) || fk.column.table != table.id {
                    return Err(Error::invalid_schema(format!(
                        "table `{}` has a foreign key to a missing table",
                        table.name
                    )));
                }
            }
        }

        for join_table in &db.join_tables {
            if !join_table.columns.iter().all(|column| exists(column.target)) {
                return Err(Error::invalid_schema(format!(
                    "join table `{}` references a missing table",
                    join_table.name
                )));
            }
        }

        Ok(())
    }

    /// Every table appears exactly once and after the targets of its
    /// non-deferred foreign keys.
    fn verify_emission_order(&self) -> Result<()> {
        let db = &self.schema.db;
        let mut emitted = HashSet::new();

        for table_ref in &db.order {
            let ready = match *table_ref {
                TableRef::Table(id) => db
                    .table(id)
                    .foreign_keys
                    .iter()
                    .filter(|fk| !fk.deferred && fk.target != id)
                    .all(|fk| emitted.contains(&TableRef::Table(fk.target))),
                TableRef::JoinTable(id) => db
                    .join_table(id)
                    .columns
                    .iter()
                    .all(|column| emitted.contains(&TableRef::Table(column.target))),
            };

            if !ready || !emitted.insert(*table_ref) {
                return Err(Error::invalid_schema(format!(
                    "`{}` is out of order",
                    db.name_of(*table_ref)
                )));
            }
        }

        if emitted.len() != db.tables.len() + db.join_tables.len() {
            return Err(Error::invalid_schema("emission order is incomplete"));
        }

        Ok(())
    }
}
