use super::*;

use crate::Flavor;
use relmap_core::schema::db::{self, TableRef};

impl Statement {
    /// Every `CREATE TABLE` statement for `schema`, in emission order.
    ///
    /// Deferred foreign keys stay inline on flavors that can declare them
    /// `DEFERRABLE`. Elsewhere they are added by trailing `ALTER TABLE`
    /// statements once every table exists.
    pub fn create_schema(schema: &db::Schema, flavor: Flavor) -> Vec<Statement> {
        let mut stmts = vec![];
        let mut trailing = vec![];

        for table in &schema.order {
            let create_table = match *table {
                TableRef::Table(id) => {
                    let mut create_table = CreateTable::from_table(schema, schema.table(id));

                    if !flavor.inlines_deferred_foreign_keys() {
                        let (deferred, inline): (Vec<_>, Vec<_>) = create_table
                            .foreign_keys
                            .drain(..)
                            .partition(|fk| fk.deferrable);

                        create_table.foreign_keys = inline;
                        trailing.extend(deferred.into_iter().map(|foreign_key| AddForeignKey {
                            table: create_table.name.clone(),
                            foreign_key,
                        }));
                    }

                    create_table
                }
                TableRef::JoinTable(id) => {
                    CreateTable::from_join_table(schema, schema.join_table(id))
                }
            };

            stmts.push(create_table.into());
        }

        stmts.extend(trailing.into_iter().map(Statement::from));
        stmts
    }
}
