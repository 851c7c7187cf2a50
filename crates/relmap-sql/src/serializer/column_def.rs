use super::{Comma, Flavor, Ident, Literal, Params, ToSql};

use crate::stmt;
use relmap_core::schema::db;

impl ToSql for &stmt::ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);

        if self.auto_increment {
            match f.serializer.flavor {
                // SQLite only auto increments an inline `INTEGER PRIMARY KEY`
                Flavor::Sqlite => fmt!(f, name " INTEGER PRIMARY KEY AUTOINCREMENT"),
                Flavor::Postgresql => fmt!(f, name " BIGINT GENERATED BY DEFAULT AS IDENTITY"),
                Flavor::Mysql => fmt!(f, name " BIGINT NOT NULL AUTO_INCREMENT"),
            }
            return;
        }

        let ty = &self.ty;
        let not_null = self.not_null.then_some(" NOT NULL");
        fmt!(f, name " " ty not_null);

        if let db::Type::Enum { variants, .. } = &self.ty {
            if !f.serializer.flavor.is_mysql() {
                let variants = Comma(variants.iter().map(Literal));
                fmt!(f, " CHECK (" Ident(&self.name) " IN (" variants "))");
            }
        }
    }
}

impl ToSql for &stmt::ForeignKeyDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let deferrable = (self.deferrable && !f.serializer.flavor.is_mysql())
            .then_some(" DEFERRABLE INITIALLY DEFERRED");

        fmt!(
            f, "FOREIGN KEY (" Ident(&self.column) ") REFERENCES " Ident(&self.references)
            " (" Ident(&self.references_column) ")" deferrable
        );
    }
}
