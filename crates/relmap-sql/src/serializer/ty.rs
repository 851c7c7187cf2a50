use super::{Comma, Flavor, Literal, Params, ToSql};

use relmap_core::schema::db;

impl ToSql for &db::Type {
    fn to_sql<T: Params>(self, f: &mut super::Formatter<'_, T>) {
        let flavor = f.serializer.flavor;

        match (self, flavor) {
            (db::Type::Boolean, _) => fmt!(f, "BOOLEAN"),
            (db::Type::Integer, Flavor::Sqlite) => fmt!(f, "INTEGER"),
            (db::Type::Integer, _) => fmt!(f, "BIGINT"),
            (db::Type::Float, Flavor::Sqlite) => fmt!(f, "REAL"),
            (db::Type::Float, Flavor::Postgresql) => fmt!(f, "DOUBLE PRECISION"),
            (db::Type::Float, Flavor::Mysql) => fmt!(f, "DOUBLE"),
            (db::Type::Text, _) => fmt!(f, "TEXT"),
            (db::Type::DateTime, Flavor::Sqlite) => fmt!(f, "TEXT"),
            (db::Type::DateTime, Flavor::Postgresql) => fmt!(f, "TIMESTAMPTZ"),
            (db::Type::DateTime, Flavor::Mysql) => fmt!(f, "DATETIME(6)"),
            (db::Type::Json, Flavor::Sqlite) => fmt!(f, "TEXT"),
            (db::Type::Json, Flavor::Postgresql) => fmt!(f, "JSONB"),
            (db::Type::Json, Flavor::Mysql) => fmt!(f, "JSON"),
            (db::Type::Enum { variants, .. }, Flavor::Mysql) => {
                let variants = Comma(variants.iter().map(Literal));
                fmt!(f, "ENUM(" variants ")")
            }
            // Variants are enforced with a CHECK constraint on the column
            (db::Type::Enum { .. }, _) => fmt!(f, "TEXT"),
        }
    }
}
