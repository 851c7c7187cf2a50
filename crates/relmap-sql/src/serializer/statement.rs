use super::{
    filter::{ColumnRef, Predicate},
    Comma, Ident, Params, ToSql,
};

use crate::stmt::{self, Statement};

struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::AddForeignKey(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Query(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        // SQLite declares the primary key inline with the auto incrementing
        // column
        let trailing_pk =
            !(f.serializer.flavor.is_sqlite() && self.0.columns.iter().any(|c| c.auto_increment));

        let mut s = "\n    ";

        for column in &self.0.columns {
            fmt!(f, s column);
            s = ",\n    ";
        }

        if trailing_pk && !self.0.primary_key.is_empty() {
            let pk = Comma(self.0.primary_key.iter().map(Ident));
            fmt!(f, s "PRIMARY KEY (" pk ")");
        }

        for fk in &self.0.foreign_keys {
            fmt!(f, s fk);
        }

        fmt!(f, "\n");
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);
        let columns = ColumnsWithConstraints(self);

        fmt!(f, "CREATE TABLE " name " (" columns ")");
    }
}

impl ToSql for &stmt::AddForeignKey {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.table);
        let foreign_key = &self.foreign_key;

        fmt!(f, "ALTER TABLE " name " ADD " foreign_key);
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let serializer = f.serializer;
        let table = serializer.table(self.table);

        // Every column of the root table, then the fields each ancestor adds
        let inherited = self.joins.iter().flat_map(|join| {
            serializer
                .table(join.table)
                .columns
                .iter()
                .filter(|column| !column.primary_key)
        });
        let columns = Comma(
            table
                .columns
                .iter()
                .chain(inherited)
                .map(|column| ColumnRef(column.id)),
        );

        fmt!(f, "SELECT " columns " FROM " serializer.table_name(table.id));

        for join in &self.joins {
            fmt!(
                f, " INNER JOIN " serializer.table_name(join.table)
                " ON " ColumnRef(join.lhs) " = " ColumnRef(join.rhs)
            );
        }

        let filter = Predicate {
            query: self,
            filter: &self.filter,
        };

        fmt!(f, " WHERE " filter);
    }
}
