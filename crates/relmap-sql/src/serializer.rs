#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Parens};

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::{Ident, Literal};

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod column_def;
mod filter;
mod statement;
mod ty;

use crate::stmt::{self, Statement};

use relmap_core::schema::db::{self, Table};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    schema: &'a db::Schema,

    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    pub fn new(schema: &'a db::Schema, flavor: Flavor) -> Serializer<'a> {
        Serializer { schema, flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serialize a translated query. Literals are pushed to `params` in the
    /// order their placeholders appear.
    pub fn serialize_query(&self, query: &stmt::Query, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        query.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// The statements creating every table of the schema
    pub fn create_schema(&self) -> Vec<Statement> {
        Statement::create_schema(self.schema, self.flavor)
    }

    /// Serialized [`create_schema`](Self::create_schema) statements
    pub fn serialize_schema(&self) -> Vec<String> {
        let mut params = Vec::<stmt::Value>::new();

        self.create_schema()
            .iter()
            .map(|stmt| self.serialize(stmt, &mut params))
            .collect()
    }

    fn table(&self, id: impl Into<db::TableId>) -> &'a Table {
        self.schema.table(id.into())
    }

    fn table_name(&self, id: impl Into<db::TableId>) -> Ident<&'a str> {
        Ident(&self.table(id).name)
    }

    fn column_name(&self, id: impl Into<db::ColumnId>) -> Ident<&'a str> {
        let schema = self.schema;
        Ident(&schema.column(id.into()).name)
    }
}
