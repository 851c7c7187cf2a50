use super::{Filter, Param, Value};
use crate::schema::{
    app::ModelId,
    db::{ColumnId, TableId},
};

/// A translated predicate, ready to be rendered by a persistence engine.
///
/// The query reads the root type's table, inner joined with each ancestor
/// table on the shared primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The root type the predicate was written against
    pub model: ModelId,

    /// The root type's table
    pub table: TableId,

    /// Ancestor tables, nearest parent first
    pub joins: Vec<Join>,

    pub filter: Filter,

    /// Literals referenced by the filter, in order of appearance
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The ancestor table being joined
    pub table: TableId,

    /// Primary key of the table joined just before this one
    pub lhs: ColumnId,

    /// Primary key of `table`
    pub rhs: ColumnId,
}

impl Query {
    pub fn param(&self, param: Param) -> &Value {
        &self.params[param.0]
    }
}
