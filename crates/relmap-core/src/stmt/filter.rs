use super::BinaryOp;
use crate::schema::db::ColumnId;

use std::fmt;

/// A filter over table columns. Literals are referenced by [`Param`] and
/// stored in the query's parameter list.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),

    Or(Vec<Filter>),

    BinaryOp {
        column: ColumnId,
        op: BinaryOp,
        param: Param,
    },

    /// A single membership predicate; an empty list matches nothing
    InList { column: ColumnId, params: Vec<Param> },

    IsNull { column: ColumnId, negate: bool },
}

/// Index of a literal in [`Query::params`](super::Query::params)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Param(pub usize);

impl Filter {
    /// Returns every column the filter reads, in traversal order.
    pub fn columns(&self) -> Vec<ColumnId> {
        let mut columns = vec![];
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, columns: &mut Vec<ColumnId>) {
        match self {
            Self::And(operands) | Self::Or(operands) => {
                for operand in operands {
                    operand.collect_columns(columns);
                }
            }
            Self::BinaryOp { column, .. }
            | Self::InList { column, .. }
            | Self::IsNull { column, .. } => columns.push(*column),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Param({})", self.0)
    }
}
