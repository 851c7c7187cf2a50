use super::{ExprAnd, ExprBinaryOp, ExprInList, ExprOr};

use serde::{Deserialize, Serialize};

/// A predicate over the fields of a single root type.
///
/// Serialized externally tagged, e.g.
/// `{"or": [{"binary_op": {"path": "z", "op": ">", "value": 3}}, ..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// AND a set of expressions
    And(ExprAnd),

    /// OR a set of expressions
    Or(ExprOr),

    /// Compares a field with a literal
    BinaryOp(ExprBinaryOp),

    /// Tests a field for membership in a set of literals
    InList(ExprInList),
}
