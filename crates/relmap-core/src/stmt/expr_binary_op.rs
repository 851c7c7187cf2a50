use super::{BinaryOp, Expr, Path, Value};

use serde::{Deserialize, Serialize};

/// Compares a field with a literal.
///
/// # Examples
///
/// ```text
/// eq(x, 2)     // x == 2
/// gt(z, 3)     // z > 3
/// ne(o, null)  // o IS NOT NULL
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprBinaryOp {
    /// The field being compared
    pub path: Path,

    /// The operator to apply.
    pub op: BinaryOp,

    /// The literal on the right-hand side
    pub value: Value,
}

impl Expr {
    pub fn binary_op(path: impl Into<Path>, op: BinaryOp, value: impl Into<Value>) -> Self {
        ExprBinaryOp {
            path: path.into(),
            op,
            value: value.into(),
        }
        .into()
    }

    pub fn eq(path: impl Into<Path>, value: impl Into<Value>) -> Self {
        Expr::binary_op(path, BinaryOp::Eq, value)
    }

    pub fn ne(path: impl Into<Path>, value: impl Into<Value>) -> Self {
        Expr::binary_op(path, BinaryOp::Ne, value)
    }

    pub fn ge(path: impl Into<Path>, value: impl Into<Value>) -> Self {
        Expr::binary_op(path, BinaryOp::Ge, value)
    }

    pub fn gt(path: impl Into<Path>, value: impl Into<Value>) -> Self {
        Expr::binary_op(path, BinaryOp::Gt, value)
    }

    pub fn le(path: impl Into<Path>, value: impl Into<Value>) -> Self {
        Expr::binary_op(path, BinaryOp::Le, value)
    }

    pub fn lt(path: impl Into<Path>, value: impl Into<Value>) -> Self {
        Expr::binary_op(path, BinaryOp::Lt, value)
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}
