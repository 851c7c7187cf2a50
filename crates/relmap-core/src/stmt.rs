//! Predicate expressions written against declared field names, and their
//! translation into parameterized queries over the mapped tables.

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_or;
pub use expr_or::ExprOr;

mod filter;
pub use filter::{Filter, Param};

mod op_binary;
pub use op_binary::BinaryOp;

mod path;
pub use path::Path;

mod query;
pub use query::{Join, Query};

mod translate;
pub use translate::translate;

mod value;
pub use value::Value;
