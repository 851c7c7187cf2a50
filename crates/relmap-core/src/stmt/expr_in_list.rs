use super::{Expr, Path, Value};

use serde::{Deserialize, Serialize};

/// Matches when the field equals any of the listed literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprInList {
    pub path: Path,
    pub list: Vec<Value>,
}

impl Expr {
    pub fn in_list<T: Into<Value>>(path: impl Into<Path>, list: impl IntoIterator<Item = T>) -> Self {
        ExprInList {
            path: path.into(),
            list: list.into_iter().map(Into::into).collect(),
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
