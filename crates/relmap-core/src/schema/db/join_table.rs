use super::{TableId, Type};

use serde::Serialize;
use std::fmt;

/// A two-column association table carrying a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinTable {
    pub id: JoinTableId,

    pub name: String,

    /// The owner side followed by the element side
    pub columns: [JoinColumn; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinColumn {
    pub name: String,

    /// Referenced table; the column references its primary key
    pub target: TableId,

    pub ty: Type,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize)]
pub struct JoinTableId(pub usize);

impl JoinTable {
    pub fn owner(&self) -> &JoinColumn {
        &self.columns[0]
    }

    pub fn element(&self) -> &JoinColumn {
        &self.columns[1]
    }
}

impl fmt::Debug for JoinTableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "JoinTableId({})", self.0)
    }
}
