//! Database-level schema: tables, columns, foreign keys and join tables,
//! plus the order in which they must be created.

mod column;
pub use column::{Column, ColumnId};

mod fk;
pub use fk::{ForeignKey, ForeignKeyKind};

mod join_table;
pub use join_table::{JoinColumn, JoinTable, JoinTableId};

mod schema;
pub use schema::{Schema, TableRef};

mod table;
pub use table::{Table, TableId};

mod ty;
pub use ty::Type;
