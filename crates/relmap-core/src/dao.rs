//! Conversion between in-memory instances of mapped types and table rows.

mod instance;
pub use instance::Instance;

mod load;

mod rows;
pub use rows::{Row, Rows};

mod value;
pub use value::Value;
