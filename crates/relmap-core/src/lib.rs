pub mod dao;

mod error;
pub use error::{Error, IntoError};

pub mod graph;
pub use graph::TypeGraph;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses relmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
