//! Classified type graph
//!
//! Every mapped type becomes a [`Model`] whose fields carry a closed
//! [`FieldTy`] decided once during classification. Downstream components
//! pattern-match on it instead of re-inspecting annotations.

mod classify;
pub use classify::Classifier;

mod field;
pub use field::{
    CollectionOfComposite, CollectionOfScalar, Custom, Field, FieldId, FieldKind, FieldTy,
    ScalarElement,
};

mod model;
pub use model::{Model, ModelId};

mod schema;
pub use schema::Schema;
