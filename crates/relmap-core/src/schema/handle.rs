use super::Schema;

use std::sync::{Arc, RwLock};

/// Shares the current schema between readers and allows replacing it as a
/// whole.
///
/// Readers take a cheap `Arc` snapshot; a schema published later never
/// affects a snapshot already taken.
#[derive(Debug)]
pub struct SchemaHandle {
    current: RwLock<Arc<Schema>>,
}

impl SchemaHandle {
    pub fn new(schema: Schema) -> Self {
        Self {
            current: RwLock::new(Arc::new(schema)),
        }
    }

    /// Returns the schema published most recently.
    pub fn load(&self) -> Arc<Schema> {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the current schema. The new schema must be fully built
    /// before calling this.
    pub fn publish(&self, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);

        let mut current = match self.current.write() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };

        std::mem::replace(&mut *current, schema)
    }
}
