use super::Instance;
use crate::stmt;

use std::sync::Arc;

/// A field value of an [`Instance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),

    /// A nested instance. Instances shared by several owners are the same
    /// `Arc`.
    Instance(Arc<Instance>),

    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts a scalar or a list of scalars into a column value.
    pub(crate) fn to_stmt(&self) -> Option<stmt::Value> {
        Some(match self {
            Self::Null => stmt::Value::Null,
            Self::Bool(v) => stmt::Value::Bool(*v),
            Self::I64(v) => stmt::Value::I64(*v),
            Self::F64(v) => stmt::Value::F64(*v),
            Self::String(v) => stmt::Value::String(v.clone()),
            Self::List(items) => stmt::Value::List(
                items
                    .iter()
                    .map(Self::to_stmt)
                    .collect::<Option<_>>()?,
            ),
            Self::Instance(_) => return None,
        })
    }
}

impl From<stmt::Value> for Value {
    fn from(value: stmt::Value) -> Self {
        match value {
            stmt::Value::Null => Self::Null,
            stmt::Value::Bool(v) => Self::Bool(v),
            stmt::Value::I64(v) => Self::I64(v),
            stmt::Value::F64(v) => Self::F64(v),
            stmt::Value::String(v) => Self::String(v),
            stmt::Value::List(items) => Self::List(items.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Arc<Instance>> for Value {
    fn from(value: Arc<Instance>) -> Self {
        Self::Instance(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Self::Instance(Arc::new(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
