use serde::{Deserialize, Serialize};
use std::fmt;

/// A field reference relative to the root type, written `field` or
/// `field.nested`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Path {
    steps: Vec<String>,
}

impl Path {
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Self {
            steps: value
                .split('.')
                .filter(|step| !step.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<Path> for String {
    fn from(value: Path) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.steps.join("."))
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}
