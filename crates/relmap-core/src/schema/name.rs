use std_util::str;

/// A declared type name and the storage name derived from it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    /// The name exactly as declared
    pub ident: String,
}

impl Name {
    pub fn new(src: &str) -> Self {
        Self {
            ident: src.to_string(),
        }
    }

    pub fn snake_case(&self) -> String {
        str::snake_case(&self.ident)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.ident)
    }
}
