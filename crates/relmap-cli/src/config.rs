use anyhow::{Context, Result};
use indexmap::IndexMap;
use relmap_core::schema::{self, db};
use relmap_sql::Flavor;
use serde::Deserialize;
use std::path::Path;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "relmap.toml";

/// Configuration for Relmap CLI operations
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQL dialect used when no `--flavor` is given
    pub flavor: Flavor,

    /// Schema mapping options
    pub schema: SchemaConfig,
}

/// Naming and storage options applied when mapping a type graph
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub table_name_prefix: Option<String>,

    pub primary_key: String,

    pub foreign_key_suffix: String,

    pub discriminator_column: String,

    /// Fields starting with this prefix are not mapped
    pub private_prefix: String,

    /// Types stored as a single column instead of their own table
    pub type_mappings: IndexMap<String, db::Type>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default flavor
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Set the schema configuration
    pub fn schema(mut self, schema: SchemaConfig) -> Self {
        self.schema = schema;
        self
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        contents
            .parse()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Load a configuration file if it exists
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found; using the default configuration", path.display());
            Ok(Self::default())
        }
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            table_name_prefix: None,
            primary_key: "id".to_string(),
            foreign_key_suffix: "_id".to_string(),
            discriminator_column: "polymorphic_type".to_string(),
            private_prefix: "_".to_string(),
            type_mappings: IndexMap::new(),
        }
    }
}

impl SchemaConfig {
    /// Returns a schema builder configured with these options
    pub fn builder(&self) -> schema::Builder {
        let mut builder = schema::Builder::new();

        builder
            .primary_key_name(&self.primary_key)
            .foreign_key_suffix(&self.foreign_key_suffix)
            .discriminator_column(&self.discriminator_column)
            .private_prefix(&self.private_prefix);

        if let Some(prefix) = &self.table_name_prefix {
            builder.table_name_prefix(prefix);
        }

        for (type_name, storage_ty) in &self.type_mappings {
            builder.type_mapping(type_name, storage_ty.clone());
        }

        builder
    }
}
