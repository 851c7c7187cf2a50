use super::{flavor, load_schema};
use crate::Config;

use anyhow::Result;
use clap::Parser;
use relmap_sql::{Flavor, Serializer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct SchemaCommand {
    /// Type graph descriptor
    types: PathBuf,

    /// SQL dialect: sqlite, postgresql, or mysql
    #[arg(short, long)]
    flavor: Option<Flavor>,
}

impl SchemaCommand {
    pub(crate) fn render(&self, config: &Config) -> Result<String> {
        let schema = load_schema(&self.types, config)?;
        let serializer = Serializer::new(&schema.db, flavor(self.flavor, config));

        Ok(serializer.serialize_schema().join("\n\n"))
    }
}
