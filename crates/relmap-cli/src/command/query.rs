use super::{flavor, load_schema};
use crate::Config;

use anyhow::{Context, Result};
use clap::Parser;
use relmap_sql::{stmt, Flavor, Serializer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct QueryCommand {
    /// Type graph descriptor
    types: PathBuf,

    /// Type the predicate is written against
    #[arg(short, long)]
    root: String,

    /// Predicate as JSON, e.g. `{"or": [{"binary_op": {"path": "z", "op": ">", "value": 3}}]}`
    #[arg(long)]
    filter: String,

    /// SQL dialect: sqlite, postgresql, or mysql
    #[arg(short, long)]
    flavor: Option<Flavor>,
}

impl QueryCommand {
    pub(crate) fn render(&self, config: &Config) -> Result<String> {
        let schema = load_schema(&self.types, config)?;

        let expr: stmt::Expr =
            serde_json::from_str(&self.filter).context("failed to parse --filter")?;
        let query = schema.translate(&self.root, &expr)?;

        let serializer = Serializer::new(&schema.db, flavor(self.flavor, config));
        let mut params = Vec::<stmt::Value>::new();
        let sql = serializer.serialize_query(&query, &mut params);

        Ok(format!("{sql}\n-- params: {}", serde_json::to_string(&params)?))
    }
}
