use super::load_schema;
use crate::Config;

use anyhow::Result;
use clap::Parser;
use relmap_core::schema::db::{ForeignKeyKind, TableRef};
use std::{fmt::Write, path::PathBuf};

#[derive(Parser, Debug)]
pub struct TablesCommand {
    /// Type graph descriptor
    types: PathBuf,

    /// Print the full database schema as JSON
    #[arg(long)]
    json: bool,
}

impl TablesCommand {
    pub(crate) fn render(&self, config: &Config) -> Result<String> {
        let schema = load_schema(&self.types, config)?;
        let db = &schema.db;

        if self.json {
            return Ok(serde_json::to_string_pretty(&**db)?);
        }

        let mut out = String::new();

        for table in &db.order {
            match *table {
                TableRef::Table(id) => {
                    let table = db.table(id);
                    write!(out, "{}", table.name)?;

                    for fk in &table.foreign_keys {
                        let column = &table.column(fk.column).name;
                        let target = &db.table(fk.target).name;

                        match fk.kind {
                            ForeignKeyKind::Inheritance => write!(out, " extends {target}")?,
                            ForeignKeyKind::Reference => write!(out, " {column} -> {target}")?,
                            ForeignKeyKind::BackReference => {
                                write!(out, " {column} -> {target} (one-to-many)")?
                            }
                        }

                        if fk.deferred {
                            write!(out, " [deferred]")?;
                        }
                    }

                    if let Some(column) = table.discriminator {
                        write!(out, " polymorphic on {}", table.column(column).name)?;
                    }
                }
                TableRef::JoinTable(id) => {
                    let join_table = db.join_table(id);
                    let [owner, element] = &join_table.columns;

                    write!(
                        out,
                        "{} joins {} -> {}, {} -> {}",
                        join_table.name,
                        owner.name,
                        db.table(owner.target).name,
                        element.name,
                        db.table(element.target).name
                    )?;
                }
            }

            out.push('\n');
        }

        for warning in &schema.warnings {
            writeln!(out, "warning: {warning}")?;
        }

        Ok(out.trim_end().to_string())
    }
}
