use super::Serializer;

use relmap_core::schema::db;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Sqlite,
    Postgresql,
    Mysql,
}

impl Flavor {
    pub fn is_sqlite(self) -> bool {
        matches!(self, Flavor::Sqlite)
    }

    pub fn is_postgresql(self) -> bool {
        matches!(self, Flavor::Postgresql)
    }

    pub fn is_mysql(self) -> bool {
        matches!(self, Flavor::Mysql)
    }

    /// SQLite cannot add constraints to an existing table, but accepts
    /// `DEFERRABLE` foreign keys referencing tables not created yet.
    pub(crate) fn inlines_deferred_foreign_keys(self) -> bool {
        self.is_sqlite()
    }
}

impl FromStr for Flavor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "sqlite" => Ok(Flavor::Sqlite),
            "postgresql" | "postgres" => Ok(Flavor::Postgresql),
            "mysql" => Ok(Flavor::Mysql),
            _ => anyhow::bail!("unknown SQL flavor `{s}`; expected sqlite, postgresql, or mysql"),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flavor::Sqlite => "sqlite",
            Flavor::Postgresql => "postgresql",
            Flavor::Mysql => "mysql",
        })
    }
}

impl<'a> Serializer<'a> {
    pub fn sqlite(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer::new(schema, Flavor::Sqlite)
    }

    pub fn postgresql(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer::new(schema, Flavor::Postgresql)
    }

    pub fn mysql(schema: &'a db::Schema) -> Serializer<'a> {
        Serializer::new(schema, Flavor::Mysql)
    }
}
