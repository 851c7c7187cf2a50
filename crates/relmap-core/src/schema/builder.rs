pub(crate) mod hierarchy;
mod order;
mod relation;
mod table;

use super::{app, db, mapping, Mapping, Schema};
use crate::{Error, Result, TypeGraph};
use app::ModelId;
use db::{JoinTable, Table, TableId};

use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    /// Name of every table's primary key column
    primary_key_name: String,

    /// Appended to a field or table name to name a foreign key column
    foreign_key_suffix: String,

    /// Name of the column recording the concrete type of a polymorphic row
    discriminator_column: String,

    /// Fields whose name starts with this prefix are not mapped
    private_prefix: String,

    /// Types stored as a single column of the given type
    type_mappings: IndexMap<String, db::Type>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    app: &'a app::Schema,

    /// Maps models to their table. A model's table is created the first
    /// time it is requested and reused afterwards.
    table_lookup: IndexMap<ModelId, TableId>,

    /// Tables as they are built
    tables: Vec<Table>,

    join_tables: Vec<JoinTable>,

    /// Field mappings, filled in over the column and relation passes
    fields: IndexMap<ModelId, Vec<Option<mapping::Field>>>,

    mapping: Mapping,

    warnings: Vec<Error>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
            primary_key_name: "id".to_string(),
            foreign_key_suffix: "_id".to_string(),
            discriminator_column: "polymorphic_type".to_string(),
            private_prefix: "_".to_string(),
            type_mappings: IndexMap::new(),
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn primary_key_name(&mut self, name: &str) -> &mut Self {
        self.primary_key_name = name.to_string();
        self
    }

    pub fn foreign_key_suffix(&mut self, suffix: &str) -> &mut Self {
        self.foreign_key_suffix = suffix.to_string();
        self
    }

    pub fn discriminator_column(&mut self, name: &str) -> &mut Self {
        self.discriminator_column = name.to_string();
        self
    }

    pub fn private_prefix(&mut self, prefix: &str) -> &mut Self {
        self.private_prefix = prefix.to_string();
        self
    }

    /// Store fields of type `type_name` in a single column of `storage_ty`
    /// instead of mapping the type to its own table.
    pub fn type_mapping(&mut self, type_name: &str, storage_ty: db::Type) -> &mut Self {
        self.type_mappings.insert(type_name.to_string(), storage_ty);
        self
    }

    /// Returns a classifier configured with this builder's options.
    pub fn classifier<'a>(&self, graph: &'a TypeGraph) -> app::Classifier<'a> {
        let mut classifier = app::Classifier::new(graph);
        classifier
            .private_prefix(&self.private_prefix)
            .type_mappings(&self.type_mappings);
        classifier
    }

    /// Maps the type graph to a schema.
    ///
    /// Either the complete schema is returned or the call fails; no partial
    /// schema is produced.
    pub fn build(&self, graph: &TypeGraph) -> Result<Schema> {
        let app = self.classifier(graph).classify_all()?;

        let mut builder = BuildSchema {
            builder: self,
            app: &app,
            table_lookup: IndexMap::new(),
            tables: vec![],
            join_tables: vec![],
            fields: IndexMap::new(),
            mapping: Mapping::default(),
            warnings: vec![],
        };

        for model in app.models() {
            builder.table_for(model.id);
        }

        for model in app.models() {
            builder.build_columns(model);
        }

        let owners = builder.owner_counts();

        for model in app.models() {
            builder.build_relations(model, &owners);
        }

        builder.finalize_mapping()?;

        let BuildSchema {
            mut tables,
            join_tables,
            mapping,
            warnings,
            ..
        } = builder;

        let order = order::emission_order(&mut tables, &join_tables);

        let schema = Schema {
            app,
            db: Arc::new(db::Schema {
                tables,
                join_tables,
                order,
            }),
            mapping,
            warnings,
        };

        // Verify the schema structure
        schema.verify()?;

        Ok(schema)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSchema<'_> {
    /// Moves the collected field mappings into the mapping and attaches
    /// discriminators.
    fn finalize_mapping(&mut self) -> Result<()> {
        let app = self.app;

        for (id, fields) in std::mem::take(&mut self.fields) {
            let model = app.model(id);

            let fields = fields
                .into_iter()
                .zip(&model.fields)
                .map(|(mapped, field)| {
                    mapped.ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "{}.{} was not mapped",
                            model.name, field.name
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let root = app.root(id);
            let discriminator = if root.polymorphic {
                let root_table = &self.tables[self.table_lookup[&root.id].0];

                root_table
                    .discriminator
                    .map(|column| mapping::Discriminator {
                        column,
                        value: model.name.ident.clone(),
                    })
            } else {
                None
            };

            let mapping = self.mapping.model_mut(id);
            mapping.fields = fields;
            mapping.discriminator = discriminator;
        }

        Ok(())
    }
}
