use super::{Instance, Row, Rows, Value};
use crate::schema::{app::ModelId, db::TableId, mapping, Schema};
use crate::{stmt, Error, Result};

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

struct Load<'a> {
    schema: &'a Schema,
    rows: &'a Rows,

    /// Instances already rebuilt, keyed by hierarchy root and primary key
    loaded: HashMap<(ModelId, i64), Arc<Instance>>,

    in_progress: HashSet<(ModelId, i64)>,
}

impl Rows {
    /// Rebuilds the instance of type `ty` (or one of its subclasses) stored
    /// under primary key `id`.
    ///
    /// The concrete type is read from the discriminator. Rows referenced
    /// several times come back as the same shared instance.
    pub fn load(&self, schema: &Schema, ty: &str, id: i64) -> Result<Arc<Instance>> {
        let model = schema
            .app
            .model_by_name(ty)
            .ok_or_else(|| Error::invalid_instance(format!("`{ty}` is not a mapped type")))?;

        Load {
            schema,
            rows: self,
            loaded: HashMap::new(),
            in_progress: HashSet::new(),
        }
        .load(model.id, id)
    }
}

impl<'a> Load<'a> {
    fn load(&mut self, declared: ModelId, id: i64) -> Result<Arc<Instance>> {
        let schema = self.schema;
        let rows = self.rows;
        let app = &schema.app;
        let root = app.root(declared);
        let key = (root.id, id);

        if let Some(instance) = self.loaded.get(&key) {
            return Ok(instance.clone());
        }

        if !self.in_progress.insert(key) {
            return Err(Error::invalid_instance(format!(
                "row {id} of {} references itself",
                root.name
            )));
        }

        let root_table = schema.table_for(root.id);
        let root_row = self.row(root_table.id, id)?;

        let concrete = match root_table.discriminator {
            Some(column) => {
                let name = root_row.values[column.index].as_str().ok_or_else(|| {
                    Error::invalid_instance(format!(
                        "row {id} of `{}` has no type discriminator",
                        root_table.name
                    ))
                })?;

                app.model_by_name(name).ok_or_else(|| {
                    Error::invalid_instance(format!("`{name}` is not a mapped type"))
                })?
            }
            None => app.model(declared),
        };

        if !app.is_descendant(concrete.id, declared) {
            return Err(Error::invalid_instance(format!(
                "row {id} holds a {}, expected a {}",
                concrete.name,
                app.model(declared).name
            )));
        }

        let mut instance = Instance::new(concrete.name.ident.clone());
        let chain: Vec<_> = app.ancestry(concrete.id).collect();

        for model in chain.into_iter().rev() {
            let row = self.row(schema.table_id_for(model.id), id)?;
            let mapping = schema.mapping_for(model.id);

            for (field, mapped) in model.fields.iter().zip(&mapping.fields) {
                let value = match *mapped {
                    mapping::Field::Column(column) => Value::from(row.values[column.index].clone()),
                    mapping::Field::ForeignKey(column) => match &row.values[column.index] {
                        stmt::Value::Null => Value::Null,
                        stmt::Value::I64(child) => {
                            let target = field.target().unwrap_or(model.id);
                            Value::Instance(self.load(target, *child)?)
                        }
                        other => {
                            return Err(Error::invalid_instance(format!(
                                "{}.{} holds {other:?} instead of a key",
                                model.name, field.name
                            )))
                        }
                    },
                    mapping::Field::OneToMany { table, column } => {
                        let target = field.target().unwrap_or(model.id);
                        let children: Vec<i64> = rows
                            .table(table)
                            .filter(|(_, row)| row.values[column.index] == stmt::Value::I64(id))
                            .map(|(child, _)| child)
                            .collect();

                        self.load_all(target, children)?
                    }
                    mapping::Field::ManyToMany(join_table) => {
                        let target = field.target().unwrap_or(model.id);
                        let children: Vec<i64> = rows
                            .join_table(join_table)
                            .iter()
                            .filter(|(owner, _)| *owner == id)
                            .map(|(_, child)| *child)
                            .collect();

                        self.load_all(target, children)?
                    }
                };

                instance.fields.insert(field.name.clone(), value);
            }
        }

        self.in_progress.remove(&key);

        let instance = Arc::new(instance);
        self.loaded.insert(key, instance.clone());
        Ok(instance)
    }

    fn load_all(&mut self, target: ModelId, ids: Vec<i64>) -> Result<Value> {
        let mut items = Vec::with_capacity(ids.len());

        for id in ids {
            items.push(Value::Instance(self.load(target, id)?));
        }

        Ok(Value::List(items))
    }

    fn row(&self, table: TableId, id: i64) -> Result<&'a Row> {
        let rows: &'a Rows = self.rows;
        let schema: &'a Schema = self.schema;

        rows.row(table, id).ok_or_else(|| {
            Error::invalid_instance(format!(
                "no row {id} in `{}`",
                schema.db.table(table).name
            ))
        })
    }
}
