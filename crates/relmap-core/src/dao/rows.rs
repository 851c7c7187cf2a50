use super::{Instance, Value};
use crate::schema::{
    app::{self, FieldTy, ModelId},
    db::{ColumnId, JoinTableId, TableId},
    mapping, Schema,
};
use crate::{stmt, Error, Result};

use by_address::ByAddress;
use indexmap::IndexMap;
use std::{collections::HashMap, sync::Arc};

/// Table rows produced from instances.
#[derive(Debug, Clone, Default)]
pub struct Rows {
    /// Rows per table, keyed by primary key in insertion order
    pub tables: IndexMap<TableId, IndexMap<i64, Row>>,

    /// `(owner, element)` primary key pairs per join table
    pub join_tables: IndexMap<JoinTableId, Vec<(i64, i64)>>,

    next_id: i64,

    /// Primary keys of instances already written, by address
    written: HashMap<ByAddress<Arc<Instance>>, i64>,
}

/// One row; values are positioned like the table's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<stmt::Value>,
}

impl Schema {
    /// Converts an instance and everything it references into rows.
    pub fn to_rows(&self, instance: &Arc<Instance>) -> Result<Rows> {
        let mut rows = Rows::new();
        rows.insert(self, instance)?;
        Ok(rows)
    }
}

impl Rows {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Writes `instance`, returning its primary key.
    ///
    /// An instance reachable through several references is written once.
    pub fn insert(&mut self, schema: &Schema, instance: &Arc<Instance>) -> Result<i64> {
        let key = ByAddress(instance.clone());

        if let Some(id) = self.written.get(&key) {
            return Ok(*id);
        }

        let model = schema.app.model_by_name(&instance.ty).ok_or_else(|| {
            Error::invalid_instance(format!("`{}` is not a mapped type", instance.ty))
        })?;

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.written.insert(key, id);

        for ancestor in schema.app.ancestry(model.id) {
            self.insert_row(schema, ancestor, instance, id)?;
        }

        Ok(id)
    }

    pub fn table(&self, table: TableId) -> impl Iterator<Item = (i64, &Row)> + '_ {
        self.tables
            .get(&table)
            .into_iter()
            .flat_map(|rows| rows.iter().map(|(id, row)| (*id, row)))
    }

    pub fn row(&self, table: TableId, id: i64) -> Option<&Row> {
        self.tables.get(&table)?.get(&id)
    }

    pub fn join_table(&self, join_table: JoinTableId) -> &[(i64, i64)] {
        self.join_tables
            .get(&join_table)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Writes the row storing `model`'s own fields of `instance`.
    fn insert_row(
        &mut self,
        schema: &Schema,
        model: &app::Model,
        instance: &Arc<Instance>,
        id: i64,
    ) -> Result<()> {
        let table = schema.table_for(model.id);
        let mapping = schema.mapping_for(model.id);

        let mut values = vec![stmt::Value::Null; table.columns.len()];
        values[table.primary_key.index] = stmt::Value::I64(id);

        if let Some(discriminator) = table.discriminator {
            values[discriminator.index] = stmt::Value::String(instance.ty.clone());
        }

        for (field, mapped) in model.fields.iter().zip(&mapping.fields) {
            let value = instance.get(&field.name).unwrap_or(&Value::Null);

            if value.is_null() {
                if !field.nullable && !field.is_collection() {
                    return Err(Error::invalid_instance(format!(
                        "{}.{} is required",
                        instance.ty, field.name
                    )));
                }
                continue;
            }

            match *mapped {
                mapping::Field::Column(column) => {
                    values[column.index] = self.column_value(schema, instance, field, value)?;
                }
                mapping::Field::ForeignKey(column) => {
                    let target = field.target().unwrap_or(model.id);
                    let child = self.insert_nested(schema, instance, field, value, target)?;
                    values[column.index] = stmt::Value::I64(child);
                }
                mapping::Field::OneToMany { table, column } => {
                    let target = field.target().unwrap_or(model.id);

                    for element in elements(instance, field, value)? {
                        let child = self.insert_nested(schema, instance, field, element, target)?;
                        self.set_back_reference(table, column, child, id)?;
                    }
                }
                mapping::Field::ManyToMany(join_table) => {
                    let target = field.target().unwrap_or(model.id);

                    for element in elements(instance, field, value)? {
                        let child = self.insert_nested(schema, instance, field, element, target)?;
                        self.join_tables
                            .entry(join_table)
                            .or_default()
                            .push((id, child));
                    }
                }
            }
        }

        self.tables
            .entry(table.id)
            .or_default()
            .insert(id, Row { values });

        Ok(())
    }

    fn insert_nested(
        &mut self,
        schema: &Schema,
        owner: &Instance,
        field: &app::Field,
        value: &Value,
        target: ModelId,
    ) -> Result<i64> {
        let Value::Instance(child) = value else {
            return Err(mismatch(owner, field, value));
        };

        let is_target = schema
            .app
            .model_by_name(&child.ty)
            .is_some_and(|model| schema.app.is_descendant(model.id, target));

        if !is_target {
            return Err(Error::invalid_instance(format!(
                "{}.{} expects {}, got {}",
                owner.ty,
                field.name,
                schema.app.model(target).name,
                child.ty
            )));
        }

        self.insert(schema, child)
    }

    fn set_back_reference(
        &mut self,
        table: TableId,
        column: ColumnId,
        child: i64,
        owner: i64,
    ) -> Result<()> {
        let row = self
            .tables
            .get_mut(&table)
            .and_then(|rows| rows.get_mut(&child))
            .ok_or_else(|| crate::err!("row {child} missing from table {table:?}"))?;

        row.values[column.index] = stmt::Value::I64(owner);
        Ok(())
    }

    fn column_value(
        &self,
        schema: &Schema,
        owner: &Instance,
        field: &app::Field,
        value: &Value,
    ) -> Result<stmt::Value> {
        let converted = value
            .to_stmt()
            .ok_or_else(|| mismatch(owner, field, value))?;

        let ok = match (&field.ty, &converted) {
            (FieldTy::Enum(id), stmt::Value::String(variant)) => {
                schema.app.enums[id.0].variants.contains(variant)
            }
            (FieldTy::Enum(_), _) => false,
            (FieldTy::TypeRef(_), stmt::Value::String(name)) => {
                schema.app.model_by_name(name).is_some()
            }
            (FieldTy::TypeRef(_), _) => false,
            (FieldTy::CollectionOfScalar(_), value) => matches!(value, stmt::Value::List(_)),
            (_, stmt::Value::List(_)) => matches!(field.ty, FieldTy::Custom(_)),
            _ => true,
        };

        if ok {
            Ok(converted)
        } else {
            Err(mismatch(owner, field, value))
        }
    }
}

fn elements<'a>(owner: &Instance, field: &app::Field, value: &'a Value) -> Result<&'a [Value]> {
    match value {
        Value::List(items) => Ok(items),
        _ => Err(mismatch(owner, field, value)),
    }
}

fn mismatch(owner: &Instance, field: &app::Field, value: &Value) -> Error {
    Error::invalid_instance(format!(
        "{}.{} cannot hold {value:?}",
        owner.ty, field.name
    ))
}
