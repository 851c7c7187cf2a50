use super::BuildSchema;
use crate::schema::{
    app::{self, FieldTy, Model, ModelId},
    db::{self, ColumnId, ForeignKey, ForeignKeyKind, Table, TableId},
    mapping, Name,
};

impl BuildSchema<'_> {
    /// Returns the table storing `id`, creating it on first request.
    ///
    /// A new table holds only its primary key and, for subclasses, the
    /// inheritance foreign key to the parent's table.
    pub(super) fn table_for(&mut self, id: ModelId) -> TableId {
        if let Some(table) = self.table_lookup.get(&id) {
            return *table;
        }

        let app = self.app;
        let model = app.model(id);
        let parent = model.parent.map(|parent| self.table_for(parent));

        let table_id = TableId(self.tables.len());
        let name = self.table_name(self.table_name_from_model(&model.name));
        let mut table = Table::new(table_id, name);

        let pk_name = column_name(&table, model, self.builder.primary_key_name.clone());
        let pk = table.push_column(pk_name, db::Type::Integer, false);
        table.primary_key = pk;

        let column = &mut table.columns[pk.index];
        column.primary_key = true;
        column.auto_increment = parent.is_none();

        if let Some(parent) = parent {
            table.foreign_keys.push(ForeignKey {
                column: pk,
                target: parent,
                kind: ForeignKeyKind::Inheritance,
                deferred: false,
            });
        }

        log::debug!("{}: mapped to table `{}`", model.name, table.name);

        self.tables.push(table);
        self.table_lookup.insert(id, table_id);
        self.mapping.models.insert(
            id,
            mapping::Model {
                id,
                table: table_id,
                fields: vec![],
                discriminator: None,
            },
        );

        table_id
    }

    /// Adds a column for every field stored on the model's own table, and
    /// the discriminator column on polymorphic roots.
    ///
    /// Collection-of-composite fields are left for the relation pass.
    pub(super) fn build_columns(&mut self, model: &Model) {
        let app = self.app;
        let table = self.table_for(model.id);
        let mut fields = Vec::with_capacity(model.fields.len());

        for field in &model.fields {
            let mapped = match &field.ty {
                FieldTy::Scalar(primitive) => {
                    let ty = db::Type::from_primitive(*primitive);
                    Some(mapping::Field::Column(self.push_column(table, field, ty)))
                }
                FieldTy::Enum(id) => {
                    let decl = &app.enums[id.0];
                    let ty = db::Type::Enum {
                        name: decl.name.clone(),
                        variants: decl.variants.clone(),
                    };
                    Some(mapping::Field::Column(self.push_column(table, field, ty)))
                }
                FieldTy::TypeRef(_) => Some(mapping::Field::Column(self.push_column(
                    table,
                    field,
                    db::Type::Text,
                ))),
                FieldTy::Custom(custom) => Some(mapping::Field::Column(self.push_column(
                    table,
                    field,
                    custom.storage_ty.clone(),
                ))),
                FieldTy::CollectionOfScalar(_) => Some(mapping::Field::Column(self.push_column(
                    table,
                    field,
                    db::Type::Json,
                ))),
                FieldTy::NestedOne(target) => {
                    let target = self.table_for(*target);
                    let name = column_name(
                        &self.tables[table.0],
                        model,
                        format!("{}{}", field.name, self.builder.foreign_key_suffix),
                    );
                    let column =
                        self.tables[table.0].push_column(name, db::Type::Integer, field.nullable);

                    self.tables[table.0].foreign_keys.push(ForeignKey {
                        column,
                        target,
                        kind: ForeignKeyKind::Reference,
                        deferred: false,
                    });

                    Some(mapping::Field::ForeignKey(column))
                }
                FieldTy::NestedMany(_) | FieldTy::CollectionOfComposite(_) => None,
            };

            log::trace!("{}.{}: {:?} -> {:?}", model.name, field.name, field.kind(), mapped);
            fields.push(mapped);
        }

        if model.polymorphic {
            let name = column_name(
                &self.tables[table.0],
                model,
                self.builder.discriminator_column.clone(),
            );
            let table = &mut self.tables[table.0];
            table.discriminator = Some(table.push_column(name, db::Type::Text, false));
        }

        self.fields.insert(model.id, fields);
    }

    fn push_column(&mut self, table: TableId, field: &app::Field, ty: db::Type) -> ColumnId {
        self.tables[table.0].push_column(field.name.clone(), ty, field.nullable)
    }

    pub(super) fn table_name_from_model(&self, model_name: &Name) -> String {
        self.prefix_table_name(&model_name.snake_case())
    }

    /// Returns `base`, renamed if a table or join table already uses it.
    pub(super) fn table_name(&self, base: String) -> String {
        let name = unique_name(&base, |name| {
            self.tables.iter().any(|table| table.name == name)
                || self.join_tables.iter().any(|table| table.name == name)
        });

        if name != base {
            log::info!("table name `{base}` is taken; using `{name}`");
        }

        name
    }

    fn prefix_table_name(&self, name: &str) -> String {
        if let Some(prefix) = &self.builder.table_name_prefix {
            format!("{prefix}{name}")
        } else {
            name.to_string()
        }
    }
}

/// Names a generated column on the table storing `model`.
///
/// Declared fields keep their names; a generated column that would clash
/// with one of them, or with a column already on the table, is renamed.
pub(super) fn column_name(table: &Table, model: &Model, base: String) -> String {
    let name = unique_name(&base, |name| {
        table.column_by_name(name).is_some()
            || model
                .fields
                .iter()
                .any(|field| !field.is_relation() && field.name == name)
    });

    if name != base {
        log::info!(
            "{}: generated column name `{base}` is taken; using `{name}`",
            model.name
        );
    }

    name
}

/// Returns `base`, or `base_N` for the lowest `N` that is not taken.
fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }

    let mut n = 1;

    loop {
        let name = format!("{base}_{n}");

        if !taken(&name) {
            return name;
        }

        n += 1;
    }
}
