use super::{table::column_name, BuildSchema};
use crate::schema::{
    app::{Field, FieldTy, Model, ModelId},
    db::{self, ForeignKey, ForeignKeyKind, JoinColumn, JoinTable, JoinTableId},
    mapping,
};
use crate::Error;

use indexmap::IndexMap;

impl BuildSchema<'_> {
    /// Counts, per model, the fields that could own an instance of it.
    ///
    /// Every relationship field counts toward its target. A field pointing
    /// at an ancestor can also hold the model, so it counts too.
    pub(super) fn owner_counts(&self) -> IndexMap<ModelId, usize> {
        let mut references: IndexMap<ModelId, usize> = IndexMap::new();

        for model in self.app.models() {
            for target in model.fields.iter().filter_map(Field::target) {
                *references.entry(target).or_insert(0) += 1;
            }
        }

        self.app
            .models()
            .map(|model| {
                let owners: usize = self
                    .app
                    .ancestry(model.id)
                    .map(|ancestor| references.get(&ancestor.id).copied().unwrap_or(0))
                    .sum();

                (model.id, owners)
            })
            .collect()
    }

    /// Maps the collection-of-composite fields of `model` to either a
    /// back-reference column on the element table or a join table.
    pub(super) fn build_relations(&mut self, model: &Model, owners: &IndexMap<ModelId, usize>) {
        let app = self.app;

        for field in &model.fields {
            let mapped = match &field.ty {
                FieldTy::NestedMany(rel) => {
                    log::debug!("{}.{}: declared many-to-many", model.name, field.name);
                    self.build_join_table(model, field, rel.target)
                }
                FieldTy::CollectionOfComposite(rel) => {
                    let owner_count = owners.get(&rel.target).copied().unwrap_or(0);

                    if app.root(model.id).id == app.root(rel.target).id {
                        log::debug!(
                            "{}.{}: element shares the owner's hierarchy; using a join table",
                            model.name,
                            field.name
                        );
                        self.build_join_table(model, field, rel.target)
                    } else if owner_count > 1 {
                        let warning = Error::relationship_ambiguity(
                            &model.name.ident,
                            &field.name,
                            &app.model(rel.target).name.ident,
                            owner_count,
                        );
                        log::warn!("{warning}");
                        self.warnings.push(warning);
                        self.build_join_table(model, field, rel.target)
                    } else {
                        self.build_back_reference(model, field, rel.target)
                    }
                }
                _ => continue,
            };

            if let Some(fields) = self.fields.get_mut(&model.id) {
                fields[field.id.index] = Some(mapped);
            }
        }
    }

    fn build_back_reference(
        &mut self,
        model: &Model,
        field: &Field,
        target: ModelId,
    ) -> mapping::Field {
        let owner = self.table_for(model.id);
        let table = self.table_for(target);

        let name = column_name(
            &self.tables[table.0],
            self.app.model(target),
            format!(
                "{}_{}{}",
                self.tables[owner.0].name, field.name, self.builder.foreign_key_suffix
            ),
        );

        log::debug!(
            "{}.{}: one-to-many via `{}.{}`",
            model.name,
            field.name,
            self.tables[table.0].name,
            name
        );

        let column = self.tables[table.0].push_column(name, db::Type::Integer, true);

        self.tables[table.0].foreign_keys.push(ForeignKey {
            column,
            target: owner,
            kind: ForeignKeyKind::BackReference,
            deferred: false,
        });

        mapping::Field::OneToMany { table, column }
    }

    fn build_join_table(&mut self, model: &Model, field: &Field, target: ModelId) -> mapping::Field {
        let owner = self.table_for(model.id);
        let element = self.table_for(target);
        let suffix = &self.builder.foreign_key_suffix;

        let owner_name = &self.tables[owner.0].name;
        let element_name = &self.tables[element.0].name;

        let owner_column = format!("{owner_name}{suffix}");
        let mut element_column = format!("{element_name}{suffix}");

        if owner_column == element_column {
            element_column = format!("{}_{element_name}{suffix}", field.name);
        }

        let id = JoinTableId(self.join_tables.len());
        let name = self.table_name(format!("{owner_name}_{}", field.name));

        log::debug!("{}.{}: many-to-many via `{name}`", model.name, field.name);

        self.join_tables.push(JoinTable {
            id,
            name,
            columns: [
                JoinColumn {
                    name: owner_column,
                    target: owner,
                    ty: db::Type::Integer,
                },
                JoinColumn {
                    name: element_column,
                    target: element,
                    ty: db::Type::Integer,
                },
            ],
        });

        mapping::Field::ManyToMany(id)
    }
}
