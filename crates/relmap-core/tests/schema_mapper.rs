use relmap_core::graph::TypeGraph;
use relmap_core::schema::db::{self, ForeignKeyKind, Table};
use relmap_core::schema::{mapping, Schema};
use std_util::prelude::*;

fn build(src: &str) -> Schema {
    let graph = assert_ok!(TypeGraph::from_toml(src));
    assert_ok!(Schema::from_graph(&graph))
}

fn table<'a>(schema: &'a Schema, name: &str) -> &'a Table {
    schema
        .db
        .table_by_name(name)
        .unwrap_or_else(|| panic!("no table `{name}`"))
}

fn column_names(table: &Table) -> Vec<&str> {
    table.columns.iter().map(|column| column.name.as_str()).collect()
}

const POSE: &str = r#"
[[types]]
name = "Pose"
fields = [
    { name = "position", ty = "Position" },
    { name = "orientation", ty = "Optional[Orientation]" },
]

[[types]]
name = "Position"
fields = [
    { name = "x", ty = "int" },
    { name = "y", ty = "int" },
    { name = "z", ty = "int" },
]

[[types]]
name = "Orientation"
fields = [
    { name = "x", ty = "float" },
    { name = "y", ty = "float" },
    { name = "z", ty = "float" },
    { name = "w", ty = "float" },
]
"#;

const CONTAINERS: &str = r#"
[[types]]
name = "Container"
fields = [{ name = "name", ty = "str" }]

[[types]]
name = "Cup"
bases = ["Container"]
fields = [{ name = "volume", ty = "float" }]

[[types]]
name = "Mug"
bases = ["Cup"]
fields = [{ name = "handle", ty = "bool" }]

[[types]]
name = "Plate"
fields = [{ name = "diameter", ty = "float" }]
"#;

#[test]
fn nested_types_become_foreign_keys() {
    let schema = build(POSE);

    let position = table(&schema, "position");
    assert_eq!(column_names(position), ["id", "x", "y", "z"]);
    assert!(position.columns.iter().all(|column| !column.nullable));

    let id = position.primary_key_column();
    assert_eq!(id.name, "id");
    assert_eq!(id.ty, db::Type::Integer);
    assert!(id.primary_key);
    assert!(id.auto_increment);

    let pose = table(&schema, "pose");
    assert_eq!(column_names(pose), ["id", "position_id", "orientation_id"]);
    assert!(!pose.column_by_name("position_id").unwrap().nullable);
    assert!(pose.column_by_name("orientation_id").unwrap().nullable);

    let targets: Vec<_> = pose
        .foreign_keys
        .iter()
        .map(|fk| (schema.db.table(fk.target).name.as_str(), fk.kind))
        .collect();
    assert_eq!(
        targets,
        [
            ("position", ForeignKeyKind::Reference),
            ("orientation", ForeignKeyKind::Reference),
        ]
    );

    assert_empty!(schema.warnings);
    assert_empty!(schema.db.join_tables);
}

#[test]
fn referenced_tables_are_emitted_first() {
    let schema = build(POSE);

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(order, ["position", "orientation", "pose"]);
    assert!(schema
        .db
        .tables
        .iter()
        .flat_map(|table| &table.foreign_keys)
        .all(|fk| !fk.deferred));
}

#[test]
fn self_referencing_collection_uses_a_join_table() {
    let schema = build(
        r#"
[[types]]
name = "Node"
fields = [{ name = "children", ty = "List[Node]" }]
"#,
    );

    let node = table(&schema, "node");
    assert_eq!(column_names(node), ["id"]);

    let join_table = assert_ok!(schema
        .db
        .join_table_by_name("node_children")
        .ok_or("missing join table"));
    assert_eq!(join_table.owner().name, "node_id");
    assert_eq!(join_table.element().name, "children_node_id");
    assert_eq!(join_table.owner().target, node.id);
    assert_eq!(join_table.element().target, node.id);

    let model = schema.app.model_by_name("Node").unwrap();
    assert_eq!(
        schema.mapping_for(model).fields[0],
        mapping::Field::ManyToMany(join_table.id)
    );

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(order, ["node", "node_children"]);
}

#[test]
fn single_owner_collection_is_one_to_many() {
    let schema = build(
        r#"
[[types]]
name = "Atom"
fields = [{ name = "charge", ty = "int" }]

[[types]]
name = "Molecule"
fields = [{ name = "atoms", ty = "List[Atom]" }]
"#,
    );

    let atom = table(&schema, "atom");
    let molecule = table(&schema, "molecule");

    assert_eq!(column_names(atom), ["id", "charge", "molecule_atoms_id"]);

    let back_reference = atom.column_by_name("molecule_atoms_id").unwrap();
    assert!(back_reference.nullable);

    let fk = atom.foreign_key(back_reference.id).unwrap();
    assert_eq!(fk.target, molecule.id);
    assert_eq!(fk.kind, ForeignKeyKind::BackReference);

    let model = schema.app.model_by_name("Molecule").unwrap();
    assert_eq!(
        schema.mapping_for(model).fields[0],
        mapping::Field::OneToMany {
            table: atom.id,
            column: back_reference.id,
        }
    );

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(order, ["molecule", "atom"]);
}

#[test]
fn shared_element_type_falls_back_to_join_tables() {
    let schema = build(
        r#"
[[types]]
name = "Position"
fields = [{ name = "x", ty = "int" }]

[[types]]
name = "Positions"
fields = [{ name = "items", ty = "List[Position]" }]

[[types]]
name = "Trajectory"
fields = [{ name = "points", ty = "List[Position]" }]
"#,
    );

    assert_eq!(schema.warnings.len(), 2);
    assert!(schema.warnings.iter().all(|w| w.is_relationship_ambiguity()));
    assert_eq!(
        schema.warnings[0].to_string(),
        "relationship ambiguity: Positions.items -> Position has 2 owning fields; using a \
         join table"
    );

    let names: Vec<_> = schema
        .db
        .join_tables
        .iter()
        .map(|table| table.name.as_str())
        .collect();
    assert_eq!(names, ["positions_items", "trajectory_points"]);

    let position = table(&schema, "position");
    assert_eq!(column_names(position), ["id", "x"]);
}

#[test]
fn declared_many_to_many_uses_a_join_table() {
    let schema = build(
        r#"
[[types]]
name = "Atom"

[[types]]
name = "Molecule"
fields = [{ name = "atoms", ty = "List[Atom]", many_to_many = true }]
"#,
    );

    let join_table = schema.db.join_table_by_name("molecule_atoms").unwrap();
    assert_eq!(join_table.owner().name, "molecule_id");
    assert_eq!(join_table.element().name, "atom_id");
    assert_empty!(schema.warnings);
}

#[test]
fn nested_references_make_an_element_shared() {
    let schema = build(
        r#"
[[types]]
name = "Position"
fields = [{ name = "x", ty = "int" }]

[[types]]
name = "Pose"
fields = [{ name = "position", ty = "Position" }]

[[types]]
name = "Trajectory"
fields = [{ name = "points", ty = "List[Position]" }]
"#,
    );

    assert_eq!(schema.warnings.len(), 1);
    assert_eq!(
        schema.warnings[0].to_string(),
        "relationship ambiguity: Trajectory.points -> Position has 2 owning fields; using a \
         join table"
    );

    let join_table = schema.db.join_table_by_name("trajectory_points").unwrap();
    assert_eq!(join_table.owner().name, "trajectory_id");
    assert_eq!(join_table.element().name, "position_id");

    assert_eq!(column_names(table(&schema, "position")), ["id", "x"]);
    assert_eq!(column_names(table(&schema, "pose")), ["id", "position_id"]);
}

#[test]
fn references_to_an_ancestor_share_its_subclasses() {
    let schema = build(
        r#"
[[types]]
name = "Container"
fields = [{ name = "name", ty = "str" }]

[[types]]
name = "Cup"
bases = ["Container"]
fields = [{ name = "volume", ty = "float" }]

[[types]]
name = "Shelf"
fields = [{ name = "featured", ty = "Optional[Container]" }]

[[types]]
name = "Rack"
fields = [{ name = "cups", ty = "List[Cup]" }]
"#,
    );

    assert_eq!(schema.warnings.len(), 1);
    assert!(schema.warnings[0].is_relationship_ambiguity());
    assert!(schema.db.join_table_by_name("rack_cups").is_some());
    assert_eq!(column_names(table(&schema, "cup")), ["id", "volume"]);
}

#[test]
fn generated_columns_avoid_declared_field_names() {
    let schema = build(
        r#"
[[types]]
name = "Robot"
fields = [{ name = "id", ty = "str" }]

[[types]]
name = "Position"
fields = [{ name = "x", ty = "int" }]

[[types]]
name = "Pose"
fields = [
    { name = "position", ty = "Position" },
    { name = "position_id", ty = "int" },
]

[[types]]
name = "Container"
fields = [{ name = "polymorphic_type", ty = "str" }]

[[types]]
name = "Cup"
bases = ["Container"]

[[types]]
name = "Atom"
fields = [{ name = "molecule_atoms_id", ty = "int" }]

[[types]]
name = "Molecule"
fields = [{ name = "atoms", ty = "List[Atom]" }]
"#,
    );

    let robot = table(&schema, "robot");
    assert_eq!(column_names(robot), ["id_1", "id"]);
    assert_eq!(robot.primary_key_column().name, "id_1");
    assert_eq!(robot.column_by_name("id").unwrap().ty, db::Type::Text);

    let pose = table(&schema, "pose");
    assert_eq!(column_names(pose), ["id", "position_id_1", "position_id"]);
    let model = schema.app.model_by_name("Pose").unwrap();
    assert_eq!(
        schema.mapping_for(model).fields,
        [
            mapping::Field::ForeignKey(pose.column_by_name("position_id_1").unwrap().id),
            mapping::Field::Column(pose.column_by_name("position_id").unwrap().id),
        ]
    );

    let container = table(&schema, "container");
    assert_eq!(
        column_names(container),
        ["id", "polymorphic_type", "polymorphic_type_1"]
    );
    assert_eq!(
        container.column(container.discriminator.unwrap()).name,
        "polymorphic_type_1"
    );

    let atom = table(&schema, "atom");
    assert_eq!(
        column_names(atom),
        ["id", "molecule_atoms_id", "molecule_atoms_id_1"]
    );
    let back_reference = atom.column_by_name("molecule_atoms_id_1").unwrap();
    assert_eq!(
        atom.foreign_key(back_reference.id).unwrap().kind,
        ForeignKeyKind::BackReference
    );
}

#[test]
fn join_tables_avoid_declared_table_names() {
    let schema = build(
        r#"
[[types]]
name = "Node"
fields = [{ name = "children", ty = "List[Node]" }]

[[types]]
name = "NodeChildren"
fields = [{ name = "n", ty = "int" }]
"#,
    );

    assert_eq!(column_names(table(&schema, "node_children")), ["id", "n"]);

    let join_table = schema.db.join_table_by_name("node_children_1").unwrap();
    assert_eq!(join_table.owner().name, "node_id");
    assert_eq!(join_table.element().name, "children_node_id");

    let names: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(names, ["node", "node_children", "node_children_1"]);
}

#[test]
fn joined_table_inheritance() {
    let schema = build(CONTAINERS);

    let container = table(&schema, "container");
    let cup = table(&schema, "cup");
    let mug = table(&schema, "mug");

    assert_eq!(column_names(container), ["id", "name", "polymorphic_type"]);
    assert_eq!(column_names(cup), ["id", "volume"]);
    assert_eq!(column_names(mug), ["id", "handle"]);

    let discriminator = container.column(container.discriminator.unwrap());
    assert_eq!(discriminator.name, "polymorphic_type");
    assert_eq!(discriminator.ty, db::Type::Text);
    assert!(!discriminator.nullable);

    assert!(container.primary_key_column().auto_increment);
    assert!(!cup.primary_key_column().auto_increment);

    assert_eq!(cup.parent(), Some(container.id));
    assert_eq!(mug.parent(), Some(cup.id));
    assert_eq!(cup.foreign_keys[0].column, cup.primary_key);
    assert!(cup.foreign_keys[0].is_inheritance());

    assert_none!(table(&schema, "plate").discriminator);
}

#[test]
fn polymorphic_identities() {
    let schema = build(CONTAINERS);
    let container = table(&schema, "container");

    for name in ["Container", "Cup", "Mug"] {
        let model = schema.app.model_by_name(name).unwrap();
        let discriminator = schema.mapping_for(model).discriminator.clone().unwrap();

        assert_eq!(discriminator.column, container.discriminator.unwrap());
        assert_eq!(discriminator.value, name);
    }

    let plate = schema.app.model_by_name("Plate").unwrap();
    assert_none!(schema.mapping_for(plate).discriminator);
}

#[test]
fn cyclic_hierarchy_is_fatal() {
    let graph = assert_ok!(TypeGraph::from_toml(
        r#"
[[types]]
name = "A"
bases = ["B"]

[[types]]
name = "B"
bases = ["A"]
"#,
    ));

    let err = assert_err!(Schema::from_graph(&graph));
    assert!(err.is_hierarchy_error());
    assert_eq!(err.to_string(), "cyclic hierarchy: A -> B -> A");
}

#[test]
fn enum_and_collection_columns() {
    let schema = build(
        r#"
[[enums]]
name = "Element"
variants = ["C", "H"]

[[types]]
name = "Atom"
fields = [
    { name = "element", ty = "Element" },
    { name = "kind", ty = "Type[Atom]" },
    { name = "labels", ty = "List[str]" },
    { name = "seen", ty = "Optional[datetime]" },
]
"#,
    );

    let atom = table(&schema, "atom");
    let types: Vec<_> = atom.columns.iter().map(|c| c.ty.clone()).collect();

    assert_eq!(
        types,
        [
            db::Type::Integer,
            db::Type::Enum {
                name: "Element".to_string(),
                variants: vec!["C".to_string(), "H".to_string()],
            },
            db::Type::Text,
            db::Type::Json,
            db::Type::DateTime,
        ]
    );
    assert!(atom.column_by_name("seen").unwrap().nullable);
}

#[test]
fn builder_options() {
    let graph = assert_ok!(TypeGraph::from_toml(CONTAINERS));
    let schema = assert_ok!(Schema::builder()
        .table_name_prefix("app_")
        .primary_key_name("pk")
        .discriminator_column("kind")
        .build(&graph));

    let container = table(&schema, "app_container");
    assert_eq!(column_names(container), ["pk", "name", "kind"]);

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(order, ["app_container", "app_cup", "app_mug", "app_plate"]);
}

#[test]
fn mapping_is_deterministic() {
    let graph = assert_ok!(TypeGraph::from_toml(POSE));

    let first = assert_ok!(Schema::from_graph(&graph));
    let second = assert_ok!(Schema::from_graph(&graph));

    assert_eq!(first.db, second.db);

    let names: Vec<_> = first.db.tables.iter().map(|t| t.name.clone()).collect();
    assert_unique!(names);
}

#[test]
fn failed_mapping_returns_no_schema() {
    let graph = assert_ok!(TypeGraph::from_toml(
        r#"
[[types]]
name = "Position"
fields = [{ name = "x", ty = "int" }]

[[types]]
name = "Grid"
fields = [{ name = "cells", ty = "List[List[Position]]" }]
"#,
    ));

    let err = assert_err!(Schema::from_graph(&graph));
    assert!(err.is_shape_error());
}
