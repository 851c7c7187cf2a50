use relmap_core::{graph::TypeGraph, Schema};
use relmap_sql::{Flavor, Serializer, Statement};
use std_util::prelude::*;

use pretty_assertions::assert_eq;

fn build(src: &str) -> Schema {
    let graph = assert_ok!(TypeGraph::from_toml(src));
    assert_ok!(Schema::from_graph(&graph))
}

const POSE: &str = r#"
[[types]]
name = "Position"
fields = [
    { name = "x", ty = "int" },
    { name = "y", ty = "int" },
    { name = "z", ty = "int" },
]

[[types]]
name = "Pose"
fields = [
    { name = "position", ty = "Position" },
    { name = "orientation", ty = "Optional[Orientation]" },
]

[[types]]
name = "Orientation"
fields = [{ name = "w", ty = "float" }]
"#;

#[test]
fn create_tables_in_emission_order_sqlite() {
    let schema = build(POSE);
    let sql = Serializer::sqlite(&schema.db).serialize_schema();

    assert_eq!(
        sql,
        [
            "CREATE TABLE \"position\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
             \"x\" INTEGER NOT NULL,\n    \"y\" INTEGER NOT NULL,\n    \"z\" INTEGER NOT NULL\n);",
            "CREATE TABLE \"orientation\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
             \"w\" REAL NOT NULL\n);",
            "CREATE TABLE \"pose\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
             \"position_id\" INTEGER NOT NULL,\n    \"orientation_id\" INTEGER,\n    \
             FOREIGN KEY (\"position_id\") REFERENCES \"position\" (\"id\"),\n    \
             FOREIGN KEY (\"orientation_id\") REFERENCES \"orientation\" (\"id\")\n);",
        ]
    );
}

#[test]
fn create_table_postgresql() {
    let schema = build(POSE);
    let sql = Serializer::postgresql(&schema.db).serialize_schema();

    assert_eq!(
        sql[1],
        "CREATE TABLE \"orientation\" (\n    \"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY,\n    \
         \"w\" DOUBLE PRECISION NOT NULL,\n    PRIMARY KEY (\"id\")\n);"
    );
}

#[test]
fn create_table_mysql() {
    let schema = build(POSE);
    let sql = Serializer::mysql(&schema.db).serialize_schema();

    assert_eq!(
        sql[2],
        "CREATE TABLE `pose` (\n    `id` BIGINT NOT NULL AUTO_INCREMENT,\n    \
         `position_id` BIGINT NOT NULL,\n    `orientation_id` BIGINT,\n    \
         PRIMARY KEY (`id`),\n    \
         FOREIGN KEY (`position_id`) REFERENCES `position` (`id`),\n    \
         FOREIGN KEY (`orientation_id`) REFERENCES `orientation` (`id`)\n);"
    );
}

const ROBOT: &str = r#"
[[types]]
name = "Robot"
fields = [{ name = "base", ty = "Optional[Base]" }]

[[types]]
name = "Base"
fields = [{ name = "robot", ty = "Optional[Robot]" }]
"#;

#[test]
fn deferred_foreign_keys_inline_on_sqlite() {
    let schema = build(ROBOT);
    let stmts = Statement::create_schema(&schema.db, Flavor::Sqlite);

    assert_eq!(stmts.len(), 2);
    assert!(stmts.iter().all(Statement::is_create_table));

    let sql = Serializer::sqlite(&schema.db).serialize_schema();
    assert_eq!(
        sql[0],
        "CREATE TABLE \"robot\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
         \"base_id\" INTEGER,\n    \
         FOREIGN KEY (\"base_id\") REFERENCES \"base\" (\"id\") DEFERRABLE INITIALLY DEFERRED\n);"
    );
    assert!(!sql[1].contains("DEFERRABLE"), "got: {}", sql[1]);
}

#[test]
fn deferred_foreign_keys_trail_on_postgresql() {
    let schema = build(ROBOT);
    let stmts = Statement::create_schema(&schema.db, Flavor::Postgresql);

    assert_eq!(stmts.len(), 3);
    assert!(stmts[2].is_add_foreign_key());

    let sql = Serializer::postgresql(&schema.db).serialize_schema();
    assert!(!sql[0].contains("FOREIGN KEY"), "got: {}", sql[0]);
    assert_eq!(
        sql[2],
        "ALTER TABLE \"robot\" ADD FOREIGN KEY (\"base_id\") REFERENCES \"base\" (\"id\") \
         DEFERRABLE INITIALLY DEFERRED;"
    );
}

#[test]
fn deferred_foreign_keys_trail_on_mysql() {
    let schema = build(ROBOT);
    let sql = Serializer::mysql(&schema.db).serialize_schema();

    assert_eq!(sql.len(), 3);
    assert_eq!(
        sql[2],
        "ALTER TABLE `robot` ADD FOREIGN KEY (`base_id`) REFERENCES `base` (`id`);"
    );
}

#[test]
fn subclass_tables_share_the_parent_key() {
    let schema = build(
        r#"
[[enums]]
name = "Color"
variants = ["Red", "Blue"]

[[types]]
name = "Container"
fields = [{ name = "name", ty = "str" }]

[[types]]
name = "Cup"
bases = ["Container"]
fields = [{ name = "color", ty = "Color" }]
"#,
    );

    let sql = Serializer::sqlite(&schema.db).serialize_schema();
    assert_eq!(
        sql,
        [
            "CREATE TABLE \"container\" (\n    \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
             \"name\" TEXT NOT NULL,\n    \"polymorphic_type\" TEXT NOT NULL\n);",
            "CREATE TABLE \"cup\" (\n    \"id\" INTEGER NOT NULL,\n    \
             \"color\" TEXT NOT NULL CHECK (\"color\" IN ('Red', 'Blue')),\n    \
             PRIMARY KEY (\"id\"),\n    \
             FOREIGN KEY (\"id\") REFERENCES \"container\" (\"id\")\n);",
        ]
    );

    let sql = Serializer::mysql(&schema.db).serialize_schema();
    assert!(
        sql[1].contains("`color` ENUM('Red', 'Blue') NOT NULL,"),
        "got: {}",
        sql[1]
    );
}

#[test]
fn join_tables_are_created_last() {
    let schema = build(
        r#"
[[types]]
name = "Node"
fields = [
    { name = "label", ty = "str" },
    { name = "children", ty = "List[Node]" },
]
"#,
    );

    let sql = Serializer::sqlite(&schema.db).serialize_schema();
    assert_eq!(sql.len(), 2);
    assert_eq!(
        sql[1],
        "CREATE TABLE \"node_children\" (\n    \"node_id\" INTEGER NOT NULL,\n    \
         \"children_node_id\" INTEGER NOT NULL,\n    \
         PRIMARY KEY (\"node_id\", \"children_node_id\"),\n    \
         FOREIGN KEY (\"node_id\") REFERENCES \"node\" (\"id\"),\n    \
         FOREIGN KEY (\"children_node_id\") REFERENCES \"node\" (\"id\")\n);"
    );
}

#[test]
fn collection_columns() {
    let schema = build(
        r#"
[[types]]
name = "Trajectory"
fields = [
    { name = "labels", ty = "List[str]" },
    { name = "recorded", ty = "Optional[datetime]" },
]
"#,
    );

    let sql = Serializer::postgresql(&schema.db).serialize_schema();
    assert_eq!(
        sql[0],
        "CREATE TABLE \"trajectory\" (\n    \"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY,\n    \
         \"labels\" JSONB NOT NULL,\n    \"recorded\" TIMESTAMPTZ,\n    PRIMARY KEY (\"id\")\n);"
    );
}

#[test]
fn flavor_names() {
    assert_eq!(assert_ok!("sqlite".parse::<Flavor>()), Flavor::Sqlite);
    assert_eq!(assert_ok!("postgres".parse::<Flavor>()), Flavor::Postgresql);
    assert_eq!(assert_ok!("mysql".parse::<Flavor>()), Flavor::Mysql);
    assert_err!("oracle".parse::<Flavor>());

    assert_eq!(Flavor::Postgresql.to_string(), "postgresql");
    assert_eq!(Flavor::default(), Flavor::Sqlite);
}
