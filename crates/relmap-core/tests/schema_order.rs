use relmap_core::graph::TypeGraph;
use relmap_core::schema::db::TableRef;
use relmap_core::schema::Schema;
use std_util::prelude::*;

fn build(src: &str) -> Schema {
    let graph = assert_ok!(TypeGraph::from_toml(src));
    assert_ok!(Schema::from_graph(&graph))
}

#[test]
fn mutual_references_defer_one_foreign_key() {
    let schema = build(
        r#"
[[types]]
name = "Robot"
fields = [{ name = "base", ty = "Optional[Base]" }]

[[types]]
name = "Base"
fields = [{ name = "robot", ty = "Optional[Robot]" }]
"#,
    );

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(order, ["robot", "base"]);

    let robot = schema.db.table_by_name("robot").unwrap();
    let base = schema.db.table_by_name("base").unwrap();

    assert!(robot.foreign_keys[0].deferred);
    assert!(!base.foreign_keys[0].deferred);
}

#[test]
fn self_references_never_block() {
    let schema = build(
        r#"
[[types]]
name = "Node"
fields = [
    { name = "value", ty = "int" },
    { name = "parent", ty = "Optional[Node]" },
]
"#,
    );

    let node = schema.db.table_by_name("node").unwrap();
    assert_eq!(node.foreign_keys[0].target, node.id);
    assert!(!node.foreign_keys[0].deferred);
    assert_eq!(schema.db.order, [TableRef::Table(node.id)]);
}

#[test]
fn inheritance_keys_are_never_deferred() {
    let schema = build(
        r#"
[[types]]
name = "Link"
bases = ["Frame"]
fields = [{ name = "child", ty = "Optional[Joint]" }]

[[types]]
name = "Frame"
fields = [{ name = "name", ty = "str" }]

[[types]]
name = "Joint"
bases = ["Frame"]
fields = [{ name = "parent", ty = "Link" }]
"#,
    );

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_eq!(order, ["frame", "link", "joint"]);

    for table in &schema.db.tables {
        for fk in &table.foreign_keys {
            assert!(!(fk.is_inheritance() && fk.deferred), "{}", table.name);
        }
    }

    let link = schema.db.table_by_name("link").unwrap();
    let deferred: Vec<_> = link
        .foreign_keys
        .iter()
        .filter(|fk| fk.deferred)
        .map(|fk| link.column(fk.column).name.as_str())
        .collect();
    assert_eq!(deferred, ["child_id"]);
}

#[test]
fn every_table_is_emitted_once() {
    let schema = build(
        r#"
[[types]]
name = "Scene"
fields = [
    { name = "robots", ty = "List[Robot]" },
    { name = "nodes", ty = "List[Node]", many_to_many = true },
]

[[types]]
name = "Robot"
fields = [{ name = "home", ty = "Optional[Scene]" }]

[[types]]
name = "Node"
fields = [{ name = "children", ty = "List[Node]" }]
"#,
    );

    let order: Vec<_> = schema.db.emission_order().collect();
    assert_unique!(order);
    assert_eq!(
        order.len(),
        schema.db.tables.len() + schema.db.join_tables.len()
    );
    assert_eq!(&order[order.len() - 2..], ["scene_nodes", "node_children"]);
}
