use relmap_core::graph::TypeGraph;
use relmap_core::schema::{Schema, SchemaHandle};
use relmap_core::stmt::Expr;
use std_util::prelude::*;

use std::sync::Arc;

fn build(src: &str) -> Schema {
    let graph = assert_ok!(TypeGraph::from_toml(src));
    assert_ok!(Schema::from_graph(&graph))
}

const V1: &str = r#"
[[types]]
name = "Position"
fields = [{ name = "x", ty = "int" }]
"#;

const V2: &str = r#"
[[types]]
name = "Position"
fields = [
    { name = "x", ty = "int" },
    { name = "y", ty = "int" },
]
"#;

#[test]
fn snapshots_survive_publishing() {
    let handle = SchemaHandle::new(build(V1));
    let before = handle.load();

    let previous = handle.publish(build(V2));
    assert!(Arc::ptr_eq(&before, &previous));

    let after = handle.load();
    assert_eq!(before.db.tables[0].columns.len(), 2);
    assert_eq!(after.db.tables[0].columns.len(), 3);

    // Queries against the old snapshot still see the old columns
    assert_err!(before.translate("Position", &Expr::eq("y", 1)));
    assert_ok!(after.translate("Position", &Expr::eq("y", 1)));
}

#[test]
fn readers_on_other_threads() {
    let handle = SchemaHandle::new(build(V1));

    std::thread::scope(|scope| {
        let snapshot = handle.load();

        scope.spawn(|| handle.publish(build(V2)));

        let reader = scope.spawn(move || snapshot.db.tables[0].columns.len());
        assert_eq!(reader.join().unwrap(), 2);
    });

    assert_eq!(handle.load().db.tables[0].columns.len(), 3);
}
