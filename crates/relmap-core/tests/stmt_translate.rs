use relmap_core::graph::TypeGraph;
use relmap_core::schema::db::ColumnId;
use relmap_core::schema::Schema;
use relmap_core::stmt::{self, BinaryOp, Expr, Filter, Join, Param, Value};
use std_util::prelude::*;

use std::sync::Arc;

const SRC: &str = r#"
[[enums]]
name = "Color"
variants = ["Red", "Blue"]

[[types]]
name = "Position"
fields = [
    { name = "x", ty = "int" },
    { name = "y", ty = "int" },
    { name = "z", ty = "int" },
]

[[types]]
name = "Pose"
fields = [{ name = "position", ty = "Position" }]

[[types]]
name = "Positions"
fields = [
    { name = "items", ty = "List[Position]" },
    { name = "tags", ty = "List[str]" },
]

[[types]]
name = "Container"
fields = [
    { name = "name", ty = "str" },
    { name = "volume", ty = "Optional[float]" },
]

[[types]]
name = "Cup"
bases = ["Container"]
fields = [
    { name = "handle", ty = "bool" },
    { name = "color", ty = "Color" },
]
"#;

fn schema() -> Schema {
    let graph = assert_ok!(TypeGraph::from_toml(SRC));
    assert_ok!(Schema::from_graph(&graph))
}

fn column(schema: &Schema, table: &str, column: &str) -> ColumnId {
    schema
        .db
        .table_by_name(table)
        .and_then(|table| table.column_by_name(column))
        .map(|column| column.id)
        .unwrap_or_else(|| panic!("no column {table}.{column}"))
}

#[test]
fn or_of_comparisons() {
    let schema = schema();
    let expr = Expr::or(Expr::gt("z", 3), Expr::eq("x", 2));

    let query = assert_ok!(schema.translate("Position", &expr));

    assert_eq!(query.table, schema.db.table_by_name("position").unwrap().id);
    assert_empty!(query.joins);
    assert_eq!(
        query.filter,
        Filter::Or(vec![
            Filter::BinaryOp {
                column: column(&schema, "position", "z"),
                op: BinaryOp::Gt,
                param: Param(0),
            },
            Filter::BinaryOp {
                column: column(&schema, "position", "x"),
                op: BinaryOp::Eq,
                param: Param(1),
            },
        ])
    );
    assert_eq!(query.params, [Value::I64(3), Value::I64(2)]);
}

#[test]
fn membership_is_a_single_predicate() {
    let schema = schema();
    let query = assert_ok!(schema.translate("Position", &Expr::in_list("x", [1, 7])));

    assert_eq!(
        query.filter,
        Filter::InList {
            column: column(&schema, "position", "x"),
            params: vec![Param(0), Param(1)],
        }
    );
    assert_eq!(query.params, [Value::I64(1), Value::I64(7)]);
}

#[test]
fn empty_membership_has_no_params() {
    let schema = schema();
    let expr = Expr::in_list("x", Vec::<i64>::new());
    let query = assert_ok!(schema.translate("Position", &expr));

    assert_eq!(
        query.filter,
        Filter::InList {
            column: column(&schema, "position", "x"),
            params: vec![],
        }
    );
    assert_empty!(query.params);
}

#[test]
fn and_or_structure_is_preserved() {
    let schema = schema();
    let expr = Expr::and(
        Expr::or(Expr::lt("x", 0), Expr::ge("x", 10)),
        Expr::ne("y", 5),
    );

    let query = assert_ok!(schema.translate("Position", &expr));

    let Filter::And(operands) = &query.filter else {
        panic!("expected AND; actual={:?}", query.filter);
    };
    assert_eq!(operands.len(), 2);
    assert!(matches!(&operands[0], Filter::Or(inner) if inner.len() == 2));
    assert_eq!(query.params, [Value::I64(0), Value::I64(10), Value::I64(5)]);
}

#[test]
fn inherited_fields_resolve_on_ancestor_tables() {
    let schema = schema();
    let expr = Expr::and(Expr::eq("name", "mug"), Expr::eq("handle", true));

    let query = assert_ok!(schema.translate("Cup", &expr));

    let cup = schema.db.table_by_name("cup").unwrap();
    let container = schema.db.table_by_name("container").unwrap();

    assert_eq!(query.table, cup.id);
    assert_eq!(
        query.joins,
        [Join {
            table: container.id,
            lhs: cup.primary_key,
            rhs: container.primary_key,
        }]
    );
    assert_eq!(
        query.filter.columns(),
        [
            column(&schema, "container", "name"),
            column(&schema, "cup", "handle"),
        ]
    );
}

#[test]
fn null_comparisons() {
    let schema = schema();
    let volume = column(&schema, "container", "volume");

    let query = assert_ok!(schema.translate("Container", &Expr::eq("volume", Value::Null)));
    assert_eq!(
        query.filter,
        Filter::IsNull {
            column: volume,
            negate: false,
        }
    );
    assert_empty!(query.params);

    let query = assert_ok!(schema.translate("Container", &Expr::ne("volume", Value::Null)));
    assert_eq!(
        query.filter,
        Filter::IsNull {
            column: volume,
            negate: true,
        }
    );

    let err = assert_err!(schema.translate("Container", &Expr::lt("volume", Value::Null)));
    assert!(err.is_unsupported_expression());
}

#[test]
fn unmapped_field() {
    let schema = schema();

    let err = assert_err!(schema.translate("Position", &Expr::eq("q", 1)));
    assert!(err.is_unmapped_field());
    assert!(err.is_translation_error());
    assert_eq!(
        err.to_string(),
        "unmapped field: Position has no mapped field `q`"
    );

    // Subclass fields are not visible from the superclass
    let err = assert_err!(schema.translate("Container", &Expr::eq("handle", true)));
    assert!(err.is_unmapped_field());
}

#[test]
fn cross_entity_paths_are_unsupported() {
    let schema = schema();

    let err = assert_err!(schema.translate("Pose", &Expr::eq("position.x", 1)));
    assert!(err.is_unsupported_expression());
    assert!(err.is_translation_error());

    let err = assert_err!(schema.translate("Pose", &Expr::eq("position", 1)));
    assert!(err.is_unsupported_expression());

    let err = assert_err!(schema.translate("Positions", &Expr::eq("tags", "a")));
    assert!(err.is_unsupported_expression());

    let err = assert_err!(schema.translate("Position", &Expr::eq("x.y", 1)));
    assert!(err.is_unsupported_expression());
}

#[test]
fn enum_variants_are_checked() {
    let schema = schema();

    let query = assert_ok!(schema.translate("Cup", &Expr::in_list("color", ["Red", "Blue"])));
    assert_eq!(
        query.params,
        [Value::String("Red".into()), Value::String("Blue".into())]
    );

    let err = assert_err!(schema.translate("Cup", &Expr::eq("color", "Purple")));
    assert!(err.is_unsupported_expression());
    assert_eq!(
        err.to_string(),
        "unsupported expression on Cup: `Purple` is not a variant of Color"
    );
}

#[test]
fn literal_types_are_checked() {
    let schema = schema();

    assert_err!(schema.translate("Position", &Expr::eq("x", "two")));
    assert_err!(schema.translate("Container", &Expr::gt("name", 1)));
    assert_err!(schema.translate("Position", &Expr::in_list("x", [Value::I64(1), Value::Null])));

    // Integers widen to floats
    assert_ok!(schema.translate("Container", &Expr::gt("volume", 1)));
}

#[test]
fn unknown_root_type() {
    let schema = schema();
    assert_err!(schema.translate("Nope", &Expr::eq("x", 1)));
}

#[test]
fn filters_deserialize_from_json() {
    let json = r#"{
        "or": [
            { "binary_op": { "path": "z", "op": ">", "value": 3 } },
            { "binary_op": { "path": "x", "op": "==", "value": 2 } }
        ]
    }"#;

    let expr: Expr = serde_json::from_str(json).unwrap();
    assert_eq!(expr, Expr::or(Expr::gt("z", 3), Expr::eq("x", 2)));

    let json = r#"{ "in_list": { "path": "x", "list": [1, 7] } }"#;
    let expr: Expr = serde_json::from_str(json).unwrap();
    assert_eq!(expr, Expr::in_list("x", [1, 7]));
}

#[test]
fn translation_shares_the_schema_across_threads() {
    let schema = Arc::new(schema());

    std::thread::scope(|scope| {
        for z in 0..4 {
            let schema = schema.clone();
            scope.spawn(move || {
                let query = stmt::translate(
                    &Expr::gt("z", z),
                    schema.app.model_by_name("Position").unwrap(),
                    &schema,
                )
                .unwrap();
                assert_eq!(query.params, [Value::I64(z.into())]);
            });
        }
    });
}
