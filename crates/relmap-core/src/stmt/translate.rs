use super::{BinaryOp, Expr, ExprBinaryOp, ExprInList, Filter, Join, Param, Path, Query, Value};
use crate::graph::Primitive;
use crate::schema::{
    app::{self, FieldTy, ModelId},
    db::ColumnId,
    mapping, Schema,
};
use crate::{Error, Result};

struct Translate<'a> {
    schema: &'a Schema,
    root: &'a app::Model,
    params: Vec<Value>,
}

impl Schema {
    /// Translates a predicate written against the type named `root`.
    pub fn translate(&self, root: &str, expr: &Expr) -> Result<Query> {
        let model = self.model_by_name(root)?;
        translate(expr, model.id, self)
    }
}

/// Translates `expr` into a query over the tables storing `root`.
///
/// Each field reference resolves on `root` or one of its ancestors. The
/// schema is only read.
pub fn translate(expr: &Expr, root: impl Into<ModelId>, schema: &Schema) -> Result<Query> {
    let root = schema.app.model(root);

    let mut translate = Translate {
        schema,
        root,
        params: vec![],
    };

    let filter = translate.filter(expr)?;

    let mut joins = vec![];
    let mut lhs = schema.table_for(root.id).primary_key;

    for ancestor in schema.app.ancestry(root.id).skip(1) {
        let table = schema.table_for(ancestor.id);

        joins.push(Join {
            table: table.id,
            lhs,
            rhs: table.primary_key,
        });

        lhs = table.primary_key;
    }

    Ok(Query {
        model: root.id,
        table: schema.table_id_for(root.id),
        joins,
        filter,
        params: translate.params,
    })
}

impl<'a> Translate<'a> {
    fn filter(&mut self, expr: &Expr) -> Result<Filter> {
        Ok(match expr {
            Expr::And(expr_and) => Filter::And(
                expr_and
                    .iter()
                    .map(|operand| self.filter(operand))
                    .collect::<Result<_>>()?,
            ),
            Expr::Or(expr_or) => Filter::Or(
                expr_or
                    .iter()
                    .map(|operand| self.filter(operand))
                    .collect::<Result<_>>()?,
            ),
            Expr::BinaryOp(expr_binary_op) => self.binary_op(expr_binary_op)?,
            Expr::InList(expr_in_list) => self.in_list(expr_in_list)?,
        })
    }

    fn binary_op(&mut self, expr: &ExprBinaryOp) -> Result<Filter> {
        let (field, column) = self.resolve(&expr.path)?;

        if expr.value.is_null() {
            return match expr.op {
                BinaryOp::Eq => Ok(Filter::IsNull {
                    column,
                    negate: false,
                }),
                BinaryOp::Ne => Ok(Filter::IsNull {
                    column,
                    negate: true,
                }),
                op => Err(self.unsupported(format!(
                    "`{}` can only be compared with null using == or !=, not {op}",
                    expr.path
                ))),
            };
        }

        self.check_literal(field, &expr.value)?;

        Ok(Filter::BinaryOp {
            column,
            op: expr.op,
            param: self.push(&expr.value),
        })
    }

    fn in_list(&mut self, expr: &ExprInList) -> Result<Filter> {
        let (field, column) = self.resolve(&expr.path)?;

        for value in &expr.list {
            if value.is_null() {
                return Err(self.unsupported(format!(
                    "membership set for `{}` contains null",
                    expr.path
                )));
            }

            self.check_literal(field, value)?;
        }

        Ok(Filter::InList {
            column,
            params: expr.list.iter().map(|value| self.push(value)).collect(),
        })
    }

    /// Resolves a path to the field and the column storing it.
    fn resolve(&self, path: &Path) -> Result<(&'a app::Field, ColumnId)> {
        let schema: &'a Schema = self.schema;

        let [name, rest @ ..] = path.steps() else {
            return Err(self.unsupported("empty field path"));
        };

        let Some(field) = schema.app.resolve_field(self.root.id, name) else {
            return Err(Error::unmapped_field(&self.root.name.ident, name));
        };

        if field.is_relation() {
            return Err(self.unsupported(format!(
                "`{path}` follows the relationship `{name}`; only fields of {} and its \
                 ancestors can be filtered",
                self.root.name
            )));
        }

        if !rest.is_empty() {
            return Err(self.unsupported(format!("`{name}` has no nested fields")));
        }

        if field.is_collection() {
            return Err(self.unsupported(format!("`{name}` is a collection")));
        }

        match schema.mapping_for(field.id.model).fields[field.id.index] {
            mapping::Field::Column(column) => Ok((field, column)),
            _ => Err(self.unsupported(format!("`{name}` is not stored in a column"))),
        }
    }

    fn check_literal(&self, field: &app::Field, value: &Value) -> Result<()> {
        let ok = match (&field.ty, value) {
            (_, Value::List(_)) => false,
            (FieldTy::Scalar(Primitive::Bool), Value::Bool(_)) => true,
            (FieldTy::Scalar(Primitive::Int), Value::I64(_)) => true,
            (FieldTy::Scalar(Primitive::Float), Value::F64(_) | Value::I64(_)) => true,
            (FieldTy::Scalar(Primitive::String | Primitive::DateTime), Value::String(_)) => true,
            (FieldTy::Enum(id), Value::String(variant)) => {
                let decl = &self.schema.app.enums[id.0];

                if !decl.variants.contains(variant) {
                    return Err(self.unsupported(format!(
                        "`{variant}` is not a variant of {}",
                        decl.name
                    )));
                }

                true
            }
            (FieldTy::TypeRef(_), Value::String(name)) => {
                self.schema.app.model_by_name(name).is_some()
            }
            (FieldTy::Custom(_), _) => true,
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(self.unsupported(format!(
                "`{}` cannot be compared with {value:?}",
                field.name
            )))
        }
    }

    fn push(&mut self, value: &Value) -> Param {
        self.params.push(value.clone());
        Param(self.params.len() - 1)
    }

    fn unsupported(&self, message: impl Into<String>) -> Error {
        Error::unsupported_expression(&self.root.name.ident, message)
    }
}
