use super::{Comma, Delimited, Params, Parens, ToSql};

use crate::stmt::{self, Filter};
use relmap_core::schema::db::ColumnId;

/// A table qualified column name
pub(super) struct ColumnRef(pub(super) ColumnId);

/// A filter, with access to the query's literals
pub(super) struct Predicate<'a> {
    pub(super) query: &'a stmt::Query,
    pub(super) filter: &'a Filter,
}

impl ToSql for ColumnRef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let serializer = f.serializer;
        fmt!(f, serializer.table_name(self.0.table) "." serializer.column_name(self.0));
    }
}

impl<'a> Predicate<'a> {
    fn operands(&self, operands: &'a [Filter]) -> impl Iterator<Item = Parens<Predicate<'a>>> {
        let query = self.query;

        operands
            .iter()
            .map(move |filter| Parens(Predicate { query, filter }))
    }
}

impl ToSql for Predicate<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.filter {
            // Constant predicates for the empty conjunction and disjunction
            Filter::And(operands) if operands.is_empty() => fmt!(f, "1 = 1"),
            Filter::Or(operands) if operands.is_empty() => fmt!(f, "1 = 0"),
            Filter::And(operands) => fmt!(f, Delimited(self.operands(operands), " AND ")),
            Filter::Or(operands) => fmt!(f, Delimited(self.operands(operands), " OR ")),
            Filter::BinaryOp { column, op, param } => {
                let placeholder = f.params.push(self.query.param(*param));
                fmt!(f, ColumnRef(*column) " " op " " placeholder);
            }
            // Membership in the empty set matches nothing
            Filter::InList { params, .. } if params.is_empty() => fmt!(f, "1 = 0"),
            Filter::InList { column, params } => {
                let placeholders: Vec<_> = params
                    .iter()
                    .map(|param| f.params.push(self.query.param(*param)))
                    .collect();

                fmt!(f, ColumnRef(*column) " IN (" Comma(placeholders) ")");
            }
            Filter::IsNull { column, negate } => {
                let is_null = if *negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, ColumnRef(*column) is_null);
            }
        }
    }
}

impl ToSql for &stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Ne => "<>",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Lt => "<",
            stmt::BinaryOp::Le => "<=",
        })
    }
}
