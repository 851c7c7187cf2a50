use crate::schema::db::{JoinTable, JoinTableId, Table, TableId, TableRef};

use std::collections::BTreeSet;

/// Orders tables so that every table follows the tables its foreign keys
/// reference, followed by the join tables.
///
/// Among the tables that are ready, the lowest declared one is emitted
/// first. When every remaining table waits on another, the lowest table
/// whose blocking keys are all non-inheritance keys is emitted and those keys
/// are marked deferred. Self-references never block.
pub(super) fn emission_order(tables: &mut [Table], join_tables: &[JoinTable]) -> Vec<TableRef> {
    let mut order = Vec::with_capacity(tables.len() + join_tables.len());
    let mut emitted = vec![false; tables.len()];
    let mut pending: BTreeSet<TableId> = tables.iter().map(|table| table.id).collect();

    while !pending.is_empty() {
        let ready = pending
            .iter()
            .copied()
            .find(|id| blocking(&tables[id.0], &emitted).next().is_none());

        let Some(next) = ready.or_else(|| break_cycle(tables, &pending, &emitted)) else {
            break;
        };

        pending.remove(&next);
        emitted[next.0] = true;
        order.push(TableRef::Table(next));
    }

    order.extend(
        (0..join_tables.len()).map(|index| TableRef::JoinTable(JoinTableId(index))),
    );

    order
}

/// Indices of the foreign keys on `table` whose target is not yet emitted
fn blocking<'a>(table: &'a Table, emitted: &'a [bool]) -> impl Iterator<Item = usize> + 'a {
    table
        .foreign_keys
        .iter()
        .enumerate()
        .filter(move |(_, fk)| !fk.deferred && fk.target != table.id && !emitted[fk.target.0])
        .map(|(index, _)| index)
}

fn break_cycle(
    tables: &mut [Table],
    pending: &BTreeSet<TableId>,
    emitted: &[bool],
) -> Option<TableId> {
    let candidate = pending.iter().copied().find(|id| {
        let table = &tables[id.0];
        blocking(table, emitted).all(|index| !table.foreign_keys[index].is_inheritance())
    });

    // Inheritance is acyclic, so some blocked table always has only
    // reference keys left. Fall back to the lowest table regardless.
    let id = candidate.or_else(|| pending.first().copied())?;

    let blocked: Vec<usize> = blocking(&tables[id.0], emitted).collect();
    let table = &mut tables[id.0];

    for index in blocked {
        let fk = &mut table.foreign_keys[index];
        fk.deferred = true;

        log::info!(
            "deferring foreign key `{}` on `{}` to break a reference cycle",
            table.columns[fk.column.index].name,
            table.name
        );
    }

    Some(id)
}
