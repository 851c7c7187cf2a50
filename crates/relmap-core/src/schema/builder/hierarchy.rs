use crate::graph::{TypeGraph, TypeId};
use crate::{Error, Result};

use std::collections::HashSet;

/// Fails if following superclass links from any type leads back to it.
///
/// Only the first mapped base of each type is followed; types with more than
/// one base are rejected during classification.
pub(crate) fn check_acyclic(graph: &TypeGraph) -> Result<()> {
    let mut acyclic = HashSet::new();

    for start in &graph.types {
        let mut path: Vec<TypeId> = vec![];
        let mut next = Some(start.id);

        while let Some(id) = next {
            if acyclic.contains(&id) {
                break;
            }

            if let Some(pos) = path.iter().position(|seen| *seen == id) {
                let cycle = path[pos..].iter().map(|id| graph.ty(*id).name.clone());
                return Err(Error::cyclic_hierarchy(cycle));
            }

            path.push(id);
            next = graph.ty(id).bases.first().copied();
        }

        acyclic.extend(path);
    }

    Ok(())
}
