use super::Error;

/// Error when superclass links form a cycle.
///
/// Inheritance must form a forest. A cycle leaves table ordering undefined, so
/// the whole mapping run is aborted.
#[derive(Debug)]
pub(super) struct CyclicHierarchy {
    types: Box<[Box<str>]>,
}

impl std::error::Error for CyclicHierarchy {}

impl core::fmt::Display for CyclicHierarchy {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("cyclic hierarchy: ")?;

        for name in self.types.iter() {
            write!(f, "{name} -> ")?;
        }

        match self.types.first() {
            Some(first) => f.write_str(first),
            None => Ok(()),
        }
    }
}

impl Error {
    /// Creates a cyclic hierarchy error. `types` lists the members of the
    /// cycle in superclass order, starting anywhere on the cycle.
    pub fn cyclic_hierarchy<I, S>(types: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::from(super::ErrorKind::CyclicHierarchy(CyclicHierarchy {
            types: types.into_iter().map(|name| name.into().into()).collect(),
        }))
    }

    /// Returns `true` if this error is a cyclic hierarchy error.
    pub fn is_cyclic_hierarchy(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CyclicHierarchy(_))
    }
}
