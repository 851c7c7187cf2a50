use super::Error;

/// A collection field's element type cannot be given a single owner.
///
/// This is recoverable: the mapper records it as a warning on the schema and
/// realizes the relationship with a join table instead of guessing an owner.
#[derive(Debug)]
pub(super) struct RelationshipAmbiguity {
    type_name: Box<str>,
    field_name: Box<str>,
    target: Box<str>,
    owners: usize,
}

impl std::error::Error for RelationshipAmbiguity {}

impl core::fmt::Display for RelationshipAmbiguity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "relationship ambiguity: {}.{} -> {} has {} owning fields; using a join table",
            self.type_name, self.field_name, self.target, self.owners
        )
    }
}

impl Error {
    /// Creates a relationship ambiguity error for the collection field
    /// `type_name.field_name` whose element type `target` is owned by
    /// `owners` collection fields.
    pub fn relationship_ambiguity(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        target: impl Into<String>,
        owners: usize,
    ) -> Error {
        Error::from(super::ErrorKind::RelationshipAmbiguity(
            RelationshipAmbiguity {
                type_name: type_name.into().into(),
                field_name: field_name.into().into(),
                target: target.into().into(),
                owners,
            },
        ))
    }

    /// Returns `true` if this error is a relationship ambiguity error.
    pub fn is_relationship_ambiguity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RelationshipAmbiguity(_))
    }
}
