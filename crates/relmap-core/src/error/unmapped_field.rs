use super::Error;

/// Error when an expression references a field that has no column on the
/// root type or any of its ancestors.
#[derive(Debug)]
pub(super) struct UnmappedField {
    type_name: Box<str>,
    field: Box<str>,
}

impl std::error::Error for UnmappedField {}

impl core::fmt::Display for UnmappedField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unmapped field: {} has no mapped field `{}`",
            self.type_name, self.field
        )
    }
}

impl Error {
    /// Creates an unmapped field error.
    pub fn unmapped_field(type_name: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnmappedField(UnmappedField {
            type_name: type_name.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is an unmapped field error.
    pub fn is_unmapped_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnmappedField(_))
    }
}
