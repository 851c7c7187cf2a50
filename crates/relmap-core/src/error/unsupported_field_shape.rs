use super::Error;

/// Error when a type or field cannot be mapped to a relational shape.
///
/// This occurs when:
/// - A field is a collection of collections
/// - A collection field is itself declared optional, or its element is optional
/// - A field is a union of distinct types (only "T or absent" is allowed)
/// - A type declares more than one mapped superclass
///
/// The error is fatal for the offending type; it is never coerced.
#[derive(Debug)]
pub(super) struct UnsupportedFieldShape {
    type_name: Box<str>,
    field_name: Option<Box<str>>,
    reason: Box<str>,
}

impl std::error::Error for UnsupportedFieldShape {}

impl core::fmt::Display for UnsupportedFieldShape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported field shape: {}", self.type_name)?;

        if let Some(field_name) = &self.field_name {
            write!(f, ".{field_name}")?;
        }

        write!(f, ": {}", self.reason)
    }
}

impl Error {
    /// Creates an unsupported field shape error for `type_name` (and
    /// `field_name`, when the violation is field-specific).
    pub fn unsupported_field_shape(
        type_name: impl Into<String>,
        field_name: Option<&str>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnsupportedFieldShape(
            UnsupportedFieldShape {
                type_name: type_name.into().into(),
                field_name: field_name.map(Into::into),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported field shape error.
    pub fn is_unsupported_field_shape(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedFieldShape(_))
    }
}
