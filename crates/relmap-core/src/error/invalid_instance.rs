use super::Error;

/// Error when converting between instances and table rows.
///
/// This occurs when:
/// - An instance names a type that is not in the schema
/// - A non-optional field is missing or null
/// - A field value does not match the field's kind
/// - A row referenced by a foreign key does not exist
#[derive(Debug)]
pub(super) struct InvalidInstance {
    message: Box<str>,
}

impl std::error::Error for InvalidInstance {}

impl core::fmt::Display for InvalidInstance {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid instance: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid instance error.
    pub fn invalid_instance(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidInstance(InvalidInstance {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid instance error.
    pub fn is_invalid_instance(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidInstance(_))
    }
}
