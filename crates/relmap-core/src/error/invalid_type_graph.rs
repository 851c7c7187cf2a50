use super::Error;

/// Error when the supplied type descriptors do not form a valid graph.
///
/// This occurs when:
/// - Two types or enums share a name
/// - A field references a name that is neither a type nor an enum
/// - A field type annotation cannot be parsed
#[derive(Debug)]
pub(super) struct InvalidTypeGraph {
    message: Box<str>,
}

impl std::error::Error for InvalidTypeGraph {}

impl core::fmt::Display for InvalidTypeGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid type graph: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid type graph error.
    pub fn invalid_type_graph(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidTypeGraph(InvalidTypeGraph {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid type graph error.
    pub fn is_invalid_type_graph(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidTypeGraph(_))
    }
}
