use super::Error;

/// Error when an expression cannot be expressed against the root entity's
/// tables alone.
///
/// This occurs when:
/// - A path steps through a relationship into another entity
/// - A relationship or collection field is compared against a literal
/// - An operator is used with an operand it cannot take (e.g. `<` with null)
/// - An enum literal names no declared variant
#[derive(Debug)]
pub(super) struct UnsupportedExpression {
    type_name: Box<str>,
    message: Box<str>,
}

impl std::error::Error for UnsupportedExpression {}

impl core::fmt::Display for UnsupportedExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported expression on {}: {}",
            self.type_name, self.message
        )
    }
}

impl Error {
    /// Creates an unsupported expression error for a query rooted at
    /// `type_name`.
    pub fn unsupported_expression(
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnsupportedExpression(
            UnsupportedExpression {
                type_name: type_name.into().into(),
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported expression error.
    pub fn is_unsupported_expression(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedExpression(_))
    }
}
