mod adhoc;
mod cyclic_hierarchy;
mod invalid_instance;
mod invalid_schema;
mod invalid_type_graph;
mod relationship_ambiguity;
mod unmapped_field;
mod unsupported_expression;
mod unsupported_field_shape;

use adhoc::AdhocError;
use cyclic_hierarchy::CyclicHierarchy;
use invalid_instance::InvalidInstance;
use invalid_schema::InvalidSchema;
use invalid_type_graph::InvalidTypeGraph;
use relationship_ambiguity::RelationshipAmbiguity;
use std::sync::Arc;
use unmapped_field::UnmappedField;
use unsupported_expression::UnsupportedExpression;
use unsupported_field_shape::UnsupportedFieldShape;

/// Return early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while loading, mapping, or querying a type graph.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// A type or field violates the mapping rules (nested collections,
    /// disallowed unions, multiple inheritance).
    pub fn is_shape_error(&self) -> bool {
        self.root().is_unsupported_field_shape()
    }

    /// Superclass links form a cycle.
    pub fn is_hierarchy_error(&self) -> bool {
        self.root().is_cyclic_hierarchy()
    }

    /// A single query could not be translated. The schema is unaffected.
    pub fn is_translation_error(&self) -> bool {
        let root = self.root();
        root.is_unmapped_field() || root.is_unsupported_expression()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    UnsupportedFieldShape(UnsupportedFieldShape),
    CyclicHierarchy(CyclicHierarchy),
    RelationshipAmbiguity(RelationshipAmbiguity),
    UnmappedField(UnmappedField),
    UnsupportedExpression(UnsupportedExpression),
    InvalidTypeGraph(InvalidTypeGraph),
    InvalidSchema(InvalidSchema),
    InvalidInstance(InvalidInstance),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            UnsupportedFieldShape(err) => core::fmt::Display::fmt(err, f),
            CyclicHierarchy(err) => core::fmt::Display::fmt(err, f),
            RelationshipAmbiguity(err) => core::fmt::Display::fmt(err, f),
            UnmappedField(err) => core::fmt::Display::fmt(err, f),
            UnsupportedExpression(err) => core::fmt::Display::fmt(err, f),
            InvalidTypeGraph(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            InvalidInstance(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown relmap error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
