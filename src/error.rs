//! Error types for sxd-utils
//!
//! This module defines all error types used throughout the library.
//! Tolerant lookups (`find_*`) report absence through `Ok(None)` or a
//! caller-supplied default; only strict lookups (`get_*`) and mutations
//! (`acquire_*`, `set_*`) produce errors for missing content.

use thiserror::Error;

/// Result type alias using the sxd-utils Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sxd-utils operations
#[derive(Error, Debug)]
pub enum Error {
    /// Strict path lookup failed; quotes the path as given by the caller
    #[error("\"{0}\" not found")]
    PathNotFound(String),

    /// Strict attribute lookup failed
    #[error("attribute \"{0}\" not found")]
    AttrNotFound(String),

    /// No namespace URI is bound to a prefix used in a path or attribute name
    #[error("namespace error: no URI bound to prefix \"{0}\"")]
    PrefixNotFound(String),

    /// The document already has a root element with a different name
    /// or namespace URI than the one being acquired
    #[error("document already has root \"{has}\", asked \"{asked}\"")]
    RootConflict {
        /// Qualified name the caller asked for
        asked: String,
        /// Name of the existing document root
        has: String,
    },

    /// Malformed input: empty segment local name, separator inside a
    /// child name, invalid XML name, or an operation on an empty document
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// XML parsing error reported by the DOM provider
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// XPath compilation or evaluation error; the provider's original
    /// diagnostic is embedded verbatim
    #[error("XPath error for \"{expr}\": {message}")]
    Xpath {
        /// The expression that failed
        expr: String,
        /// The provider's diagnostic
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `PathNotFound` from the caller's path expression
    pub(crate) fn path_not_found(path: &str) -> Self {
        Error::PathNotFound(path.to_owned())
    }

    /// Build an `Xpath` error embedding the provider diagnostic
    pub(crate) fn xpath(expr: &str, message: impl Into<String>) -> Self {
        Error::Xpath {
            expr: expr.to_owned(),
            message: message.into(),
        }
    }
}
