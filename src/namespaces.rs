//! Namespace bindings and prefix resolution
//!
//! This module provides the bidirectional prefix ↔ URI binding store and
//! the prefix resolution chain used by path navigation and attribute
//! lookup. A binding store attached to a document acts as a *custom
//! resolver*: when present it is authoritative and fully replaces the
//! inherited `xmlns:` scope of the context node. This lets callers run
//! path queries on documents whose authors omitted namespace declarations
//! but whose prefix → URI convention is known out-of-band.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use sxd_document::dom::Element;

/// Bidirectional prefix ↔ namespace-URI map.
///
/// Inserts overwrite both directions. Iteration order follows insertion
/// order, so populating an XPath evaluation context is deterministic.
#[derive(Debug, Clone, Default)]
pub struct NamespaceBindings {
    uri_by_prefix: IndexMap<String, String>,
    prefix_by_uri: IndexMap<String, String>,
}

impl NamespaceBindings {
    /// Create an empty binding store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(prefix, uri)` pairs
    pub fn from_pairs<P, U, I>(pairs: I) -> Self
    where
        P: Into<String>,
        U: Into<String>,
        I: IntoIterator<Item = (P, U)>,
    {
        let mut bindings = Self::new();
        for (prefix, uri) in pairs {
            bindings.add(prefix, uri);
        }
        bindings
    }

    /// Upsert a binding in both directions
    pub fn add(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        self.prefix_by_uri.insert(uri.clone(), prefix.clone());
        self.uri_by_prefix.insert(prefix, uri);
    }

    /// Look up the URI bound to a prefix
    pub fn uri_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.uri_by_prefix.get(prefix).map(String::as_str)
    }

    /// Look up the prefix bound to a URI
    pub fn prefix_for_uri(&self, uri: &str) -> Option<&str> {
        self.prefix_by_uri.get(uri).map(String::as_str)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.uri_by_prefix.len()
    }

    /// Whether the store holds no bindings
    pub fn is_empty(&self) -> bool {
        self.uri_by_prefix.is_empty()
    }

    /// Iterate `(prefix, uri)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.uri_by_prefix
            .iter()
            .map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

impl<P: Into<String>, U: Into<String>> FromIterator<(P, U)> for NamespaceBindings {
    fn from_iter<I: IntoIterator<Item = (P, U)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Where a prefix lookup is answered from.
///
/// The custom resolver, when attached, replaces the inherited scope
/// outright; a miss in the chosen branch is final.
enum PrefixScope<'d> {
    /// A binding store attached to the owning document
    Custom(&'d NamespaceBindings),
    /// The `xmlns:` declarations in scope at the context element
    Inherited(Element<'d>),
    /// No context at all (e.g. creating the root of an empty document)
    Unscoped,
}

/// Resolve a non-empty prefix to a namespace URI.
///
/// `bindings` is the custom resolver attached to the owning document, if
/// any; `scope` is the context element whose inherited scope applies
/// otherwise. Unprefixed names never reach this function; their URI is
/// the empty string.
pub(crate) fn resolve_prefix<'d>(
    bindings: Option<&'d NamespaceBindings>,
    scope: Option<Element<'d>>,
    prefix: &str,
) -> Result<&'d str> {
    let chain = match (bindings, scope) {
        (Some(store), _) => PrefixScope::Custom(store),
        (None, Some(element)) => PrefixScope::Inherited(element),
        (None, None) => PrefixScope::Unscoped,
    };

    let uri = match chain {
        PrefixScope::Custom(store) => store.uri_for_prefix(prefix),
        PrefixScope::Inherited(element) => element.namespace_uri_for_prefix(prefix),
        PrefixScope::Unscoped => None,
    };

    uri.ok_or_else(|| Error::PrefixNotFound(prefix.to_owned()))
}
