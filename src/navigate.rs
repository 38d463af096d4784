//! Path navigation over the element tree
//!
//! The four operation modes share one segment matcher and one resolution
//! rule, so they always agree on which element a path denotes:
//!
//! - *find*: tolerant, absence is `Ok(None)`
//! - *get*: strict, absence is [`Error::PathNotFound`]
//! - *acquire*: creates missing elements, appending each as the last
//!   child of its parent; never reorders or reparents existing nodes
//! - text accessors layered on find/acquire
//!
//! A path starting with `/` re-roots at the document even when invoked
//! on an element context. On a document context the first segment is
//! matched against the document root: a prefixed segment must resolve to
//! the root's namespace URI, an unprefixed one requires the root to be
//! in no namespace.

use crate::document::XmlDocument;
use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::namespaces::resolve_prefix;
use crate::path::{PathExpr, Segment, SEPARATOR};
use sxd_document::dom::{ChildOfElement, Element};
use sxd_document::QName;

/// Whether a candidate element matches a segment's (URI, local) pair.
///
/// An element without a namespace URI matches the empty string, which is
/// what unprefixed segments resolve to.
fn element_matches(element: Element<'_>, want_uri: &str, want_local: &str) -> bool {
    let name = element.name();
    name.local_part() == want_local && name.namespace_uri().unwrap_or("") == want_uri
}

/// `prefix:local` display form of an element's name, for diagnostics.
fn qualified_display(element: Element<'_>) -> String {
    match element.preferred_prefix() {
        Some(prefix) => format!("{}:{}", prefix, element.name().local_part()),
        None => element.name().local_part().to_owned(),
    }
}

/// Recursive text content of an element, trimmed of ASCII whitespace
/// (space, CR, LF) at both ends.
pub fn text_content(element: Element<'_>) -> String {
    fn collect(element: Element<'_>, out: &mut String) {
        for child in element.children() {
            match child {
                ChildOfElement::Text(text) => out.push_str(text.text()),
                ChildOfElement::Element(child) => collect(child, out),
                _ => {}
            }
        }
    }

    let mut out = String::new();
    collect(element, &mut out);
    out.trim_matches(|c| matches!(c, ' ' | '\r' | '\n')).to_owned()
}

impl XmlDocument {
    /// The namespace URI a segment asks for: resolver-derived for a
    /// prefixed segment, the empty string otherwise.
    pub(crate) fn segment_uri<'d>(
        &'d self,
        scope: Option<Element<'d>>,
        segment: &Segment<'_>,
    ) -> Result<&'d str> {
        match segment.prefix {
            Some(prefix) => resolve_prefix(self.resolver(), scope, prefix),
            None => Ok(""),
        }
    }

    /// First direct element child of `parent` matching `segment`, in
    /// document order.
    fn matching_child<'d>(
        &'d self,
        parent: Element<'d>,
        segment: &Segment<'_>,
    ) -> Result<Option<Element<'d>>> {
        let want_uri = self.segment_uri(Some(parent), segment)?;
        Ok(parent
            .children()
            .into_iter()
            .filter_map(|child| match child {
                ChildOfElement::Element(element) => Some(element),
                _ => None,
            })
            .find(|element| element_matches(*element, want_uri, segment.local)))
    }

    fn walk<'d>(
        &'d self,
        start: Element<'d>,
        segments: &[Segment<'_>],
    ) -> Result<Option<Element<'d>>> {
        let mut current = start;
        for segment in segments {
            match self.matching_child(current, segment)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    fn find_expr<'d>(&'d self, expr: &PathExpr<'_>) -> Result<Option<Element<'d>>> {
        let (first, rest) = match expr.segments.split_first() {
            Some(split) => split,
            None => return Ok(None),
        };
        let root = match self.root_element() {
            Some(root) => root,
            None => return Ok(None),
        };

        let want_uri = self.segment_uri(Some(root), first)?;
        if !element_matches(root, want_uri, first.local) {
            return Ok(None);
        }
        self.walk(root, rest)
    }

    /// Navigate `path` from the document root. Absence is `Ok(None)`.
    pub fn find_path(&self, path: &str) -> Result<Option<Element<'_>>> {
        let expr = PathExpr::parse(path)?;
        self.find_expr(&expr)
    }

    /// Navigate `path` from `origin`. An empty path returns `origin`; a
    /// leading `/` re-roots at the document.
    pub fn find_path_from<'d>(
        &'d self,
        origin: Element<'d>,
        path: &str,
    ) -> Result<Option<Element<'d>>> {
        let expr = PathExpr::parse(path)?;
        if expr.absolute {
            return self.find_expr(&expr);
        }
        if expr.segments.is_empty() {
            return Ok(Some(origin));
        }
        self.walk(origin, &expr.segments)
    }

    /// Strict variant of [`XmlDocument::find_path`].
    pub fn get_path(&self, path: &str) -> Result<Element<'_>> {
        self.find_path(path)?
            .ok_or_else(|| Error::path_not_found(path))
    }

    /// Strict variant of [`XmlDocument::find_path_from`].
    pub fn get_path_from<'d>(&'d self, origin: Element<'d>, path: &str) -> Result<Element<'d>> {
        self.find_path_from(origin, path)?
            .ok_or_else(|| Error::path_not_found(path))
    }

    /// First direct element child of `element` matching a single
    /// `[prefix:]local` name.
    pub fn find_child<'d>(
        &'d self,
        element: Element<'d>,
        name: &str,
    ) -> Result<Option<Element<'d>>> {
        if name.contains(SEPARATOR) {
            return Err(Error::InvalidArg(format!(
                "child name \"{}\" contains a path separator",
                name
            )));
        }
        let segment = Segment::parse(name)?;
        self.matching_child(element, &segment)
    }

    /// Strict variant of [`XmlDocument::find_child`].
    pub fn get_child<'d>(&'d self, element: Element<'d>, name: &str) -> Result<Element<'d>> {
        self.find_child(element, name)?
            .ok_or_else(|| Error::path_not_found(name))
    }

    /// Create one element for `segment`, resolving its namespace URI in
    /// `scope`. The created element carries the qualified name as its
    /// preferred prefix and, when prefixed, a matching `xmlns:`
    /// registration so the subtree stays self-describing.
    fn create_segment_element<'d>(
        &'d self,
        scope: Option<Element<'d>>,
        segment: &Segment<'_>,
    ) -> Result<Element<'d>> {
        validate_ncname(segment.local)?;
        if let Some(prefix) = segment.prefix {
            validate_ncname(prefix)?;
        }

        let want_uri = self.segment_uri(scope, segment)?;
        let element = match segment.prefix {
            Some(prefix) => {
                let element = self
                    .as_document()
                    .create_element(QName::with_namespace_uri(Some(want_uri), segment.local));
                element.set_preferred_prefix(Some(prefix));
                element.register_prefix(prefix, want_uri);
                element
            }
            None => self.as_document().create_element(segment.local),
        };
        Ok(element)
    }

    /// Match or create the document root for the first segment.
    fn acquire_root<'d>(&'d self, segment: &Segment<'_>) -> Result<Element<'d>> {
        match self.root_element() {
            Some(root) => {
                let want_uri = self.segment_uri(Some(root), segment)?;
                if element_matches(root, want_uri, segment.local) {
                    Ok(root)
                } else {
                    Err(Error::RootConflict {
                        asked: segment.qualified_name(),
                        has: qualified_display(root),
                    })
                }
            }
            None => {
                let root = self.create_segment_element(None, segment)?;
                self.as_document().root().append_child(root);
                Ok(root)
            }
        }
    }

    fn materialize<'d>(
        &'d self,
        start: Element<'d>,
        segments: &[Segment<'_>],
    ) -> Result<Element<'d>> {
        let mut current = start;
        for segment in segments {
            current = match self.matching_child(current, segment)? {
                // An existing match is reused; acquire never duplicates.
                Some(existing) => existing,
                None => {
                    let created = self.create_segment_element(Some(current), segment)?;
                    current.append_child(created);
                    created
                }
            };
        }
        Ok(current)
    }

    fn acquire_expr<'d>(&'d self, expr: &PathExpr<'_>) -> Result<Element<'d>> {
        let (first, rest) = match expr.segments.split_first() {
            Some(split) => split,
            None => {
                return self.root_element().ok_or_else(|| {
                    Error::InvalidArg(
                        "empty path on a document without a root element".to_owned(),
                    )
                });
            }
        };
        let root = self.acquire_root(first)?;
        self.materialize(root, rest)
    }

    /// Navigate `path` from the document root, creating every missing
    /// element along the way.
    ///
    /// Fails with [`Error::RootConflict`] (without mutating the
    /// document) when a root element exists but disagrees with the
    /// first segment in name or namespace URI.
    pub fn acquire_path(&self, path: &str) -> Result<Element<'_>> {
        let expr = PathExpr::parse(path)?;
        self.acquire_expr(&expr)
    }

    /// Navigate `path` from `origin`, creating missing elements. An
    /// empty path returns `origin`; a leading `/` re-roots at the
    /// document.
    pub fn acquire_path_from<'d>(
        &'d self,
        origin: Element<'d>,
        path: &str,
    ) -> Result<Element<'d>> {
        let expr = PathExpr::parse(path)?;
        if expr.absolute {
            return self.acquire_expr(&expr);
        }
        if expr.segments.is_empty() {
            return Ok(origin);
        }
        self.materialize(origin, &expr.segments)
    }

    /// Text content at `path`, or `default` when the path is absent.
    pub fn find_path_text(&self, path: &str, default: &str) -> Result<String> {
        Ok(self
            .find_path(path)?
            .map(text_content)
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Element-context variant of [`XmlDocument::find_path_text`].
    pub fn find_path_text_from(
        &self,
        origin: Element<'_>,
        path: &str,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .find_path_from(origin, path)?
            .map(text_content)
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Text content at `path`; absence is [`Error::PathNotFound`].
    pub fn get_path_text(&self, path: &str) -> Result<String> {
        Ok(text_content(self.get_path(path)?))
    }

    /// Element-context variant of [`XmlDocument::get_path_text`].
    pub fn get_path_text_from(&self, origin: Element<'_>, path: &str) -> Result<String> {
        Ok(text_content(self.get_path_from(origin, path)?))
    }

    /// Acquire `path` and replace the element's text content with
    /// `value`, verbatim (no trimming on write).
    pub fn set_path_text(&self, path: &str, value: &str) -> Result<()> {
        self.acquire_path(path)?.set_text(value);
        Ok(())
    }

    /// Element-context variant of [`XmlDocument::set_path_text`].
    pub fn set_path_text_from(
        &self,
        origin: Element<'_>,
        path: &str,
        value: &str,
    ) -> Result<()> {
        self.acquire_path_from(origin, path)?.set_text(value);
        Ok(())
    }
}
