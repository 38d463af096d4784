//! Single-node XPath evaluation
//!
//! A deliberately narrow wrapper: compile an expression, evaluate it
//! against a context node, and return the first element in document
//! order. The namespace context comes from the document's attached
//! resolver unless an explicit binding store is passed, in which case
//! that store wins for the one evaluation.
//!
//! XPath is a separate surface from slash-paths: expressions here get
//! the full predicate/axis/wildcard language of the evaluator, while
//! slash-paths stay a simple child-step grammar.

use crate::document::XmlDocument;
use crate::error::{Error, Result};
use crate::namespaces::NamespaceBindings;
use crate::navigate::text_content;
use sxd_document::dom::Element;
use sxd_xpath::context::Context;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Factory, Value};

/// Reject expressions using a prefix absent from `bindings`.
///
/// The evaluator aborts the process when a name test carries an unbound
/// prefix, so every prefix is checked up front. A name followed by a
/// single `:` is a prefix; `::` marks an axis and string literals are
/// skipped.
fn check_prefixes(expr: &str, bindings: Option<&NamespaceBindings>) -> Result<()> {
    let mut chars = expr.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            '\'' | '"' => {
                for (_, d) in chars.by_ref() {
                    if d == c {
                        break;
                    }
                }
            }
            _ if c.is_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_alphanumeric() || matches!(d, '_' | '-' | '.') {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                if matches!(chars.peek(), Some(&(_, ':'))) {
                    chars.next();
                    if matches!(chars.peek(), Some(&(_, ':'))) {
                        chars.next();
                        continue;
                    }
                    let prefix = &expr[start..end];
                    let bound = bindings
                        .map_or(false, |b| b.uri_for_prefix(prefix).is_some());
                    if !bound {
                        return Err(Error::PrefixNotFound(prefix.to_owned()));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn evaluate_first<'d>(
    node: impl Into<Node<'d>>,
    expr: &str,
    bindings: Option<&NamespaceBindings>,
) -> Result<Option<Element<'d>>> {
    let factory = Factory::new();
    let xpath = factory
        .build(expr)
        .map_err(|e| Error::xpath(expr, e.to_string()))?
        .ok_or_else(|| Error::xpath(expr, "empty expression"))?;

    check_prefixes(expr, bindings)?;

    let mut context = Context::new();
    if let Some(bindings) = bindings {
        for (prefix, uri) in bindings.iter() {
            context.set_namespace(prefix, uri);
        }
    }

    let value = xpath
        .evaluate(&context, node.into())
        .map_err(|e| Error::xpath(expr, e.to_string()))?;

    let element = match value {
        Value::Nodeset(nodes) => nodes.document_order_first().and_then(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        }),
        _ => None,
    };
    Ok(element)
}

impl XmlDocument {
    /// First element matching `expr`, evaluated from the document root
    /// with the attached resolver's bindings in scope.
    pub fn find_xpath(&self, expr: &str) -> Result<Option<Element<'_>>> {
        evaluate_first(self.as_document().root(), expr, self.resolver())
    }

    /// First element matching `expr`, evaluated from `origin`.
    pub fn find_xpath_from<'d>(
        &'d self,
        origin: Element<'d>,
        expr: &str,
    ) -> Result<Option<Element<'d>>> {
        evaluate_first(origin, expr, self.resolver())
    }

    /// Like [`XmlDocument::find_xpath`] but with an explicit binding
    /// store instead of the attached resolver.
    pub fn find_xpath_with(
        &self,
        expr: &str,
        bindings: &NamespaceBindings,
    ) -> Result<Option<Element<'_>>> {
        evaluate_first(self.as_document().root(), expr, Some(bindings))
    }

    /// Like [`XmlDocument::find_xpath_from`] but with an explicit
    /// binding store instead of the attached resolver.
    pub fn find_xpath_from_with<'d>(
        &'d self,
        origin: Element<'d>,
        expr: &str,
        bindings: &NamespaceBindings,
    ) -> Result<Option<Element<'d>>> {
        evaluate_first(origin, expr, Some(bindings))
    }

    /// Strict variant of [`XmlDocument::find_xpath`].
    pub fn get_xpath(&self, expr: &str) -> Result<Element<'_>> {
        self.find_xpath(expr)?
            .ok_or_else(|| Error::path_not_found(expr))
    }

    /// Strict variant of [`XmlDocument::find_xpath_from`].
    pub fn get_xpath_from<'d>(&'d self, origin: Element<'d>, expr: &str) -> Result<Element<'d>> {
        self.find_xpath_from(origin, expr)?
            .ok_or_else(|| Error::path_not_found(expr))
    }

    /// Strict variant of [`XmlDocument::find_xpath_with`].
    pub fn get_xpath_with(
        &self,
        expr: &str,
        bindings: &NamespaceBindings,
    ) -> Result<Element<'_>> {
        self.find_xpath_with(expr, bindings)?
            .ok_or_else(|| Error::path_not_found(expr))
    }

    /// Strict variant of [`XmlDocument::find_xpath_from_with`].
    pub fn get_xpath_from_with<'d>(
        &'d self,
        origin: Element<'d>,
        expr: &str,
        bindings: &NamespaceBindings,
    ) -> Result<Element<'d>> {
        self.find_xpath_from_with(origin, expr, bindings)?
            .ok_or_else(|| Error::path_not_found(expr))
    }

    /// Text content of the first element matching `expr`, or `default`
    /// when nothing matches.
    pub fn find_xpath_text(&self, expr: &str, default: &str) -> Result<String> {
        Ok(self
            .find_xpath(expr)?
            .map(text_content)
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Text content of the first element matching `expr`; absence is
    /// [`Error::PathNotFound`].
    pub fn get_xpath_text(&self, expr: &str) -> Result<String> {
        Ok(text_content(self.get_xpath(expr)?))
    }

    /// Like [`XmlDocument::find_xpath_text`] but with an explicit
    /// binding store instead of the attached resolver.
    pub fn find_xpath_text_with(
        &self,
        expr: &str,
        bindings: &NamespaceBindings,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .find_xpath_with(expr, bindings)?
            .map(text_content)
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Like [`XmlDocument::get_xpath_text`] but with an explicit
    /// binding store instead of the attached resolver.
    pub fn get_xpath_text_with(
        &self,
        expr: &str,
        bindings: &NamespaceBindings,
    ) -> Result<String> {
        Ok(text_content(self.get_xpath_with(expr, bindings)?))
    }
}
