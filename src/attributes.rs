//! Attribute lookup and mutation
//!
//! Attribute names follow the same `[prefix:]local` form as path
//! segments, with one asymmetry inherited from XML namespaces: an
//! unprefixed attribute is in *no* namespace, regardless of any default
//! namespace in scope, so it is matched by local name alone. A prefixed
//! attribute name is resolved through the same chain as path segments
//! (attached resolver first, then the element's inherited scope) and
//! matched by (URI, local) pair.

use crate::document::XmlDocument;
use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::path::{Segment, SEPARATOR};
use sxd_document::dom::{Attribute, Element};
use sxd_document::QName;

impl XmlDocument {
    fn attribute_segment<'n>(&self, name: &'n str) -> Result<Segment<'n>> {
        if name.contains(SEPARATOR) {
            return Err(Error::InvalidArg(format!(
                "attribute name \"{}\" contains a path separator",
                name
            )));
        }
        Segment::parse(name)
    }

    /// The attribute node named `name` on `element`, if present.
    pub fn find_attribute_node<'d>(
        &'d self,
        element: Element<'d>,
        name: &str,
    ) -> Result<Option<Attribute<'d>>> {
        let segment = self.attribute_segment(name)?;
        let attribute = match segment.prefix {
            Some(_) => {
                let uri = self.segment_uri(Some(element), &segment)?;
                element.attribute(QName::with_namespace_uri(Some(uri), segment.local))
            }
            None => element.attribute(segment.local),
        };
        Ok(attribute)
    }

    /// Strict variant of [`XmlDocument::find_attribute_node`].
    pub fn get_attribute_node<'d>(
        &'d self,
        element: Element<'d>,
        name: &str,
    ) -> Result<Attribute<'d>> {
        self.find_attribute_node(element, name)?
            .ok_or_else(|| Error::AttrNotFound(name.to_owned()))
    }

    /// Value of attribute `name` on `element`, or `default` when absent.
    ///
    /// Attribute values are returned verbatim; unlike element text they
    /// are not trimmed.
    pub fn find_attribute_text(
        &self,
        element: Element<'_>,
        name: &str,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .find_attribute_node(element, name)?
            .map(|attribute| attribute.value().to_owned())
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Value of attribute `name` on `element`; absence is
    /// [`Error::AttrNotFound`].
    pub fn get_attribute_text(&self, element: Element<'_>, name: &str) -> Result<String> {
        Ok(self.get_attribute_node(element, name)?.value().to_owned())
    }

    /// Set attribute `name` to `value` on `element`, creating or
    /// overwriting it.
    ///
    /// A prefixed name is resolved to its namespace URI first and the
    /// written attribute keeps the prefix for serialization. Fails with
    /// [`Error::PrefixNotFound`] before any mutation when the prefix is
    /// unknown.
    pub fn set_attribute_text(
        &self,
        element: Element<'_>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        let segment = self.attribute_segment(name)?;
        validate_ncname(segment.local)?;

        match segment.prefix {
            Some(prefix) => {
                validate_ncname(prefix)?;
                let uri = self.segment_uri(Some(element), &segment)?;
                let attribute = element.set_attribute_value(
                    QName::with_namespace_uri(Some(uri), segment.local),
                    value,
                );
                attribute.set_preferred_prefix(Some(prefix));
            }
            None => {
                element.set_attribute_value(segment.local, value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlDocument;

    #[test]
    fn test_unprefixed_attribute_matched_by_local_only() {
        let doc = XmlDocument::parse("<root xmlns='d' a='1'/>").unwrap();
        let root = doc.root_element().unwrap();

        // The default namespace does not apply to attributes.
        assert_eq!(doc.get_attribute_text(root, "a").unwrap(), "1");
    }

    #[test]
    fn test_prefixed_attribute_resolved_through_scope() {
        let doc = XmlDocument::parse("<root xmlns:x='u' x:a='1'/>").unwrap();
        let root = doc.root_element().unwrap();

        assert_eq!(doc.get_attribute_text(root, "x:a").unwrap(), "1");
    }

    #[test]
    fn test_custom_resolver_drives_attribute_lookup() {
        let mut doc = XmlDocument::parse("<root xmlns:x='u' x:a='1'/>").unwrap();
        doc.associate_namespaces([("other", "u")]);

        let root = doc.root_element().unwrap();
        assert_eq!(doc.get_attribute_text(root, "other:a").unwrap(), "1");

        // The attached store replaces the inherited scope outright.
        let err = doc.find_attribute_node(root, "x:a").unwrap_err();
        assert!(matches!(err, Error::PrefixNotFound(p) if p == "x"));
    }

    #[test]
    fn test_prefixed_and_unprefixed_do_not_collide() {
        let doc = XmlDocument::parse("<root xmlns:x='u' a='plain' x:a='scoped'/>").unwrap();
        let root = doc.root_element().unwrap();

        assert_eq!(doc.get_attribute_text(root, "a").unwrap(), "plain");
        assert_eq!(doc.get_attribute_text(root, "x:a").unwrap(), "scoped");
    }

    #[test]
    fn test_attribute_values_not_trimmed() {
        let doc = XmlDocument::parse("<root a='  padded  '/>").unwrap();
        let root = doc.root_element().unwrap();

        assert_eq!(doc.get_attribute_text(root, "a").unwrap(), "  padded  ");
    }

    #[test]
    fn test_find_attribute_text_default() {
        let doc = XmlDocument::parse("<root/>").unwrap();
        let root = doc.root_element().unwrap();

        assert_eq!(
            doc.find_attribute_text(root, "missing", "fallback").unwrap(),
            "fallback"
        );
        assert!(matches!(
            doc.get_attribute_text(root, "missing"),
            Err(Error::AttrNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_set_attribute_text_overwrites() {
        let doc = XmlDocument::parse("<root a='old'/>").unwrap();
        let root = doc.root_element().unwrap();

        doc.set_attribute_text(root, "a", "new").unwrap();
        assert_eq!(doc.get_attribute_text(root, "a").unwrap(), "new");
    }

    #[test]
    fn test_set_prefixed_attribute_roundtrips() {
        let doc = XmlDocument::parse("<root xmlns:x='u'/>").unwrap();
        let root = doc.root_element().unwrap();

        doc.set_attribute_text(root, "x:a", "v").unwrap();
        assert_eq!(doc.get_attribute_text(root, "x:a").unwrap(), "v");
        assert_eq!(root.attribute_value(("u", "a")), Some("v"));
    }

    #[test]
    fn test_set_with_unknown_prefix_fails_without_mutation() {
        let doc = XmlDocument::parse("<root/>").unwrap();
        let root = doc.root_element().unwrap();

        let err = doc.set_attribute_text(root, "x:a", "v").unwrap_err();
        assert!(matches!(err, Error::PrefixNotFound(_)));
        assert!(root.attributes().is_empty());
    }

    #[test]
    fn test_separator_in_attribute_name_rejected() {
        let doc = XmlDocument::parse("<root/>").unwrap();
        let root = doc.root_element().unwrap();

        assert!(matches!(
            doc.find_attribute_node(root, "a/b"),
            Err(Error::InvalidArg(_))
        ));
    }
}
