//! Bulk renaming of a subtree into a target namespace

use crate::error::Result;
use crate::names::validate_ncname;
use sxd_document::dom::{ChildOfElement, Element};
use sxd_document::QName;

/// Move `element` and every descendant element and attribute into
/// `namespace_uri`, keeping local names.
///
/// When `prefix` is given, it becomes the preferred prefix of every
/// renamed node and is declared on the subtree root so the result
/// serializes without synthesized prefixes. An empty `namespace_uri`
/// moves the subtree into no namespace. Text, comment, and processing
/// instruction nodes are untouched. Returns the renamed root.
pub fn rename_subtree<'d>(
    element: Element<'d>,
    namespace_uri: &str,
    prefix: Option<&str>,
) -> Result<Element<'d>> {
    if let Some(prefix) = prefix {
        validate_ncname(prefix)?;
    }
    let uri = (!namespace_uri.is_empty()).then_some(namespace_uri);

    rename_element(element, uri, prefix);
    if let (Some(prefix), Some(uri)) = (prefix, uri) {
        element.register_prefix(prefix, uri);
    }
    Ok(element)
}

fn rename_element(element: Element<'_>, uri: Option<&str>, prefix: Option<&str>) {
    let local = element.name().local_part();
    element.set_name(QName::with_namespace_uri(uri, local));
    element.set_preferred_prefix(prefix);

    // Attribute names are immutable in the DOM, so each attribute is
    // detached and re-set under the new (URI, local) pair.
    for attribute in element.attributes() {
        let local = attribute.name().local_part();
        let value = attribute.value();
        attribute.remove_from_parent();

        let renamed = element.set_attribute_value(QName::with_namespace_uri(uri, local), value);
        renamed.set_preferred_prefix(prefix);
    }

    for child in element.children() {
        if let ChildOfElement::Element(child) = child {
            rename_element(child, uri, prefix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlDocument;

    #[test]
    fn test_rename_moves_elements_and_attributes() {
        let doc = XmlDocument::parse("<root a='1'><child b='2'/></root>").unwrap();
        let root = doc.root_element().unwrap();

        let renamed = rename_subtree(root, "http://example.com/ns", Some("p")).unwrap();
        assert_eq!(renamed, root);
        assert_eq!(renamed.name().namespace_uri(), Some("http://example.com/ns"));
        assert_eq!(renamed.preferred_prefix(), Some("p"));

        let child = renamed.children()[0].element().unwrap();
        assert_eq!(child.name().namespace_uri(), Some("http://example.com/ns"));
        assert_eq!(child.name().local_part(), "child");
        assert_eq!(
            child.attribute_value(("http://example.com/ns", "b")),
            Some("2")
        );
        assert_eq!(child.attribute_value("b"), None);
    }

    #[test]
    fn test_rename_preserves_text() {
        let doc = XmlDocument::parse("<root><a>hello</a></root>").unwrap();
        let root = doc.root_element().unwrap();
        rename_subtree(root, "u", Some("p")).unwrap();

        assert_eq!(doc.get_path_text("p:root/p:a").unwrap(), "hello");
    }

    #[test]
    fn test_rename_without_prefix() {
        let doc = XmlDocument::parse("<root/>").unwrap();
        let root = doc.root_element().unwrap();
        let renamed = rename_subtree(root, "u", None).unwrap();

        assert_eq!(renamed.name().namespace_uri(), Some("u"));
        assert_eq!(renamed.preferred_prefix(), None);
    }

    #[test]
    fn test_rename_into_no_namespace() {
        let doc = XmlDocument::parse("<r:root xmlns:r='u'><r:a/></r:root>").unwrap();
        let root = doc.root_element().unwrap();
        rename_subtree(root, "", None).unwrap();

        let a = doc.get_path("root/a").unwrap();
        assert_eq!(a.name().namespace_uri(), None);
    }

    #[test]
    fn test_rename_rejects_invalid_prefix() {
        let doc = XmlDocument::parse("<root/>").unwrap();
        let root = doc.root_element().unwrap();
        assert!(rename_subtree(root, "u", Some("bad prefix")).is_err());
    }
}
