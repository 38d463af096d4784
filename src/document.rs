//! Document handle and lifecycle helpers
//!
//! [`XmlDocument`] owns the DOM provider's storage (`sxd_document::Package`)
//! together with the optionally attached custom namespace resolver. The
//! resolver's lifetime therefore follows the document's: dropping the
//! document releases the store exactly once, re-attaching replaces the
//! previous store, and [`XmlDocument::duplicate`] deep-copies it along
//! with the tree.
//!
//! All DOM nodes handed out by this type are cheap `Copy` views borrowing
//! from the document; none of them survive it.

use crate::error::{Error, Result};
use crate::names::{split_qname, validate_ncname, validate_qname};
use crate::namespaces::NamespaceBindings;
use sxd_document::dom::{ChildOfRoot, Document, Element};
use sxd_document::{parser, writer, Package, QName};
use std::fmt;
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// An owned XML document with an optional attached namespace resolver.
pub struct XmlDocument {
    package: Package,
    resolver: Option<NamespaceBindings>,
}

impl XmlDocument {
    /// Create an empty document (no root element).
    pub fn new() -> Self {
        Self {
            package: Package::new(),
            resolver: None,
        }
    }

    /// Parse a document from XML text.
    pub fn parse(text: &str) -> Result<Self> {
        let package = parser::parse(text).map_err(|e| Error::XmlParse(e.to_string()))?;
        Ok(Self {
            package,
            resolver: None,
        })
    }

    /// Parse a document from UTF-8 bytes.
    pub fn parse_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::XmlParse(format!("invalid UTF-8: {}", e)))?;
        Self::parse(text)
    }

    /// Read all input from `reader` and parse it.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Load and parse the file at `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serialize the document to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut out = Vec::new();
        writer::format_document(&self.as_document(), &mut out)?;
        String::from_utf8(out).map_err(|e| Error::XmlParse(format!("serializer output: {}", e)))
    }

    /// Serialize the document into `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        writer::format_document(&self.as_document(), &mut writer)?;
        Ok(())
    }

    /// Serialize the document to the file at `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = fs::File::create(path)?;
        let mut out = BufWriter::new(file);
        writer::format_document(&self.as_document(), &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Deep-copy the document, including the attached resolver.
    ///
    /// The DOM provider's storage is not clonable, so the tree is copied
    /// by serializing and reparsing. The copy's resolver is independent of
    /// the original's.
    pub fn duplicate(&self) -> Result<Self> {
        let text = self.to_xml_string()?;
        let mut copy = Self::parse(&text)?;
        copy.resolver = self.resolver.clone();
        Ok(copy)
    }

    /// The DOM view of this document.
    pub fn as_document(&self) -> Document<'_> {
        self.package.as_document()
    }

    /// The document root element, if one exists.
    pub fn root_element(&self) -> Option<Element<'_>> {
        self.as_document()
            .root()
            .children()
            .into_iter()
            .find_map(|child| match child {
                ChildOfRoot::Element(element) => Some(element),
                _ => None,
            })
    }

    /// Attach a custom resolver, replacing (and dropping) any previous one.
    ///
    /// While attached, the resolver is authoritative for every prefixed
    /// path segment and attribute name resolved against this document.
    pub fn attach_resolver(&mut self, resolver: NamespaceBindings) {
        self.resolver = Some(resolver);
    }

    /// Detach and return the custom resolver, if one was attached.
    pub fn detach_resolver(&mut self) -> Option<NamespaceBindings> {
        self.resolver.take()
    }

    /// The attached custom resolver, if any.
    pub fn resolver(&self) -> Option<&NamespaceBindings> {
        self.resolver.as_ref()
    }

    /// Mutable access to the attached custom resolver, if any.
    pub fn resolver_mut(&mut self) -> Option<&mut NamespaceBindings> {
        self.resolver.as_mut()
    }

    /// Build a binding store from `(prefix, uri)` pairs and attach it.
    pub fn associate_namespaces<P, U, I>(&mut self, pairs: I)
    where
        P: Into<String>,
        U: Into<String>,
        I: IntoIterator<Item = (P, U)>,
    {
        self.attach_resolver(NamespaceBindings::from_pairs(pairs));
    }

    /// Declare `xmlns:prefix="uri"` on the document root element.
    pub fn set_namespace(&self, prefix: &str, uri: &str) -> Result<()> {
        let root = self
            .root_element()
            .ok_or_else(|| Error::InvalidArg("document has no root element".to_owned()))?;
        set_element_namespace(root, prefix, uri)
    }

    /// Declare several `xmlns:` bindings on the document root element.
    pub fn set_namespaces<'a, I>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (prefix, uri) in pairs {
            self.set_namespace(prefix, uri)?;
        }
        Ok(())
    }

    /// Create a namespaced element and append it as the last child of
    /// `parent`. `qualified_name` is `prefix:local` or plain `local`.
    pub fn create_element_ns<'d>(
        &'d self,
        parent: Element<'d>,
        namespace_uri: &str,
        qualified_name: &str,
    ) -> Result<Element<'d>> {
        validate_qname(qualified_name)?;
        let (prefix, local) = split_qname(qualified_name);

        let element = self
            .as_document()
            .create_element(QName::with_namespace_uri(Some(namespace_uri), local));
        if let Some(prefix) = prefix {
            element.set_preferred_prefix(Some(prefix));
            element.register_prefix(prefix, namespace_uri);
        }
        parent.append_child(element);
        Ok(element)
    }

    /// Set a namespaced attribute on `element` by URI and qualified name.
    pub fn set_attribute_ns(
        &self,
        element: Element<'_>,
        namespace_uri: &str,
        qualified_name: &str,
        value: &str,
    ) -> Result<()> {
        validate_qname(qualified_name)?;
        let (prefix, local) = split_qname(qualified_name);

        let attribute =
            element.set_attribute_value(QName::with_namespace_uri(Some(namespace_uri), local), value);
        if let Some(prefix) = prefix {
            attribute.set_preferred_prefix(Some(prefix));
        }
        Ok(())
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

// The provider's storage has no Debug impl, so summarize by root name.
impl fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDocument")
            .field(
                "root",
                &self.root_element().map(|e| e.name().local_part().to_owned()),
            )
            .field("resolver", &self.resolver)
            .finish()
    }
}

/// Declare `xmlns:prefix="uri"` on an element.
pub fn set_element_namespace(element: Element<'_>, prefix: &str, uri: &str) -> Result<()> {
    validate_ncname(prefix)?;
    element.register_prefix(prefix, uri);
    Ok(())
}
