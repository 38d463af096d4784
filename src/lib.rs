//! Ergonomic helpers over the `sxd-document` DOM
//!
//! This crate wraps a mutable XML DOM with slash-delimited, namespace-aware
//! path navigation, attribute accessors, subtree renaming, and single-node
//! XPath evaluation. Paths are sequences of `[prefix:]local` names; prefixes
//! resolve through a binding store attached to the document or, failing
//! that, through the inherited `xmlns:` scope of the context element.
//!
//! ```
//! use sxd_utils::XmlDocument;
//!
//! # fn main() -> sxd_utils::Result<()> {
//! let mut doc = XmlDocument::parse(
//!     r#"<config xmlns:db="http://example.com/db">
//!          <db:server><db:host>localhost</db:host></db:server>
//!        </config>"#,
//! )?;
//!
//! assert_eq!(doc.get_path_text("config/db:server/db:host")?, "localhost");
//!
//! // Create missing elements on demand.
//! doc.set_path_text("config/retries", "3")?;
//! assert_eq!(doc.find_path_text("config/retries", "0")?, "3");
//!
//! // Out-of-band prefix bindings for documents without declarations.
//! doc.associate_namespaces([("d", "http://example.com/db")]);
//! assert!(doc.find_path("config/d:server")?.is_some());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod attributes;
pub mod document;
pub mod error;
pub mod names;
pub mod namespaces;
pub mod navigate;
pub mod path;
pub mod rename;
pub mod xpath;

pub use document::{set_element_namespace, XmlDocument};
pub use error::{Error, Result};
pub use names::{is_valid_ncname, is_valid_qname};
pub use namespaces::NamespaceBindings;
pub use navigate::text_content;
pub use path::{PathExpr, Segment, SEPARATOR};
pub use rename::rename_subtree;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The XML namespace, implicitly bound to the `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The namespace of `xmlns` declarations themselves
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
