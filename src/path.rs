//! Slash-path tokeniser
//!
//! Paths are sequences of element names separated by `/`, where each
//! segment is `local` or `prefix:local`. The tokeniser borrows from the
//! caller's string; it allocates nothing beyond the segment vector.
//!
//! Grammar:
//!
//! ```text
//! path    = ['/'+] segment ('/'+ segment)* '/'*
//! segment = [prefix ':'] local
//! ```
//!
//! Runs of separators collapse, leading and internal alike; trailing
//! separators are ignored. Within a segment only the first `:` splits
//! prefix from local name; later colons belong to the local name. An
//! empty prefix (`:local`) means "no prefix", not "default namespace".

use crate::error::{Error, Result};

/// Path separator
pub const SEPARATOR: char = '/';

/// One `[prefix:]local` unit of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Namespace prefix, if the segment carried a non-empty one
    pub prefix: Option<&'a str>,
    /// Local element name
    pub local: &'a str,
}

impl<'a> Segment<'a> {
    /// Parse a single `[prefix:]local` name.
    ///
    /// Fails with `InvalidArg` when the local part is empty (`"x:"`, `":"`).
    pub fn parse(name: &'a str) -> Result<Segment<'a>> {
        let (prefix, local) = match name.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", name),
        };

        if local.is_empty() {
            return Err(Error::InvalidArg(format!(
                "path segment \"{}\" has an empty local name",
                name
            )));
        }

        Ok(Segment {
            prefix: (!prefix.is_empty()).then_some(prefix),
            local,
        })
    }

    /// The `prefix:local` qualified form, as used when creating nodes
    pub fn qualified_name(&self) -> String {
        match self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.to_owned(),
        }
    }
}

/// A tokenised path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr<'a> {
    /// A leading `/` was present: re-root at the owning document
    pub absolute: bool,
    /// The segments, in navigation order
    pub segments: Vec<Segment<'a>>,
}

impl<'a> PathExpr<'a> {
    /// Tokenise a path expression.
    pub fn parse(path: &'a str) -> Result<PathExpr<'a>> {
        let absolute = path.starts_with(SEPARATOR);
        let segments = path
            .split(SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(Segment::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(PathExpr { absolute, segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segs<'a>(path: &'a str) -> Vec<Segment<'a>> {
        PathExpr::parse(path).unwrap().segments
    }

    #[test]
    fn test_simple_path() {
        let expr = PathExpr::parse("root/a/b").unwrap();
        assert!(!expr.absolute);
        assert_eq!(expr.segments.len(), 3);
        assert_eq!(expr.segments[0].local, "root");
        assert_eq!(expr.segments[2].local, "b");
    }

    #[test]
    fn test_leading_separator_sets_absolute() {
        let expr = PathExpr::parse("/root/a").unwrap();
        assert!(expr.absolute);
        assert_eq!(expr.segments.len(), 2);
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(segs("a///b"), segs("a/b"));
        assert_eq!(segs("//a//b//"), segs("a/b"));
    }

    #[test]
    fn test_trailing_separators_ignored() {
        assert_eq!(segs("a/b/"), segs("a/b"));
        assert_eq!(segs("a/b///"), segs("a/b"));
    }

    #[test]
    fn test_empty_and_separator_only_paths() {
        let expr = PathExpr::parse("").unwrap();
        assert!(!expr.absolute);
        assert!(expr.segments.is_empty());

        let expr = PathExpr::parse("///").unwrap();
        assert!(expr.absolute);
        assert!(expr.segments.is_empty());
    }

    #[test]
    fn test_prefixed_segment() {
        let expr = PathExpr::parse("root/x:c").unwrap();
        assert_eq!(expr.segments[1].prefix, Some("x"));
        assert_eq!(expr.segments[1].local, "c");
    }

    #[test]
    fn test_empty_prefix_means_no_prefix() {
        let seg = Segment::parse(":local").unwrap();
        assert_eq!(seg.prefix, None);
        assert_eq!(seg.local, "local");
    }

    #[test]
    fn test_extra_colons_belong_to_local_name() {
        let seg = Segment::parse("a:b:c").unwrap();
        assert_eq!(seg.prefix, Some("a"));
        assert_eq!(seg.local, "b:c");
    }

    #[test]
    fn test_empty_local_is_invalid() {
        assert!(Segment::parse("x:").is_err());
        assert!(Segment::parse(":").is_err());
        assert!(PathExpr::parse("a/x:/b").is_err());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(Segment::parse("x:c").unwrap().qualified_name(), "x:c");
        assert_eq!(Segment::parse("c").unwrap().qualified_name(), "c");
    }

    proptest! {
        /// Separator runs never change the parsed segments.
        #[test]
        fn prop_separator_collapse(parts in prop::collection::vec("[a-z]{1,8}", 1..6),
                                   gaps in prop::collection::vec(1usize..4, 6)) {
            let plain = parts.join("/");
            let mut padded = String::new();
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    padded.push_str(&"/".repeat(gaps[i]));
                }
                padded.push_str(part);
            }
            prop_assert_eq!(segs(&plain), segs(&padded));
        }

        /// Rejoining segments with single separators reparses identically.
        #[test]
        fn prop_rejoin_roundtrip(parts in prop::collection::vec("[a-z]{1,8}(:[a-z]{1,8})?", 1..6)) {
            let path = parts.join("/");
            let expr = PathExpr::parse(&path).unwrap();
            let rejoined = expr
                .segments
                .iter()
                .map(|s| s.qualified_name())
                .collect::<Vec<_>>()
                .join("/");
            prop_assert_eq!(expr.segments, segs(&rejoined));
        }
    }
}
