//! Binding annotations carried by elements.
//!
//! A binding annotation reads `[facet:]path`:
//!
//! | Annotation          | Facet            | Path          |
//! |---------------------|------------------|---------------|
//! | `/user/name`        | value            | `/user/name`  |
//! | `:/user/name`       | content          | `/user/name`  |
//! | `title:/user/name`  | attribute title  | `/user/name`  |
//! | `value:/user/name`  | value            | `/user/name`  |
//!
//! Text starting with `/` is always a bare path. Anything else is split at the
//! first `:`.

use liant_carton::CompactString;

use crate::document::Document;
use crate::error::{BindError, BindResult};
use crate::path::{Path, PathDialect};

/// Which aspect of an element a binding reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Facet {
    /// The element's primary value, resolved through its control kind
    Value,
    /// The element's text content
    Content,
    /// A named attribute
    Attribute(CompactString),
}

impl Facet {
    pub const VALUE: &'static str = "value";

    /// Interpret the facet part of an annotation.
    pub fn parse(name: &str) -> Self {
        match name {
            Self::VALUE => Facet::Value,
            "" => Facet::Content,
            other => Facet::Attribute(CompactString::from(other)),
        }
    }
}

/// A parsed binding annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingAnnotation {
    pub facet: Facet,
    pub path: Path,
}

impl BindingAnnotation {
    pub fn parse(text: &str, dialect: PathDialect) -> BindResult<Self> {
        let (facet, raw_path) = split_annotation(text);
        Ok(Self {
            facet,
            path: Path::parse(dialect, raw_path)?,
        })
    }

    /// Canonical text form; parses back to the same annotation.
    pub fn render(&self, dialect: PathDialect) -> String {
        let path = self.path.compile(dialect);
        match &self.facet {
            Facet::Value if path.starts_with('/') || !path.contains(':') => path,
            Facet::Value => format!("{}:{path}", Facet::VALUE),
            Facet::Content => format!(":{path}"),
            Facet::Attribute(name) => format!("{name}:{path}"),
        }
    }
}

fn split_annotation(text: &str) -> (Facet, &str) {
    if text.starts_with('/') {
        return (Facet::Value, text);
    }
    match text.split_once(':') {
        Some((facet, path)) => (Facet::parse(facet), path),
        None => (Facet::Value, text),
    }
}

/// A binding annotation resolved on a specific element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBinding<N> {
    pub element: N,
    pub facet: Facet,
    pub path: Path,
}

impl<N: Copy + std::fmt::Debug> ElementBinding<N> {
    /// Read and parse the `attribute` annotation of `element`.
    pub fn of<D>(
        document: &D,
        element: N,
        attribute: &str,
        dialect: PathDialect,
    ) -> BindResult<Self>
    where
        D: Document<Node = N>,
    {
        let text = document
            .attribute(element, attribute)
            .ok_or_else(|| BindError::MissingAnnotation {
                element: format!("{element:?}"),
                attribute: attribute.to_string(),
            })?;
        let BindingAnnotation { facet, path } = BindingAnnotation::parse(text, dialect)?;
        Ok(Self {
            element,
            facet,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDocument;

    fn parse(text: &str) -> BindingAnnotation {
        BindingAnnotation::parse(text, PathDialect::Pointer).unwrap()
    }

    #[test]
    fn test_facets() {
        assert_eq!(parse("/user/name").facet, Facet::Value);
        assert_eq!(parse(":/user/name").facet, Facet::Content);
        assert_eq!(parse("value:/user/name").facet, Facet::Value);
        assert_eq!(
            parse("title:/user/name").facet,
            Facet::Attribute(CompactString::from("title"))
        );
        assert_eq!(parse("title:/user/name").path.to_string(), "/user/name");
    }

    #[test]
    fn test_bare_pointer_keeps_colons() {
        let annotation = parse("/a:b");
        assert_eq!(annotation.facet, Facet::Value);
        assert_eq!(annotation.path.tokens(), &["a:b"]);
    }

    #[test]
    fn test_render_is_canonical() {
        for text in [":/list/0", "/list/0", "href:/links/2/url"] {
            assert_eq!(parse(text).render(PathDialect::Pointer), text);
        }
        assert_eq!(
            parse("value:/list/0").render(PathDialect::Pointer),
            "/list/0"
        );
    }

    #[test]
    fn test_dot_dialect() {
        let annotation = BindingAnnotation::parse(":user.name", PathDialect::Dot).unwrap();
        assert_eq!(annotation.facet, Facet::Content);
        assert_eq!(annotation.render(PathDialect::Dot), ":user.name");

        let bare = BindingAnnotation::parse("user.name", PathDialect::Dot).unwrap();
        assert_eq!(bare.facet, Facet::Value);
        assert_eq!(bare.render(PathDialect::Dot), "user.name");
    }

    #[test]
    fn test_element_binding() {
        let mut document = MockDocument::new();
        let bound = document.element(0, &[("data-bind", "title:/user/name")]);
        let plain = document.element(0, &[]);

        let binding = ElementBinding::of(&document, bound, "data-bind", PathDialect::Pointer)
            .unwrap();
        assert_eq!(binding.element, bound);
        assert_eq!(binding.facet, Facet::Attribute(CompactString::from("title")));
        assert_eq!(binding.path.to_string(), "/user/name");

        let err = ElementBinding::of(&document, plain, "data-bind", PathDialect::Pointer)
            .unwrap_err();
        assert_eq!(
            err,
            BindError::MissingAnnotation {
                element: plain.to_string(),
                attribute: "data-bind".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_pointer() {
        let err = BindingAnnotation::parse(":user", PathDialect::Pointer).unwrap_err();
        assert!(matches!(err, BindError::InvalidPath { .. }));
    }
}
