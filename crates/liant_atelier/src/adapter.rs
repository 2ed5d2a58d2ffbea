//! Element I/O: reading and writing a facet of a single element.

use std::hash::Hash;

use liant_carton::FxHashMap;
use serde_json::{Number, Value};

use crate::annotation::Facet;
use crate::document::{ControlKind, Document};

/// Reads and writes element facets, remembering each element's control kind.
#[derive(Debug)]
pub struct ElementIo<N> {
    kinds: FxHashMap<N, ControlKind>,
}

impl<N> Default for ElementIo<N> {
    fn default() -> Self {
        Self {
            kinds: FxHashMap::default(),
        }
    }
}

impl<N: Copy + Eq + Hash> ElementIo<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control kind of `element`, resolved once and cached.
    pub fn kind<D>(&mut self, document: &D, element: N) -> ControlKind
    where
        D: Document<Node = N>,
    {
        *self
            .kinds
            .entry(element)
            .or_insert_with(|| document.control_kind(element))
    }

    /// Current value of `facet` on `element`.
    pub fn read<D>(&mut self, document: &D, element: N, facet: &Facet) -> Value
    where
        D: Document<Node = N>,
    {
        match facet {
            Facet::Value => match self.kind(document, element) {
                ControlKind::Checkbox => Value::Bool(document.checked(element)),
                ControlKind::Text => Value::String(document.text_value(element)),
                ControlKind::Select => document
                    .selected_value(element)
                    .map_or(Value::Null, Value::String),
                ControlKind::Generic => attribute_value(document, element, Facet::VALUE),
            },
            Facet::Content => Value::String(document.content(element)),
            Facet::Attribute(name) => attribute_value(document, element, name),
        }
    }

    /// Display `value` through `facet` of `element`.
    pub fn write<D>(&mut self, document: &mut D, element: N, facet: &Facet, value: &Value)
    where
        D: Document<Node = N>,
    {
        match facet {
            Facet::Value => match self.kind(&*document, element) {
                ControlKind::Checkbox => document.set_checked(element, is_checked(value)),
                ControlKind::Text => document.set_text_value(element, &display_string(value)),
                ControlKind::Select => {
                    if !document.select_value(element, &display_string(value)) {
                        tracing::trace!(value = %value, "no option matches the bound value");
                    }
                }
                ControlKind::Generic => {
                    document.set_attribute(element, Facet::VALUE, &display_string(value))
                }
            },
            Facet::Content => document.set_content(element, &display_string(value)),
            Facet::Attribute(name) => document.set_attribute(element, name, &display_string(value)),
        }
    }

    /// Whether `element` already shows `value` through `facet`.
    pub fn displays<D>(&mut self, document: &D, element: N, facet: &Facet, value: &Value) -> bool
    where
        D: Document<Node = N>,
    {
        match self.read(document, element, facet) {
            Value::Bool(shown) => shown == is_checked(value),
            shown => display_string(&shown) == display_string(value),
        }
    }

    /// Drop cached kinds of elements for which `live` returns false.
    pub fn retain(&mut self, mut live: impl FnMut(&N) -> bool) {
        self.kinds.retain(|element, _| live(element));
    }
}

fn attribute_value<D: Document>(document: &D, element: D::Node, name: &str) -> Value {
    document
        .attribute(element, name)
        .map_or(Value::Null, |text| Value::String(text.to_string()))
}

/// Text shown for `value` in a textual facet.
///
/// Strings are shown verbatim, `null` as nothing, and everything else in its
/// compact JSON form.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Truthiness used for checkbox facets.
pub fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(checked) => *checked,
        Value::String(text) => text == "true",
        _ => false,
    }
}

/// Coerce a string read from the document toward the type of the current data.
///
/// Numbers and booleans are restored when the text parses as one; an empty string
/// becomes `null` when the data held `null`. Anything else stays a string.
pub fn coerce_like(read: Value, current: Option<&Value>) -> Value {
    let text = match read {
        Value::String(text) => text,
        other => return other,
    };

    match current {
        Some(Value::Number(_)) => match text.trim().parse::<Number>() {
            Ok(number) => Value::Number(number),
            Err(_) => Value::String(text),
        },
        Some(Value::Bool(_)) if text == "true" => Value::Bool(true),
        Some(Value::Bool(_)) if text == "false" => Value::Bool(false),
        Some(Value::Null) if text.is_empty() => Value::Null,
        _ => Value::String(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_string() {
        assert_eq!(display_string(&json!("a b")), "a b");
        assert_eq!(display_string(&json!(null)), "");
        assert_eq!(display_string(&json!(12)), "12");
        assert_eq!(display_string(&json!(1.5)), "1.5");
        assert_eq!(display_string(&json!(false)), "false");
        assert_eq!(display_string(&json!({"a": [1]})), r#"{"a":[1]}"#);
    }

    #[test]
    fn test_is_checked() {
        assert!(is_checked(&json!(true)));
        assert!(is_checked(&json!("true")));
        assert!(!is_checked(&json!("yes")));
        assert!(!is_checked(&json!(1)));
        assert!(!is_checked(&json!(null)));
    }

    #[test]
    fn test_coerce_like() {
        assert_eq!(coerce_like(json!("42"), Some(&json!(7))), json!(42));
        assert_eq!(coerce_like(json!("2.5"), Some(&json!(7))), json!(2.5));
        assert_eq!(coerce_like(json!("n/a"), Some(&json!(7))), json!("n/a"));
        assert_eq!(coerce_like(json!("false"), Some(&json!(true))), json!(false));
        assert_eq!(coerce_like(json!(""), Some(&json!(null))), json!(null));
        assert_eq!(coerce_like(json!("42"), Some(&json!("1"))), json!("42"));
        assert_eq!(coerce_like(json!("42"), None), json!("42"));
        assert_eq!(coerce_like(json!(true), Some(&json!("x"))), json!(true));
    }
}
