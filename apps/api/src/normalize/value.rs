//! Total lookups over an untyped JSON tree.
//!
//! Every helper here returns a default instead of failing: a missing key, a
//! `null`, an index past the end or a value of the wrong shape all collapse to
//! `None`, `""`, `&[]` or `0.0`.

use serde_json::{Map, Value};

/// Keys consulted on any named value after the field-specific ones.
const DISPLAY_KEYS: &[&str] = &["Name", "Raw"];

/// A source field that arrives either as a bare string or as an object that
/// carries its display text in a sub-field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Plain(&'a str),
    Named(&'a Map<String, Value>),
}

impl<'a> FieldValue<'a> {
    /// Anything other than a string or an object has no text form.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(FieldValue::Plain(s)),
            Value::Object(map) => Some(FieldValue::Named(map)),
            _ => None,
        }
    }

    /// Resolves the value to its display string.
    ///
    /// `keys` are tried first, then `Name` and `Raw`. A key that itself holds
    /// a named value is resolved recursively, so `{"Name": {"Raw": "BSc"}}`
    /// yields `"BSc"`.
    pub fn display(&self, keys: &[&str]) -> String {
        match self {
            FieldValue::Plain(s) => (*s).to_string(),
            FieldValue::Named(map) => keys
                .iter()
                .chain(DISPLAY_KEYS)
                .filter_map(|key| map.get(*key))
                .map(|nested| text(Some(nested), keys))
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
        }
    }
}

/// Looks up a JSON pointer, treating `null` as absent.
pub fn at<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

/// Resolves an optional value to text through [`FieldValue`].
pub fn text(value: Option<&Value>, keys: &[&str]) -> String {
    value
        .and_then(FieldValue::classify)
        .map(|field| field.display(keys))
        .unwrap_or_default()
}

/// Text at a pointer.
pub fn text_at(value: &Value, pointer: &str, keys: &[&str]) -> String {
    text(at(value, pointer), keys)
}

/// First non-empty text among several candidate pointers.
pub fn first_text(value: &Value, candidates: &[(&str, &[&str])]) -> String {
    candidates
        .iter()
        .map(|(pointer, keys)| text_at(value, pointer, keys))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// The first pointer that resolves to an actual array. Scalars and objects
/// never count as sequences.
pub fn first_array<'a>(value: &'a Value, pointers: &[&str]) -> &'a [Value] {
    pointers
        .iter()
        .find_map(|pointer| at(value, pointer).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Resolves every item to text, dropping items that have none.
pub fn text_list(items: &[Value], keys: &[&str]) -> Vec<String> {
    items
        .iter()
        .map(|item| text(Some(item), keys))
        .filter(|s| !s.is_empty())
        .collect()
}

/// A number, or an object carrying one under `Score`.
pub fn number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Some(Value::Object(map)) => number(map.get("Score")),
        _ => 0.0,
    }
}

/// Strips the optional `Value` envelope the external service wraps its
/// payloads in.
pub fn unwrap_envelope(value: &Value) -> &Value {
    value
        .get("Value")
        .filter(|inner| inner.is_object())
        .unwrap_or(value)
}

/// Descends into `key` when it holds an object, otherwise stays put. Lets the
/// normalizers accept both `{"ResumeData": {...}}` and the bare data object.
pub fn section<'a>(value: &'a Value, key: &str) -> &'a Value {
    value
        .get(key)
        .filter(|inner| inner.is_object())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_used_directly() {
        assert_eq!(text(Some(&json!("Rust")), &[]), "Rust");
    }

    #[test]
    fn test_named_value_resolves_name() {
        assert_eq!(text(Some(&json!({"Name": "Rust"})), &[]), "Rust");
    }

    #[test]
    fn test_named_value_resolves_nested_raw() {
        let degree = json!({"Name": {"Raw": "BSc Computer Science", "Normalized": "bachelors"}});
        assert_eq!(text(Some(&degree), &[]), "BSc Computer Science");
    }

    #[test]
    fn test_specific_keys_take_precedence() {
        let email = json!({"Name": "ignored", "InternetEmailAddress": "a@b.io"});
        assert_eq!(text(Some(&email), &["InternetEmailAddress"]), "a@b.io");
    }

    #[test]
    fn test_empty_named_key_falls_through() {
        let value = json!({"Name": "", "Raw": "fallback"});
        assert_eq!(text(Some(&value), &[]), "fallback");
    }

    #[test]
    fn test_non_text_shapes_default_to_empty() {
        assert_eq!(text(Some(&json!(42)), &[]), "");
        assert_eq!(text(Some(&json!(["a"])), &[]), "");
        assert_eq!(text(Some(&json!({"Other": "x"})), &[]), "");
        assert_eq!(text(None, &[]), "");
    }

    #[test]
    fn test_at_treats_null_as_absent() {
        let value = json!({"a": {"b": null}});
        assert!(at(&value, "/a/b").is_none());
        assert!(at(&value, "/a/b/c").is_none());
        assert!(at(&value, "/a").is_some());
    }

    #[test]
    fn test_first_array_skips_scalars() {
        let value = json!({"Skills": "Go"});
        assert!(first_array(&value, &["/Skills", "/Skills/Raw"]).is_empty());
    }

    #[test]
    fn test_first_array_falls_back_to_nested() {
        let value = json!({"Skills": {"Raw": [{"Name": "Go"}]}});
        assert_eq!(first_array(&value, &["/Skills", "/Skills/Raw"]).len(), 1);
    }

    #[test]
    fn test_text_list_drops_empty_items() {
        let items = json!(["Go", null, {"Name": "Rust"}, 7, {"Nope": 1}]);
        let items = items.as_array().unwrap();
        assert_eq!(text_list(items, &[]), vec!["Go", "Rust"]);
    }

    #[test]
    fn test_number_shapes() {
        assert_eq!(number(Some(&json!(0.5))), 0.5);
        assert_eq!(number(Some(&json!({"Score": 0.25}))), 0.25);
        assert_eq!(number(Some(&json!("0.5"))), 0.0);
        assert_eq!(number(None), 0.0);
    }

    #[test]
    fn test_unwrap_envelope() {
        let wrapped = json!({"Info": {"Code": "Success"}, "Value": {"ResumeData": {}}});
        assert!(unwrap_envelope(&wrapped).get("ResumeData").is_some());

        let bare = json!({"ResumeData": {}});
        assert_eq!(unwrap_envelope(&bare), &bare);

        let scalar_value = json!({"Value": 3});
        assert_eq!(unwrap_envelope(&scalar_value), &scalar_value);
    }
}
