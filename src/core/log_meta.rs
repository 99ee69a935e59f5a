//! Signed metadata attached to a logger identity
//!
//! `LogMeta` is an immutable key/value bag. Its type is the signature: a call
//! argument carrying a `LogMeta` is merged into the entry metadata instead of
//! being logged as payload, and nothing in the fields marks it as such.
//!
//! The empty value is a single shared allocation, so emptiness checks are a
//! pointer comparison and no-op merges never allocate.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Raw metadata fields.
pub type MetaFields = Map<String, Value>;

/// Key reserved for tags carried inside call metadata.
pub const META_TAGS_KEY: &str = "tags";

fn empty_fields() -> &'static Arc<MetaFields> {
    static EMPTY: OnceLock<Arc<MetaFields>> = OnceLock::new();
    EMPTY.get_or_init(|| Arc::new(Map::new()))
}

/// Baked, immutable metadata.
#[derive(Clone)]
pub struct LogMeta(Arc<MetaFields>);

impl LogMeta {
    /// The canonical empty metadata.
    #[inline]
    pub fn empty() -> Self {
        LogMeta(Arc::clone(empty_fields()))
    }

    /// Turn `data` into canonical metadata.
    ///
    /// Empty input (including an already-empty `LogMeta`) yields the shared
    /// empty instance; baked input is returned as is.
    pub fn bake(data: impl Into<LogMeta>) -> Self {
        data.into()
    }

    fn from_fields(fields: MetaFields) -> Self {
        if fields.is_empty() {
            Self::empty()
        } else {
            LogMeta(Arc::new(fields))
        }
    }

    /// True iff this is the shared empty instance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        Arc::ptr_eq(&self.0, empty_fields())
    }

    /// True when both values share the same allocation.
    #[inline]
    pub fn ptr_eq(a: &LogMeta, b: &LogMeta) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Shallow merge, `incoming` keys win. The result is baked.
    pub fn merge(existing: &LogMeta, incoming: &LogMeta) -> LogMeta {
        if incoming.is_empty() {
            return existing.clone();
        }
        if existing.is_empty() {
            return incoming.clone();
        }

        let mut merged = (*existing.0).clone();
        for (key, value) in incoming.0.iter() {
            merged.insert(key.clone(), value.clone());
        }
        Self::from_fields(merged)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &MetaFields {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// String tags stored under the `tags` key, if any.
    pub fn tags(&self) -> Vec<String> {
        match self.0.get(META_TAGS_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect(),
            Some(Value::String(tag)) => vec![tag.clone()],
            _ => Vec::new(),
        }
    }
}

impl Default for LogMeta {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for LogMeta {
    fn eq(&self, other: &Self) -> bool {
        LogMeta::ptr_eq(self, other) || self.0 == other.0
    }
}

impl fmt::Debug for LogMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for LogMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&*self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for LogMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl From<MetaFields> for LogMeta {
    fn from(fields: MetaFields) -> Self {
        Self::from_fields(fields)
    }
}

/// Objects become metadata; any other value bakes to empty.
impl From<Value> for LogMeta {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Self::empty(),
        }
    }
}

impl From<BTreeMap<String, Value>> for LogMeta {
    fn from(map: BTreeMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HashMap<String, Value>> for LogMeta {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for LogMeta
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_fields(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_identity() {
        let empty = LogMeta::empty();
        assert!(empty.is_empty());

        let over_cooked = LogMeta::bake(empty.clone());
        assert!(over_cooked.is_empty());
        assert!(LogMeta::ptr_eq(&over_cooked, &empty));

        let empty_object = LogMeta::bake(json!({}));
        assert!(empty_object.is_empty());
        assert!(LogMeta::ptr_eq(&empty_object, &empty));

        let from_map = LogMeta::bake(MetaFields::new());
        assert!(LogMeta::ptr_eq(&from_map, &empty));
    }

    #[test]
    fn test_bake_keeps_fields() {
        let meta = LogMeta::bake(json!({"username": "John"}));
        assert!(!meta.is_empty());
        assert_eq!(meta.get("username"), Some(&json!("John")));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_baked_value_is_returned_as_is() {
        let meta = LogMeta::bake(json!({"a": 1}));
        let again = LogMeta::bake(meta.clone());
        assert!(LogMeta::ptr_eq(&meta, &again));
    }

    #[test]
    fn test_non_object_bakes_to_empty() {
        assert!(LogMeta::bake(json!("text")).is_empty());
        assert!(LogMeta::bake(json!([1, 2])).is_empty());
    }

    #[test]
    fn test_merge_incoming_wins() {
        let base = LogMeta::bake(json!({"username": "John", "role": "admin"}));
        let incoming = LogMeta::bake(json!({"role": "guest", "teammate": "Smith"}));

        let merged = LogMeta::merge(&base, &incoming);
        assert_eq!(merged.get("username"), Some(&json!("John")));
        assert_eq!(merged.get("role"), Some(&json!("guest")));
        assert_eq!(merged.get("teammate"), Some(&json!("Smith")));

        // Inputs are untouched
        assert_eq!(base.get("role"), Some(&json!("admin")));
        assert!(base.get("teammate").is_none());
    }

    #[test]
    fn test_merge_with_empty_does_not_allocate() {
        let base = LogMeta::bake(json!({"a": 1}));
        let merged = LogMeta::merge(&base, &LogMeta::empty());
        assert!(LogMeta::ptr_eq(&base, &merged));

        let merged = LogMeta::merge(&LogMeta::empty(), &base);
        assert!(LogMeta::ptr_eq(&base, &merged));

        let merged = LogMeta::merge(&LogMeta::empty(), &LogMeta::empty());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_tags() {
        let meta = LogMeta::bake(json!({"tags": ["audit", 3, "login"]}));
        assert_eq!(meta.tags(), vec!["audit".to_string(), "login".to_string()]);
        assert!(LogMeta::empty().tags().is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let meta: LogMeta = [("user", "bob")].into_iter().collect();
        assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"user":"bob"}"#);
        assert_eq!(meta.to_string(), r#"{"user":"bob"}"#);
    }
}
