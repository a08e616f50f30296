use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Value
/// a single node property value
///
/// Serialized untagged so the loader sees plain JSON scalars.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
    Map(BTreeMap<String, Self>),
}

impl Value {
    /// Sparse-encoding test: zero, blank and empty values are omitted.
    /// Booleans are never empty; `false` is meaningful.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) => false,
            Self::Int(v) => *v == 0,
            Self::Uint(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Map(v) => v.is_empty(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Integer view across the signed and unsigned variants.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(*v)),
            Self::Uint(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

// Signed and unsigned integers compare by numeric value, so a property
// survives a JSON round trip regardless of which variant decoding picks.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(_) | Self::Uint(_), Self::Int(_) | Self::Uint(_)) => {
                self.as_i128() == other.as_i128()
            }
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

// value_from
// lossless conversions into the integer and text variants
macro_rules! value_from {
    ($variant:ident: $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

value_from!(Int: i8, i16, i32, i64);
value_from!(Uint: u8, u16, u32, u64);
value_from!(Float: f32, f64);
value_from!(Text: String, &str, &String);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<Properties> for Value {
    fn from(v: Properties) -> Self {
        Self::Map(v.0)
    }
}

///
/// Properties
///
/// Ordered property bag keyed by snake_case attribute name.
/// Ordering is by key so two bags with the same content compare and
/// serialize identically.
///

#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, IntoIterator, PartialEq, Serialize,
)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Value>);

impl Properties {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Store a value unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Store a value unless it is empty (see [`Value::is_empty`]).
    pub fn set_sparse(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(key.into(), value);
        }
        self
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn with_sparse(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_sparse(key, value);
        self
    }

    /// True when every entry of `other` is present here with an equal value.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other
            .0
            .iter()
            .all(|(key, value)| self.0.get(key) == Some(value))
    }

    /// True when the bag can serve as a lookup key: at least one entry, and
    /// no value that is null or blank text.
    #[must_use]
    pub fn is_lookup_key(&self) -> bool {
        !self.0.is_empty()
            && self.0.values().all(|value| match value {
                Value::Null => false,
                Value::Text(text) => !text.trim().is_empty(),
                _ => true,
            })
    }

    /// Copy every entry of `other` over this bag.
    pub fn overlay(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_text)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Value>> for Properties {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

/// Build a [`Properties`] bag from `key => value` pairs.
#[macro_export]
macro_rules! props {
    () => {
        $crate::value::Properties::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::value::Properties::new();
        $( props.set($key, $value); )+
        props
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_set_skips_empty_but_keeps_false() {
        let mut props = Properties::new();
        props
            .set_sparse("banner", "")
            .set_sparse("ttl", 0u32)
            .set_sparse("tags", Vec::<String>::new())
            .set_sparse("is_alive", false)
            .set_sparse("hostname", "web-1");

        assert_eq!(props.len(), 2, "got: {props:?}");
        assert_eq!(props.get("is_alive"), Some(&Value::Bool(false)));
        assert_eq!(props.text("hostname"), Some("web-1"));
    }

    #[test]
    fn superset_requires_equal_values() {
        let ident = props! { "ip" => "10.0.0.1" };
        let full = props! { "ip" => "10.0.0.1", "os" => "linux" };
        let other = props! { "ip" => "10.0.0.2", "os" => "linux" };

        assert!(full.is_superset_of(&ident));
        assert!(!other.is_superset_of(&ident));
        assert!(full.is_superset_of(&Properties::new()));
    }

    #[test]
    fn lookup_keys_need_every_value_present() {
        assert!(!Properties::new().is_lookup_key());
        assert!(!props! { "ip" => "" }.is_lookup_key());
        assert!(!props! { "host_id" => "", "number" => 80u16 }.is_lookup_key());
        assert!(!props! { "name" => Value::Null }.is_lookup_key());
        assert!(props! { "number" => 0u16, "open" => false }.is_lookup_key());
        assert!(props! { "ip" => "10.0.0.1" }.is_lookup_key());
    }

    #[test]
    fn overlay_replaces_existing_keys() {
        let mut base = props! { "name" => "old", "kept" => 1 };
        base.overlay(&props! { "name" => "new" });

        assert_eq!(base.text("name"), Some("new"));
        assert_eq!(base.get("kept"), Some(&Value::Int(1)));
    }

    #[test]
    fn serializes_as_plain_json_object() {
        let props = props! {
            "number" => 80u16,
            "protocol" => "tcp",
            "open" => true,
            "tags" => vec!["a", "b"],
        };
        let json = serde_json::to_value(&props).expect("serialize properties");

        assert_eq!(
            json,
            serde_json::json!({
                "number": 80,
                "open": true,
                "protocol": "tcp",
                "tags": ["a", "b"],
            })
        );

        let back: Properties = serde_json::from_value(json).expect("deserialize properties");
        assert_eq!(back.get("number").and_then(Value::as_i128), Some(80));
        assert_eq!(back.get("open").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn integers_compare_across_signedness() {
        assert_eq!(Value::Int(80), Value::Uint(80));
        assert_ne!(Value::Int(-1), Value::Uint(u64::MAX));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn option_none_is_null_and_empty() {
        let value = Value::from(None::<&str>);

        assert_eq!(value, Value::Null);
        assert!(value.is_empty());
    }
}
