//! Data exchanged with the tree by `get_data` / `set_data`.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Payload held by a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Shape of the data bound into a (sub)tree.
///
/// A leaf takes a `Scalar`, a composite takes a `Mapping` keyed by child
/// name. The mapping keeps insertion order, so `get_data` on a composite
/// lists children the way they render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Data {
    Scalar(Scalar),
    Mapping(IndexMap<String, Data>),
}

impl Data {
    /// An empty mapping.
    pub fn mapping() -> Self {
        Data::Mapping(IndexMap::new())
    }

    /// Builder-style insert; turns a scalar into an empty mapping first.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Data>) -> Self {
        if let Data::Scalar(_) = self {
            self = Data::mapping();
        }
        if let Data::Mapping(ref mut map) = self {
            map.insert(key.into(), value.into());
        }
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Data::Scalar(_) => "scalar",
            Data::Mapping(_) => "mapping",
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Data::Scalar(s) => Some(s),
            Data::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Data>> {
        match self {
            Data::Mapping(m) => Some(m),
            Data::Scalar(_) => None,
        }
    }

    /// Looks up `key` when this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Data> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

impl From<Scalar> for Data {
    fn from(value: Scalar) -> Self {
        Data::Scalar(value)
    }
}

macro_rules! data_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Data {
                fn from(value: $t) -> Self {
                    Data::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

data_from_scalar!(&str, String, i64, f64, bool);

impl From<IndexMap<String, Data>> for Data {
    fn from(map: IndexMap<String, Data>) -> Self {
        Data::Mapping(map)
    }
}

impl<K: Into<String>, V: Into<Data>> FromIterator<(K, V)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Data::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_scalar_when_with_key_then_becomes_mapping() {
        let data = Data::from("x").with("name", "Ada");
        assert_eq!(data.get("name"), Some(&Data::from("Ada")));
        assert_eq!(data.kind_name(), "mapping");
    }

    #[test]
    fn given_mapping_when_collecting_then_keeps_insertion_order() {
        let data: Data = [("b", 1_i64), ("a", 2_i64)].into_iter().collect();
        let keys: Vec<&String> = data.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn given_scalars_when_displayed_then_renders_plain_values() {
        assert_eq!(Scalar::from("photo1.png").to_string(), "photo1.png");
        assert_eq!(Scalar::from(42_i64).to_string(), "42");
        assert_eq!(Scalar::from(true).to_string(), "true");
    }
}
