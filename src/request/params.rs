//! Ordered, key-unique request parameters.
//!
//! Every endpoint builds a [`ParameterSet`] from its required arguments and
//! merges the caller's optional parameters over it. The set renders either as a
//! query string or as a JSON request body.
//!
//! # Example
//!
//! ```rust
//! use coinbase_exchange_client::request::ParameterSet;
//!
//! let mut params = ParameterSet::new();
//! params.add("limit", 50);
//! params.add("before", "2024-01-01");
//! assert_eq!(params.to_query_string("?"), "?limit=50&before=2024-01-01");
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use url::form_urlencoded;

use crate::error::CoinbaseError;

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text value.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag, rendered as `true`/`false`.
    Bool(bool),
    /// Exact decimal amount, sent as a string in bodies.
    Decimal(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(v) => f.write_str(v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::UInt(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Str(v) => serializer.serialize_str(v),
            ParamValue::Int(v) => serializer.serialize_i64(*v),
            ParamValue::UInt(v) => serializer.serialize_u64(*v),
            ParamValue::Float(v) => serializer.serialize_f64(*v),
            ParamValue::Bool(v) => serializer.serialize_bool(*v),
            ParamValue::Decimal(v) => serializer.serialize_str(&v.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

macro_rules! signed_param {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue::Int(value as i64)
            }
        })*
    };
}

macro_rules! unsigned_param {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue::UInt(value as u64)
            }
        })*
    };
}

signed_param!(i8, i16, i32, i64);
unsigned_param!(u8, u16, u32, u64, usize);

impl TryFrom<Value> for ParamValue {
    type Error = CoinbaseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(ParamValue::Str(s)),
            Value::Bool(b) => Ok(ParamValue::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ParamValue::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(ParamValue::UInt(u))
                } else if let Ok(d) = n.to_string().parse::<Decimal>() {
                    Ok(ParamValue::Decimal(d))
                } else {
                    n.as_f64().map(ParamValue::Float).ok_or_else(|| {
                        CoinbaseError::invalid_argument(format!("unrepresentable number {}", n))
                    })
                }
            }
            other => Err(CoinbaseError::invalid_argument(format!(
                "parameter values must be scalars, got {}",
                other
            ))),
        }
    }
}

/// An ordered collection of uniquely keyed request parameters.
///
/// The optional allow-list documents which keys an endpoint understands. It is
/// advisory: keys outside it are still forwarded to the exchange, which stays
/// authoritative, and are only reported through [`ParameterSet::unknown_keys`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
    allowed: Option<&'static [&'static str]>,
}

impl ParameterSet {
    /// Create an empty parameter set without an allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty parameter set documenting the keys an endpoint accepts.
    pub fn allowing(allowed: &'static [&'static str]) -> Self {
        Self {
            entries: Vec::new(),
            allowed: Some(allowed),
        }
    }

    /// Flatten a serializable request struct into a parameter set.
    ///
    /// `null` fields are skipped. Nested arrays or objects are rejected.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, CoinbaseError> {
        let value = serde_json::to_value(value)
            .map_err(|e| CoinbaseError::invalid_argument(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(CoinbaseError::invalid_argument(
                "request must serialize to an object",
            ));
        };

        let mut params = Self::new();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            params.add(key, ParamValue::try_from(value)?);
        }
        Ok(params)
    }

    /// Insert a parameter, overwriting the value of an existing key in place.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder-style [`ParameterSet::add`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.add(key, value);
        self
    }

    /// Add a parameter only when a value is present.
    pub fn add_opt<V: Into<ParamValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.add(key, value);
        }
        self
    }

    /// Copy every entry of `other` into this set.
    ///
    /// Existing keys keep their position and take the new value; new keys are
    /// appended in `other`'s order.
    pub fn merge(&mut self, other: &ParameterSet) -> &mut Self {
        for (key, value) in &other.entries {
            self.add(key.clone(), value.clone());
        }
        self
    }

    /// Merge optional caller parameters, if any.
    pub fn merged(mut self, other: Option<&ParameterSet>) -> Self {
        if let Some(other) = other {
            self.merge(other);
        }
        self
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check whether a key is set.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The documented allow-list, if any.
    pub fn allowed_keys(&self) -> Option<&'static [&'static str]> {
        self.allowed
    }

    /// Keys that fall outside the allow-list. Empty when no allow-list is set.
    pub fn unknown_keys(&self) -> Vec<&str> {
        match self.allowed {
            Some(allowed) => self
                .entries
                .iter()
                .map(|(k, _)| k.as_str())
                .filter(|k| !allowed.contains(k))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Render as `prefix` followed by form-urlencoded `k=v` pairs.
    ///
    /// Returns an empty string when no parameters are set.
    pub fn to_query_string(&self, prefix: &str) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut serializer =
            form_urlencoded::Serializer::for_suffix(String::from(prefix), prefix.len());
        for (key, value) in &self.entries {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }

    /// Render as a JSON object, keeping scalar types.
    pub fn to_body(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        ParamValue::Str(s) => Value::String(s.clone()),
                        ParamValue::Int(i) => Value::from(*i),
                        ParamValue::UInt(u) => Value::from(*u),
                        ParamValue::Float(f) => Value::from(*f),
                        ParamValue::Bool(b) => Value::Bool(*b),
                        ParamValue::Decimal(d) => Value::String(d.to_string()),
                    };
                    (k.clone(), value)
                })
                .collect(),
        )
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}
