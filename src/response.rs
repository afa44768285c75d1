//! Tri-modal response materialization.
//!
//! Every endpoint goes through one request path and hands the raw body to
//! [`materialize_with`] together with the [`OutputMode`] chosen by the caller:
//!
//! - [`OutputMode::Raw`] returns the body unchanged,
//! - [`OutputMode::Structured`] parses it into a [`serde_json::Value`],
//! - [`OutputMode::Typed`] parses it and applies an entity parser
//!   ([`parse_single`] or [`parse_list`]).
//!
//! # Example
//!
//! ```rust
//! use coinbase_exchange_client::response::{materialize, Materialized, OutputMode};
//!
//! #[derive(Debug, serde::Deserialize)]
//! struct Time {
//!     epoch: f64,
//! }
//!
//! let raw = r#"{"iso":"2024-01-01T00:00:00Z","epoch":1704067200.0}"#.to_string();
//! let time = materialize::<Time>(raw, OutputMode::Typed).unwrap().into_typed().unwrap();
//! assert_eq!(time.epoch, 1704067200.0);
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::MalformedResponse;

/// Representation requested for a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// The body exactly as received.
    Raw,
    /// A generic JSON tree.
    Structured,
    /// Domain types.
    #[default]
    Typed,
}

/// A response in the representation the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized<T> {
    /// The body exactly as received.
    Raw(String),
    /// A generic JSON tree.
    Structured(Value),
    /// Domain types.
    Typed(T),
}

impl<T> Materialized<T> {
    /// The mode this value was produced in.
    pub fn mode(&self) -> OutputMode {
        match self {
            Materialized::Raw(_) => OutputMode::Raw,
            Materialized::Structured(_) => OutputMode::Structured,
            Materialized::Typed(_) => OutputMode::Typed,
        }
    }

    /// The raw body, if produced in [`OutputMode::Raw`].
    pub fn into_raw(self) -> Option<String> {
        match self {
            Materialized::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    /// The JSON tree, if produced in [`OutputMode::Structured`].
    pub fn into_structured(self) -> Option<Value> {
        match self {
            Materialized::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// The domain value, if produced in [`OutputMode::Typed`].
    pub fn into_typed(self) -> Option<T> {
        match self {
            Materialized::Typed(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the typed representation, leaving the others untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Materialized<U> {
        match self {
            Materialized::Raw(raw) => Materialized::Raw(raw),
            Materialized::Structured(value) => Materialized::Structured(value),
            Materialized::Typed(value) => Materialized::Typed(f(value)),
        }
    }
}

/// Materialize a body using serde as the entity parser.
pub fn materialize<T: DeserializeOwned>(
    raw: String,
    mode: OutputMode,
) -> Result<Materialized<T>, MalformedResponse> {
    materialize_with(raw, mode, parse_single::<T>)
}

/// Materialize a body with a supplied entity parser for the typed mode.
pub fn materialize_with<T, F>(
    raw: String,
    mode: OutputMode,
    parser: F,
) -> Result<Materialized<T>, MalformedResponse>
where
    F: FnOnce(Value) -> Result<T, MalformedResponse>,
{
    match mode {
        OutputMode::Raw => Ok(Materialized::Raw(raw)),
        OutputMode::Structured => parse_structured(&raw).map(Materialized::Structured),
        OutputMode::Typed => parse_structured(&raw).and_then(parser).map(Materialized::Typed),
    }
}

/// Parse a body into a generic JSON tree.
pub fn parse_structured(raw: &str) -> Result<Value, MalformedResponse> {
    serde_json::from_str(raw).map_err(|e| MalformedResponse::new(e.to_string()))
}

/// Entity parser for endpoints returning a single object.
pub fn parse_single<E: DeserializeOwned>(value: Value) -> Result<E, MalformedResponse> {
    match serde_json::from_value::<E>(value.clone()) {
        Ok(entity) => Ok(entity),
        Err(e) => Err(describe::<E>(&value, e)),
    }
}

/// Entity parser for endpoints returning a list, applied element by element.
pub fn parse_list<E: DeserializeOwned>(value: Value) -> Result<Vec<E>, MalformedResponse> {
    let Value::Array(items) = value else {
        return Err(MalformedResponse::new(format!(
            "expected a list, got {}",
            kind(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_single::<E>(item).map_err(|e| e.at_element(index)))
        .collect()
}

/// Turn a serde failure into a [`MalformedResponse`] naming the offending key.
///
/// Missing fields are named by serde itself. Otherwise the object is replayed
/// one key at a time in visiting order; the first prefix that reproduces the
/// failure ends with the key that caused it, even when several keys fail with
/// the same message.
fn describe<E: DeserializeOwned>(value: &Value, error: serde_json::Error) -> MalformedResponse {
    let reason = error.to_string();
    let details = MalformedResponse::new(reason.clone());

    if let Some(key) = missing_field(&reason) {
        return details.with_key(key);
    }

    if let Value::Object(map) = value {
        let mut prefix = Map::new();
        for (key, field) in map {
            prefix.insert(key.clone(), field.clone());
            match serde_json::from_value::<E>(Value::Object(prefix.clone())) {
                Err(e) if e.to_string() == reason => return details.with_key(key.clone()),
                _ => continue,
            }
        }
    }
    details
}

fn missing_field(reason: &str) -> Option<&str> {
    reason.strip_prefix("missing field `")?.split('`').next()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
