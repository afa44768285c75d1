//! Custom serde helpers for the exchange's loosely typed fields.
//!
//! Numeric amounts usually arrive as decimal strings, but some endpoints send
//! bare numbers, `null`, or an empty string for "not applicable".

use std::fmt;

use serde::{de, Deserialize, Deserializer};

/// Deserialize an optional decimal that may be a string, a number, `""` or `null`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use rust_decimal::Decimal;
/// use coinbase_exchange_client::types::serde_helpers::maybe_decimal;
///
/// #[derive(Deserialize, Debug)]
/// struct Stats {
///     #[serde(deserialize_with = "maybe_decimal::deserialize", default)]
///     volume_30day: Option<Decimal>,
/// }
///
/// let stats: Stats = serde_json::from_str(r#"{"volume_30day":""}"#).unwrap();
/// assert!(stats.volume_30day.is_none());
///
/// let stats: Stats = serde_json::from_str(r#"{"volume_30day":"12.5"}"#).unwrap();
/// assert_eq!(stats.volume_30day.unwrap().to_string(), "12.5");
/// ```
pub mod maybe_decimal {
    use super::*;
    use rust_decimal::Decimal;

    /// Deserialize a value that may be empty, null, a number, or a decimal string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        match value {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
            Some(serde_json::Value::String(s)) => s.parse().map(Some).map_err(de::Error::custom),
            Some(serde_json::Value::Number(n)) => {
                n.to_string().parse().map(Some).map_err(de::Error::custom)
            }
            Some(other) => Err(de::Error::custom(Unexpected(other))),
        }
    }

    struct Unexpected(serde_json::Value);

    impl fmt::Display for Unexpected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "expected a decimal string or number, got {}", self.0)
        }
    }
}

/// Helper for empty strings that should be deserialized as None.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use coinbase_exchange_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Report {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     file_url: Option<String>,
/// }
///
/// let report: Report = serde_json::from_str(r#"{"file_url":""}"#).unwrap();
/// assert!(report.file_url.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

/// Timestamps in RFC 3339 or in the exchange's database form
/// (`2021-10-05 18:01:40.357+00`), which some transfer endpoints return.
pub mod flexible_datetime {
    use super::*;
    use time::OffsetDateTime;
    use time::format_description::FormatItem;
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;

    const DATABASE_FORMAT: &[FormatItem<'static>] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][optional [:[offset_minute]]]"
    );

    /// Parse a timestamp in either accepted form.
    pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(raw, &Rfc3339).or_else(|_| OffsetDateTime::parse(raw, DATABASE_FORMAT))
    }

    /// Deserialize a required timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// Optional timestamps; `null`, missing and `""` become `None`.
    pub mod option {
        use super::*;

        /// Deserialize an optional timestamp.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.is_empty() => Ok(None),
                Some(raw) => parse(&raw).map(Some).map_err(de::Error::custom),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[derive(Deserialize, Debug)]
    struct Amount {
        #[serde(deserialize_with = "maybe_decimal::deserialize", default)]
        value: Option<Decimal>,
    }

    #[test]
    fn test_maybe_decimal_null_and_missing() {
        let amount: Amount = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert!(amount.value.is_none());
        let amount: Amount = serde_json::from_str("{}").unwrap();
        assert!(amount.value.is_none());
    }

    #[test]
    fn test_maybe_decimal_number() {
        let amount: Amount = serde_json::from_str(r#"{"value":0.25}"#).unwrap();
        assert_eq!(amount.value.unwrap(), Decimal::from_str("0.25").unwrap());
    }

    #[test]
    fn test_maybe_decimal_rejects_garbage() {
        assert!(serde_json::from_str::<Amount>(r#"{"value":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Amount>(r#"{"value":true}"#).is_err());
    }

    #[test]
    fn test_empty_string_as_none() {
        #[derive(Deserialize, Debug)]
        struct Test {
            #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
            refid: Option<String>,
        }

        let test: Test = serde_json::from_str(r#"{"refid":""}"#).unwrap();
        assert!(test.refid.is_none());

        let test: Test = serde_json::from_str(r#"{"refid":"ABC123"}"#).unwrap();
        assert_eq!(test.refid.unwrap(), "ABC123");
    }

    #[test]
    fn test_flexible_datetime_forms() {
        let rfc = flexible_datetime::parse("2021-10-05T18:01:40.357Z").unwrap();
        let db = flexible_datetime::parse("2021-10-05 18:01:40.357+00").unwrap();
        assert_eq!(rfc, db);

        let whole = flexible_datetime::parse("2021-10-05 18:01:40+00").unwrap();
        assert_eq!(whole.unix_timestamp(), rfc.unix_timestamp());
        assert!(flexible_datetime::parse("yesterday").is_err());
    }

    #[test]
    fn test_flexible_datetime_option() {
        #[derive(Deserialize, Debug)]
        struct Test {
            #[serde(deserialize_with = "flexible_datetime::option::deserialize", default)]
            completed_at: Option<time::OffsetDateTime>,
        }

        let test: Test = serde_json::from_str(r#"{"completed_at":null}"#).unwrap();
        assert!(test.completed_at.is_none());
        let test: Test = serde_json::from_str("{}").unwrap();
        assert!(test.completed_at.is_none());
        let test: Test = serde_json::from_str(r#"{"completed_at":"2021-10-05 18:01:40.1+00"}"#).unwrap();
        assert_eq!(test.completed_at.unwrap().year(), 2021);
    }
}
