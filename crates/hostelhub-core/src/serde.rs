//! Lenient deserializers for query-string parameters.
//!
//! Browsers and front ends send empty strings for blank form fields. These
//! helpers treat an empty value as absent so that a blank filter never
//! narrows a query.

use chrono::NaiveDate;
use serde::de::{DeserializeOwned, IntoDeserializer, value};
use serde::{Deserialize, Deserializer};

/// Empty or whitespace-only strings become `None`; others are trimmed.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Empty strings become `None`; anything else must parse as `i64`.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Like [`deserialize_optional_i64`] but unparseable input also becomes
/// `None`, letting the caller fall back to a default.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Empty strings become `None`; anything else must be `YYYY-MM-DD`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Empty strings become `None`; anything else must name a variant of `T`.
///
/// Used for status filters such as `?status=living`.
pub fn deserialize_optional_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let inner: value::StrDeserializer<'_, value::Error> = s.trim().into_deserializer();
            T::deserialize(inner)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        search: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        category_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        page: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        from: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_enum")]
        status: Option<Status>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        Living,
        Leave,
    }

    #[test]
    fn test_empty_values_are_absent() {
        let params: Params =
            serde_json::from_str(
                r#"{"search":"  ","category_id":"","page":"","from":"","status":""}"#,
            )
            .unwrap();
        assert!(params.search.is_none());
        assert!(params.category_id.is_none());
        assert!(params.page.is_none());
        assert!(params.from.is_none());
        assert!(params.status.is_none());
    }

    #[test]
    fn test_values_are_parsed() {
        let params: Params = serde_json::from_str(
            r#"{"search":" rahim ","category_id":"7","page":"3","from":"2025-02-01","status":"leave"}"#,
        )
        .unwrap();
        assert_eq!(params.search.as_deref(), Some("rahim"));
        assert_eq!(params.category_id, Some(7));
        assert_eq!(params.page, Some(3));
        assert_eq!(params.from, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(params.status, Some(Status::Leave));
    }

    #[test]
    fn test_lenient_ignores_garbage() {
        let params: Params = serde_json::from_str(r#"{"page":"abc"}"#).unwrap();
        assert!(params.page.is_none());
    }

    #[test]
    fn test_strict_rejects_garbage() {
        let result: Result<Params, _> = serde_json::from_str(r#"{"category_id":"abc"}"#);
        assert!(result.is_err());

        let result: Result<Params, _> = serde_json::from_str(r#"{"status":"evicted"}"#);
        assert!(result.is_err());
    }
}
