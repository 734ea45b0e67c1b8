//! Time and timestamp helpers.
//!
//! Timestamps are persisted as RFC 3339 strings with fixed microsecond
//! precision and a `Z` suffix, so comparing the stored strings orders them
//! chronologically.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// UTC timestamp used for `started_at`, `finished_at`, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp in the fixed-width persisted form.
#[must_use]
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serde adapter for `Option<Timestamp>` fields using the fixed-width form.
pub mod option_rfc3339 {
    use chrono::DateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    /// # Errors
    ///
    /// Propagates serializer failures.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Fails when the value is neither null nor an RFC 3339 string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| {
                DateTime::parse_from_rfc3339(&text)
                    .map(|dt| dt.to_utc())
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
