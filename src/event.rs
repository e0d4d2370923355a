//! Event feed data model.
//!
//! Events are produced by the external healer process and only ever read here.
//! The feed is loosely typed: ids may be strings or numbers, timestamps may be
//! RFC 3339 strings or epoch milliseconds, and `status` is an open string of
//! which only two values carry meaning.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};

/// Shown in place of a time that could not be parsed or formatted
pub const TIME_PLACEHOLDER: &str = "--:--:--";

/// Identifier of an event, stable across polls.
///
/// Integer ids that fit in an `i64` stay numeric. Any other JSON number
/// (fractional or out of range) is kept by its literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => Ok(match n.as_i64() {
                Some(id) => EventId::Number(id),
                None => EventId::Text(n.to_string()),
            }),
            serde_json::Value::String(s) => Ok(EventId::Text(s)),
            other => Err(D::Error::custom(format!("invalid event id: {}", other))),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

/// Status reported for an event.
///
/// Anything other than `Detected` or `Resolved` is kept verbatim so it can
/// still be displayed, but it matches no action and counts toward no metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Detected,
    Resolved,
    Other(String),
}

impl Status {
    pub fn parse(value: &str) -> Self {
        match value {
            "Detected" => Status::Detected,
            "Resolved" => Status::Resolved,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Detected => "Detected",
            Status::Resolved => "Resolved",
            Status::Other(s) => s,
        }
    }

    /// Action label shown next to the status badge
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Status::Detected => Some("Analyzing..."),
            Status::Resolved => Some("Refactored"),
            Status::Other(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Status::parse(&raw))
    }
}

/// One detected or resolved workflow error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    /// When the error was detected; `None` if the feed sent nothing usable
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub workflow_name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub error: String,
    pub status: Status,
    /// Whether the healer attempted a fix for this execution
    #[serde(default)]
    pub fix_attempted: bool,
}

impl Event {
    /// Format the timestamp as a time of day in the given timezone.
    ///
    /// Falls back to [`TIME_PLACEHOLDER`] when there is no timestamp or the
    /// format string is invalid.
    pub fn time_of_day_in<Tz>(&self, tz: &Tz, format: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let Some(ts) = self.timestamp else {
            return TIME_PLACEHOLDER.to_string();
        };

        let mut out = String::new();
        // chrono reports bad format items through fmt::Error instead of panicking here
        match write!(out, "{}", ts.with_timezone(tz).format(format)) {
            Ok(()) => out,
            Err(_) => TIME_PLACEHOLDER.to_string(),
        }
    }
}

/// Text field where `null` reads as empty
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_timestamp))
}

/// Interpret a raw JSON timestamp.
///
/// Numbers are epoch milliseconds. Strings are tried as RFC 3339, then as a
/// date-time without offset (local time), then as a bare date (UTC midnight).
pub fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        serde_json::Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
