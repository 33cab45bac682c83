//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Primary key assigned by the store on creation
pub type TaskId = i32;

/// Message returned when a task arrives without a usable date
pub const EMPTY_DATE_MESSAGE: &str = "A data da tarefa não pode ser vazia";

/// The "no date supplied" value: midnight of 0001-01-01.
pub fn sentinel_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .expect("0001-01-01T00:00:00 is a valid date")
}

/// Parse a date/time as clients send it.
///
/// Accepts RFC 3339 with an offset (kept as its wall-clock value), naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, the same with a space separator, and a bare
/// `YYYY-MM-DD` which means midnight. A positive offset whose `+` became a
/// space in a query string is read as that offset.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    // Form decoding turns an unescaped '+' offset into a space.
    if let Some((stamp, offset)) = raw.rsplit_once(' ') {
        if stamp.contains('T') && offset.len() == 5 && offset.as_bytes()[2] == b':' {
            if let Ok(dt) = DateTime::parse_from_rfc3339(&format!("{}+{}", stamp, offset)) {
                return Some(dt.naive_local());
            }
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}

/// Serde adapter for task dates, usable with `#[serde(with = "...")]`.
pub mod date_format {
    use super::*;

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&raw), &"an ISO-8601 date or date/time"))
    }
}

/// Task lifecycle state
///
/// Written as the variant name; read from the name or its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Pendente,
    Finalizado,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 2] = [TaskStatus::Pendente, TaskStatus::Finalizado];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::Finalizado => "Finalizado",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Pendente => 0,
            Self::Finalizado => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if let Ok(code) = raw.parse::<i64>() {
            return Self::from_code(code)
                .ok_or_else(|| Error::InvalidInput(format!("Unknown task status code: {}", code)));
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown task status: {}", raw)))
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = TaskStatus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a task status name or its integer code")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<TaskStatus, E> {
                TaskStatus::from_code(v).ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<TaskStatus, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(TaskStatus::from_code)
                    .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TaskStatus, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

/// A stored task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "data", with = "date_format")]
    pub date: NaiveDateTime,
    pub status: TaskStatus,
}

impl Task {
    /// Build a stored task from a payload and the id the store assigned
    pub fn from_payload(id: TaskId, payload: TaskPayload) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            date: payload.date,
            status: payload.status,
        }
    }

    /// Overwrite every mutable field with the payload's values. The id is kept.
    pub fn apply(&mut self, payload: TaskPayload) {
        self.title = payload.title;
        self.description = payload.description;
        self.date = payload.date;
        self.status = payload.status;
    }
}

/// Body of create and update requests. Any `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "data", with = "date_format", default = "sentinel_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub status: TaskStatus,
}

impl TaskPayload {
    pub fn new(title: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            date,
            status: TaskStatus::default(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// The only check performed before persisting: the date must be set.
    pub fn validate(&self) -> Result<()> {
        if self.date == sentinel_date() {
            return Err(Error::InvalidInput(EMPTY_DATE_MESSAGE.to_string()));
        }
        Ok(())
    }
}
