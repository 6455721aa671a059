// src/feedback.rs - Local feedback table (CSV, append via read-modify-write)
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{CockpitError, Result};

pub const FEEDBACK_COLUMNS: [&str; 5] = [
    "timestamp",
    "happiness_usage",
    "usability",
    "happiness_methods",
    "comments",
];

/// Satisfaction score on a 1..=5 scale.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CockpitError::InvalidRating(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u8> for Rating {
    type Error = CockpitError;

    fn try_from(value: u8) -> Result<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

mod iso_seconds {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    #[serde(with = "iso_seconds")]
    pub timestamp: NaiveDateTime,
    pub happiness_usage: Rating,
    pub usability: Rating,
    pub happiness_methods: Rating,
    pub comments: String,
}

impl FeedbackRecord {
    /// Stamped with the local time, truncated to whole seconds.
    pub fn new(
        happiness_usage: Rating,
        usability: Rating,
        happiness_methods: Rating,
        comments: impl Into<String>,
    ) -> Self {
        let now = Local::now().naive_local();
        Self {
            timestamp: now.with_nanosecond(0).unwrap_or(now),
            happiness_usage,
            usability,
            happiness_methods,
            comments: comments.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<FeedbackRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<FeedbackRecord>, csv::Error>>()?;
        debug!("📝 [FEEDBACK] Loaded {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Loads existing rows, appends `record` and rewrites the table.
    /// Returns the new row count. Failures are not retried.
    pub fn append(&self, record: &FeedbackRecord) -> Result<usize> {
        let mut rows = self.load()?;
        rows.push(record.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!("📁 Created feedback directory: {}", parent.display());
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!(
            "📝 [FEEDBACK] Saved feedback ({}/{}/{}) to {} - {} rows",
            record.happiness_usage.value(),
            record.usability.value(),
            record.happiness_methods.value(),
            self.path.display(),
            rows.len()
        );
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).map(|r| r.value()).ok(), Some(5));
        assert_eq!(Rating::default().value(), 4);
        assert_eq!(Rating::default().increment().increment().value(), 5);
        assert_eq!(Rating::new(1).map(|r| r.decrement().value()).ok(), Some(1));
    }

    #[test]
    fn test_timestamp_has_second_precision() {
        let record = FeedbackRecord::new(Rating::default(), Rating::default(), Rating::default(), "");
        assert_eq!(record.timestamp.nanosecond(), 0);
    }
}
