//! Ids and timestamps for new records.
//!
//! Library operations never read the clock or generate ids directly; they
//! draw from a [`StampSource`] so tests can run them deterministically.

use chrono::{DateTime, TimeDelta, Utc};

/// A fresh id paired with the time it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub id: String,
    pub at: DateTime<Utc>,
}

pub trait StampSource {
    fn next(&mut self) -> Stamp;
}

/// UUID v4 ids and the current UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStamps;

impl StampSource for SystemStamps {
    fn next(&mut self) -> Stamp {
        Stamp {
            id: uuid::Uuid::new_v4().to_string(),
            at: Utc::now(),
        }
    }
}

/// `{prefix}-0001`, `{prefix}-0002`, ... one second apart.
#[derive(Debug, Clone)]
pub struct SequentialStamps {
    prefix: String,
    start: DateTime<Utc>,
    issued: u32,
}

impl SequentialStamps {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, DateTime::UNIX_EPOCH)
    }

    pub fn starting_at(prefix: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            prefix: prefix.into(),
            start,
            issued: 0,
        }
    }
}

impl StampSource for SequentialStamps {
    fn next(&mut self) -> Stamp {
        self.issued += 1;
        Stamp {
            id: format!("{}-{:04}", self.prefix, self.issued),
            at: self.start + TimeDelta::seconds(i64::from(self.issued)),
        }
    }
}
