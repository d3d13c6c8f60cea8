use chrono::{DateTime, Duration, Utc};

/// Span covered when the query gives no lower bound
pub const DEFAULT_SPAN_HOURS: i64 = 250;

/// Inclusive `[after, before]` window in unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: i64,
    pub before: i64,
}

impl TimeWindow {
    pub fn new(after: i64, before: i64) -> Self {
        Self { after, before }
    }

    /// Build a window from raw query values.
    ///
    /// Missing or unparsable values fall back silently: `before` to `now`,
    /// `after` to `before` minus [`DEFAULT_SPAN_HOURS`].
    pub fn from_query(before: Option<&str>, after: Option<&str>, now: DateTime<Utc>) -> Self {
        let before = parse_timestamp_or(before, now.timestamp());
        let default_after = before.saturating_sub(Duration::hours(DEFAULT_SPAN_HOURS).num_seconds());
        let after = parse_timestamp_or(after, default_after);
        Self { after, before }
    }

    /// Older than the lower bound
    pub fn is_prehistoric(&self, timestamp: i64) -> bool {
        timestamp < self.after
    }

    /// Newer than the upper bound
    pub fn is_future(&self, timestamp: i64) -> bool {
        timestamp > self.before
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        !self.is_prehistoric(timestamp) && !self.is_future(timestamp)
    }
}

fn parse_timestamp_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(default)
}
