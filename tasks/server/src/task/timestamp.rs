use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

/// Source of the current time used to stamp new tasks.
pub trait TaskTimestamp: Send + Sync {
    /// Returns the current local date-time in the provider's zone.
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock bound to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemTaskTimestamp {
    offset: FixedOffset,
}

impl SystemTaskTimestamp {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemTaskTimestamp {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl TaskTimestamp for SystemTaskTimestamp {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTaskTimestamp {
    now: NaiveDateTime,
}

impl FixedTaskTimestamp {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl TaskTimestamp for FixedTaskTimestamp {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    #[test]
    fn fixed_timestamp_always_returns_same_time() {
        let now = NaiveDate::from_ymd_opt(2020, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let timestamp = FixedTaskTimestamp::new(now);

        assert_eq!(timestamp.now(), now);
        assert_eq!(timestamp.now(), now);
    }

    #[test]
    fn system_timestamp_applies_offset() {
        let utc = SystemTaskTimestamp::default();
        let ahead = SystemTaskTimestamp::new(FixedOffset::east_opt(5 * 3600).unwrap());

        let difference = ahead.now() - utc.now();

        assert!((difference - TimeDelta::hours(5)).abs() < TimeDelta::seconds(5));
    }
}
