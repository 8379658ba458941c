// Countdown arithmetic: the fixed target instant and floor decomposition of the
// remaining time into display units.

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// One of the four numeric countdown displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];
}

/// Fixed instant the countdown runs towards, immutable for a page session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTarget {
    epoch_millis: i64,
}

impl CountdownTarget {
    pub fn from_epoch_millis(epoch_millis: i64) -> Self {
        Self { epoch_millis }
    }

    pub fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Milliseconds left until the target; negative once it has passed.
    pub fn distance_from(&self, now_epoch_millis: i64) -> i64 {
        self.epoch_millis.saturating_sub(now_epoch_millis)
    }
}

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownSnapshot {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub expired: bool,
}

impl CountdownSnapshot {
    /// Decomposes a distance with floor division. A distance of zero or less
    /// is the reached target: all units clamp to zero and `expired` is set.
    pub fn from_distance(distance_ms: i64) -> Self {
        if distance_ms <= 0 {
            return Self::reached();
        }

        Self {
            days: (distance_ms / MS_PER_DAY) as u64,
            hours: ((distance_ms % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((distance_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((distance_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
            expired: false,
        }
    }

    pub fn reached() -> Self {
        Self {
            expired: true,
            ..Self::default()
        }
    }

    pub fn value(&self, unit: TimeUnit) -> u64 {
        match unit {
            TimeUnit::Days => self.days,
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Seconds => self.seconds,
        }
    }

    /// Milliseconds covered by the whole units of this snapshot.
    pub fn covered_millis(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
            + self.seconds as i64 * MS_PER_SECOND
    }

    /// Units whose value differs from `previous`, in display order.
    pub fn changed_units(&self, previous: &CountdownSnapshot) -> Vec<TimeUnit> {
        TimeUnit::ALL
            .into_iter()
            .filter(|unit| self.value(*unit) != previous.value(*unit))
            .collect()
    }
}
