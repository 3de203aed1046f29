//! Record ids and capture timestamps

use chrono::Local;

/// Display format for capture timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Millisecond-timestamp ids that never repeat within one clock.
///
/// Two ids issued in the same millisecond differ by one.
#[derive(Debug, Clone, Default)]
pub struct IdClock {
    last: i64,
}

impl IdClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose first id is greater than `last`
    pub fn starting_after(last: i64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> i64 {
        let now = Local::now().timestamp_millis();
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}
