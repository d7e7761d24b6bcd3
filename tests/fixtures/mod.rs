// Test fixtures - reusable test data
// Provides consistent rules and dates across all test files

#![allow(dead_code)]

/// Sample ISO-8601 start dates
pub mod dates {
    /// Jan 1, 2025 at noon UTC
    pub const JAN_1_2025: &str = "2025-01-01T12:00:00.000Z";

    /// Feb 14, 2025 at noon UTC (Valentine's Day)
    pub const VALENTINE_2025: &str = "2025-02-14T12:00:00.000Z";

    /// Feb 29, 2024 (leap year)
    pub const LEAP_DAY_2024: &str = "2024-02-29T12:00:00.000Z";
}

/// Sample rules, in the unprefixed form the owner stores
pub mod rules {
    /// Every weekday (the editor's default)
    pub const WEEKDAYS: &str = "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,TU,WE,TH,FR";

    /// Every other Monday and Thursday
    pub const FORTNIGHTLY_MON_THU: &str = "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,TH";

    /// The 15th of every month
    pub const MONTHLY_15TH: &str = "FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15";

    /// Last Friday of every quarter
    pub const QUARTERLY_LAST_FRIDAY: &str = "FREQ=MONTHLY;INTERVAL=3;BYSETPOS=-1;BYDAY=FR";
}
