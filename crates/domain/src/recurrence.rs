use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Display};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidRecurrenceError {
    #[error("Hour must be between 0 and 23, got: {0}")]
    Hour(u32),
    #[error("Minute must be between 0 and 59, got: {0}")]
    Minute(u32),
    #[error("Day of week must be between 1 (Monday) and 7 (Sunday), got: {0}")]
    DayOfWeek(u32),
    #[error("Day of month must be between 1 and 28, got: {0}")]
    DayOfMonth(u32),
    #[error("Month must be between 1 and 12, got: {0}")]
    Month(u32),
    #[error("Custom interval must be between 1 and 365, got: {0}")]
    Every(u32),
}

/// Wall clock time at which a `Reminder` fires, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimeOfDayRaw", into = "TimeOfDayRaw")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

#[derive(Serialize, Deserialize)]
struct TimeOfDayRaw {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidRecurrenceError> {
        if hour > 23 {
            return Err(InvalidRecurrenceError::Hour(hour));
        }
        if minute > 59 {
            return Err(InvalidRecurrenceError::Minute(minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
            .expect("Hour and minute are validated on construction")
    }
}

impl TryFrom<TimeOfDayRaw> for TimeOfDay {
    type Error = InvalidRecurrenceError;

    fn try_from(raw: TimeOfDayRaw) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

impl From<TimeOfDay> for TimeOfDayRaw {
    fn from(time: TimeOfDay) -> Self {
        Self {
            hour: time.hour,
            minute: time.minute,
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// ISO day of week: Monday -> 1, Sunday -> 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayOfWeek(u32);

impl DayOfWeek {
    pub fn new(day: u32) -> Result<Self, InvalidRecurrenceError> {
        if (1..=7).contains(&day) {
            Ok(Self(day))
        } else {
            Err(InvalidRecurrenceError::DayOfWeek(day))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        match self.0 {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }
}

impl TryFrom<u32> for DayOfWeek {
    type Error = InvalidRecurrenceError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DayOfWeek> for u32 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        };
        f.write_str(name)
    }
}

/// Day of month limited to 1 - 28 so that it exists in every month of every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayOfMonth(u32);

impl DayOfMonth {
    pub const MAX: u32 = 28;

    pub fn new(day: u32) -> Result<Self, InvalidRecurrenceError> {
        if (1..=Self::MAX).contains(&day) {
            Ok(Self(day))
        } else {
            Err(InvalidRecurrenceError::DayOfMonth(day))
        }
    }

    /// Forces user input into the valid range, e.g. 31 becomes 28 and 0 becomes 1.
    pub fn clamped(day: u32) -> Self {
        Self(day.clamp(1, Self::MAX))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DayOfMonth {
    type Error = InvalidRecurrenceError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DayOfMonth> for u32 {
    fn from(day: DayOfMonth) -> Self {
        day.0
    }
}

/// January -> 1, December -> 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MonthOfYear(u32);

impl MonthOfYear {
    pub fn new(month: u32) -> Result<Self, InvalidRecurrenceError> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(InvalidRecurrenceError::Month(month))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for MonthOfYear {
    type Error = InvalidRecurrenceError;

    fn try_from(month: u32) -> Result<Self, Self::Error> {
        Self::new(month)
    }
}

impl From<MonthOfYear> for u32 {
    fn from(month: MonthOfYear) -> Self {
        month.0
    }
}

impl Display for MonthOfYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        };
        f.write_str(name)
    }
}

/// Step count of a `Custom` cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Every(u32);

impl Every {
    pub const MAX: u32 = 365;

    pub fn new(n: u32) -> Result<Self, InvalidRecurrenceError> {
        if (1..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(InvalidRecurrenceError::Every(n))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Every {
    type Error = InvalidRecurrenceError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Every> for u32 {
    fn from(n: Every) -> Self {
        n.0
    }
}

/// How often a `Reminder` repeats and at which time of day (and day / month
/// where relevant) it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RecurrenceRule {
    Daily {
        time: TimeOfDay,
    },
    Weekly {
        time: TimeOfDay,
        day_of_week: DayOfWeek,
    },
    /// Every second week
    Biweekly {
        time: TimeOfDay,
        day_of_week: DayOfWeek,
    },
    Monthly {
        time: TimeOfDay,
        day_of_month: DayOfMonth,
    },
    /// Every second month
    Bimonthly {
        time: TimeOfDay,
        day_of_month: DayOfMonth,
    },
    Yearly {
        time: TimeOfDay,
        month: MonthOfYear,
        day_of_month: DayOfMonth,
    },
    /// Every `every` units of `cadence`
    Custom {
        time: TimeOfDay,
        every: Every,
        cadence: CustomCadence,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CustomCadence {
    Days,
    Weeks {
        day_of_week: DayOfWeek,
    },
    Months {
        day_of_month: DayOfMonth,
    },
    Years {
        month: MonthOfYear,
        day_of_month: DayOfMonth,
    },
}

impl RecurrenceRule {
    pub fn time(&self) -> TimeOfDay {
        match self {
            Self::Daily { time }
            | Self::Weekly { time, .. }
            | Self::Biweekly { time, .. }
            | Self::Monthly { time, .. }
            | Self::Bimonthly { time, .. }
            | Self::Yearly { time, .. }
            | Self::Custom { time, .. } => *time,
        }
    }
}

fn pluralize(n: u32, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily { time } => write!(f, "every day at {}", time),
            Self::Weekly { time, day_of_week } => {
                write!(f, "every week on {} at {}", day_of_week, time)
            }
            Self::Biweekly { time, day_of_week } => {
                write!(f, "every 2 weeks on {} at {}", day_of_week, time)
            }
            Self::Monthly { time, day_of_month } => {
                write!(f, "every month on day {} at {}", day_of_month.get(), time)
            }
            Self::Bimonthly { time, day_of_month } => {
                write!(f, "every 2 months on day {} at {}", day_of_month.get(), time)
            }
            Self::Yearly {
                time,
                month,
                day_of_month,
            } => write!(
                f,
                "every year on {} {} at {}",
                day_of_month.get(),
                month,
                time
            ),
            Self::Custom {
                time,
                every,
                cadence,
            } => {
                let n = every.get();
                match cadence {
                    CustomCadence::Days => {
                        write!(f, "every {} {} at {}", n, pluralize(n, "day", "days"), time)
                    }
                    CustomCadence::Weeks { day_of_week } => write!(
                        f,
                        "every {} {} on {} at {}",
                        n,
                        pluralize(n, "week", "weeks"),
                        day_of_week,
                        time
                    ),
                    CustomCadence::Months { day_of_month } => write!(
                        f,
                        "every {} {} on day {} at {}",
                        n,
                        pluralize(n, "month", "months"),
                        day_of_month.get(),
                        time
                    ),
                    CustomCadence::Years {
                        month,
                        day_of_month,
                    } => write!(
                        f,
                        "every {} {} on {} {} at {}",
                        n,
                        pluralize(n, "year", "years"),
                        day_of_month.get(),
                        month,
                        time
                    ),
                }
            }
        }
    }
}
