use crate::recurrence::{DayOfMonth, MonthOfYear};
use chrono::{prelude::*, Duration};

/// Builds a date that is guaranteed to exist because `DayOfMonth` never exceeds 28
pub fn ymd(year: i32, month: u32, day: DayOfMonth) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day.get())
        .expect("Day of month is at most 28 and therefore valid in every month")
}

/// The given day of month in the same month and year as `date`
pub fn with_day_of_month(date: NaiveDate, day: DayOfMonth) -> NaiveDate {
    ymd(date.year(), date.month(), day)
}

/// The given month and day of month in the year `year`
pub fn in_year(year: i32, month: MonthOfYear, day: DayOfMonth) -> NaiveDate {
    ymd(year, month.get(), day)
}

// month arithmetic only needs to keep the day because it is always <= 28
pub fn add_months(date: NaiveDate, months: u32, day: DayOfMonth) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    ymd(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, day)
}

pub fn add_years(date: NaiveDate, years: u32, day: DayOfMonth) -> NaiveDate {
    ymd(date.year() + years as i32, date.month(), day)
}

/// First date on or after `date` that falls on `weekday`
pub fn next_or_same_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = date.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    date + Duration::days((target - current).rem_euclid(7))
}
