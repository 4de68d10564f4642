use crate::{
    date,
    recurrence::{CustomCadence, DayOfMonth, DayOfWeek, MonthOfYear, RecurrenceRule, TimeOfDay},
};
use chrono::{prelude::*, Duration};

/// Computes the instant at which a `Reminder` with the given `RecurrenceRule` should fire
/// next, as seen from `reference`.
///
/// The returned instant is always strictly after `reference`. When the rule's time of day
/// has already passed on the candidate date the calculation rolls over by one full step of
/// the cadence instead of returning an instant in the past.
pub fn next_trigger_at(rule: &RecurrenceRule, reference: NaiveDateTime) -> NaiveDateTime {
    match rule {
        RecurrenceRule::Daily { time } => next_daily(reference, *time, 1),
        RecurrenceRule::Weekly { time, day_of_week } => {
            next_weekly(reference, *time, *day_of_week, 1)
        }
        RecurrenceRule::Biweekly { time, day_of_week } => {
            next_weekly(reference, *time, *day_of_week, 2)
        }
        RecurrenceRule::Monthly { time, day_of_month } => {
            next_monthly(reference, *time, *day_of_month, 1)
        }
        RecurrenceRule::Bimonthly { time, day_of_month } => {
            next_monthly(reference, *time, *day_of_month, 2)
        }
        RecurrenceRule::Yearly {
            time,
            month,
            day_of_month,
        } => next_yearly(reference, *time, *month, *day_of_month, 1),
        RecurrenceRule::Custom {
            time,
            every,
            cadence,
        } => {
            let n = every.get();
            match cadence {
                CustomCadence::Days => next_daily(reference, *time, n),
                CustomCadence::Weeks { day_of_week } => {
                    next_weekly(reference, *time, *day_of_week, n)
                }
                CustomCadence::Months { day_of_month } => {
                    next_monthly(reference, *time, *day_of_month, n)
                }
                CustomCadence::Years {
                    month,
                    day_of_month,
                } => next_yearly(reference, *time, *month, *day_of_month, n),
            }
        }
    }
}

impl RecurrenceRule {
    pub fn next_trigger_at(&self, reference: NaiveDateTime) -> NaiveDateTime {
        next_trigger_at(self, reference)
    }
}

fn next_daily(reference: NaiveDateTime, time: TimeOfDay, days: u32) -> NaiveDateTime {
    let candidate = reference.date().and_time(time.as_naive_time());
    if candidate > reference {
        candidate
    } else {
        candidate + Duration::days(days as i64)
    }
}

fn next_weekly(
    reference: NaiveDateTime,
    time: TimeOfDay,
    day_of_week: DayOfWeek,
    weeks: u32,
) -> NaiveDateTime {
    let date = date::next_or_same_weekday(reference.date(), day_of_week.weekday());
    let candidate = date.and_time(time.as_naive_time());
    if candidate > reference {
        candidate
    } else {
        (date + Duration::weeks(weeks as i64)).and_time(time.as_naive_time())
    }
}

fn next_monthly(
    reference: NaiveDateTime,
    time: TimeOfDay,
    day_of_month: DayOfMonth,
    months: u32,
) -> NaiveDateTime {
    let date = date::with_day_of_month(reference.date(), day_of_month);
    let candidate = date.and_time(time.as_naive_time());
    if candidate > reference {
        candidate
    } else {
        date::add_months(date, months, day_of_month).and_time(time.as_naive_time())
    }
}

fn next_yearly(
    reference: NaiveDateTime,
    time: TimeOfDay,
    month: MonthOfYear,
    day_of_month: DayOfMonth,
    years: u32,
) -> NaiveDateTime {
    let date = date::in_year(reference.year(), month, day_of_month);
    let candidate = date.and_time(time.as_naive_time());
    if candidate > reference {
        candidate
    } else {
        date::add_years(date, years, day_of_month).and_time(time.as_naive_time())
    }
}
