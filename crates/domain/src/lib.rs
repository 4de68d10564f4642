mod date;
mod recurrence;
mod reminder;
mod shared;
mod trigger;

pub use recurrence::{
    CustomCadence, DayOfMonth, DayOfWeek, Every, InvalidRecurrenceError, MonthOfYear,
    RecurrenceRule, TimeOfDay,
};
pub use reminder::{InvalidReminderError, Reminder, MAX_TITLE_LEN};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use trigger::next_trigger_at;
