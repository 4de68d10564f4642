use chrono::{Local, NaiveDateTime};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current local wall clock time. Reminders are scheduled
    /// without timezones so this is the only notion of "now".
    fn get_local_datetime(&self) -> NaiveDateTime;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_local_datetime(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
