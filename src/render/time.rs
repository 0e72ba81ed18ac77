//! Date and time-of-day formatting

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, Months, Utc};

const DATE_FORMAT: &str = "%b %e";
const RECENT_TIME_FORMAT: &str = "%H:%M";
const DISTANT_TIME_FORMAT: &str = "%Y";

/// Width of the time-of-day column, so years line up under `HH:MM`
pub const TIME_OF_DAY_WIDTH: usize = 5;

/// Shown in place of an instant chrono can't represent
pub const UNREPRESENTABLE: &str = "?";

/// Local time of a filesystem timestamp, or `None` when it lies outside
/// chrono's range (file times can be set far past year 262143).
pub fn to_local(instant: SystemTime) -> Option<DateTime<Local>> {
    let utc = match instant.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            DateTime::<Utc>::from_timestamp(i64::try_from(after.as_secs()).ok()?, after.subsec_nanos())
        }
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::<Utc>::from_timestamp(-secs, 0),
                nanos => DateTime::<Utc>::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
            }
        }
    }?;
    Some(utc.with_timezone(&Local))
}

/// Whether `ts` lies less than six calendar months from `now`, in either
/// direction.
pub fn is_recent(ts: &DateTime<Local>, now: &DateTime<Local>) -> bool {
    let earliest = now.checked_sub_months(Months::new(6));
    let latest = now.checked_add_months(Months::new(6));
    earliest.is_none_or(|earliest| *ts > earliest) && latest.is_none_or(|latest| *ts < latest)
}

/// Month and day, e.g. `Oct  9`
pub fn format_date(ts: &DateTime<Local>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// `HH:MM` for recent instants, the year for distant ones
pub fn format_time_of_day(ts: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let format = if is_recent(ts, now) {
        RECENT_TIME_FORMAT
    } else {
        DISTANT_TIME_FORMAT
    };
    ts.format(format).to_string()
}
