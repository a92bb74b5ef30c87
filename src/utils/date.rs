use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// Parse the `--at` argument of `take`.
///
/// Accepted: `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM:SS`,
/// or a bare `HH:MM` meaning today.
pub fn parse_at(s: &str, today: NaiveDate) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Ok(today.and_time(t));
    }
    Err(AppError::InvalidTimestamp(s.to_string()))
}

/// Resolve a wall-clock time in `tz` to epoch milliseconds.
/// Ambiguous times (DST fall-back) take the earlier instant.
pub fn to_millis<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> AppResult<i64> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidTimestamp(naive.to_string()))
}

/// First instant of `date` in `tz`. In zones where DST skips midnight the day
/// starts at the first existing wall-clock time.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> AppResult<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))
}

pub fn start_of_day_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> AppResult<i64> {
    Ok(start_of_day(tz, date)?.timestamp_millis())
}

/// Last millisecond of `date` in `tz`.
pub fn end_of_day_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> AppResult<i64> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
    Ok(start_of_day_ms(tz, next)? - 1)
}

/// Calendar date of an epoch-ms timestamp as seen in `tz`.
pub fn date_of<Tz: TimeZone>(tz: &Tz, millis: i64) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

/// Format an epoch-ms timestamp in local time.
pub fn format_millis(millis: i64, fmt: &str) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format(fmt).to_string(),
        None => "--".to_string(),
    }
}
