use crate::errors::{AppError, AppResult};
use crate::utils::date::{end_of_day_ms, start_of_day_ms};
use chrono::{Datelike, Days, NaiveDate, TimeZone};

/// Range of logs loaded for a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Calendar month containing the date.
    Month(NaiveDate),
    /// Yesterday and today, relative to the date.
    Recent(NaiveDate),
    /// Whole archive.
    All,
}

impl Window {
    /// Parse a `--period` value.
    ///
    /// - `YYYY-MM`     → that month
    /// - `YYYY-MM-DD`  → the month containing that day
    /// - `recent`      → yesterday + today
    /// - `month`       → current month
    /// - `all`         → everything
    pub fn parse(s: &str, today: NaiveDate) -> AppResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "all" => return Ok(Window::All),
            "recent" | "today" => return Ok(Window::Recent(today)),
            "month" => return Ok(Window::Month(today)),
            _ => {}
        }

        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Window::Month(d));
        }
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(Window::Month(d));
        }

        Err(AppError::InvalidPeriod(s.to_string()))
    }

    /// First and last calendar day covered, `None` for [`Window::All`].
    pub fn days(&self) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
        match *self {
            Window::All => Ok(None),
            Window::Month(d) => {
                let first = d.with_day(1).ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
                let next_month = first
                    .checked_add_months(chrono::Months::new(1))
                    .ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
                let last = next_month
                    .pred_opt()
                    .ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
                Ok(Some((first, last)))
            }
            Window::Recent(today) => {
                let yesterday = today
                    .checked_sub_days(Days::new(1))
                    .ok_or_else(|| AppError::InvalidDate(today.to_string()))?;
                Ok(Some((yesterday, today)))
            }
        }
    }

    /// Inclusive epoch-ms bounds, aligned to local midnight in `tz`.
    pub fn bounds<Tz: TimeZone>(&self, tz: &Tz) -> AppResult<Option<(i64, i64)>> {
        match self.days()? {
            None => Ok(None),
            Some((first, last)) => Ok(Some((
                start_of_day_ms(tz, first)?,
                end_of_day_ms(tz, last)?,
            ))),
        }
    }

    /// Date the view is centred on.
    pub fn reference(&self, today: NaiveDate) -> NaiveDate {
        match *self {
            Window::Month(d) | Window::Recent(d) => d,
            Window::All => today,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            Window::Month(d) => d.format("%B %Y").to_string(),
            Window::Recent(d) => format!("{} – {}", d.pred_opt().unwrap_or(d), d),
            Window::All => "all records".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_periods() {
        let today = d(2025, 10, 19);
        assert_eq!(Window::parse("2025-02", today).unwrap(), Window::Month(d(2025, 2, 1)));
        assert_eq!(
            Window::parse("2025-02-14", today).unwrap(),
            Window::Month(d(2025, 2, 14))
        );
        assert_eq!(Window::parse("recent", today).unwrap(), Window::Recent(today));
        assert_eq!(Window::parse("ALL", today).unwrap(), Window::All);
        assert!(matches!(
            Window::parse("2025-13", today),
            Err(AppError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn month_days_handle_leap_years_and_december() {
        assert_eq!(
            Window::Month(d(2024, 2, 10)).days().unwrap(),
            Some((d(2024, 2, 1), d(2024, 2, 29)))
        );
        assert_eq!(
            Window::Month(d(2025, 12, 31)).days().unwrap(),
            Some((d(2025, 12, 1), d(2025, 12, 31)))
        );
    }

    #[test]
    fn month_bounds_are_inclusive_milliseconds() {
        let (start, end) = Window::Month(d(2025, 10, 4)).bounds(&Utc).unwrap().unwrap();
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap().timestamp_millis()
        );
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap().timestamp_millis() - 1
        );
    }

    #[test]
    fn recent_covers_yesterday_and_today() {
        let (start, end) = Window::Recent(d(2025, 3, 1)).bounds(&Utc).unwrap().unwrap();
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap().timestamp_millis()
        );
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap().timestamp_millis() - 1
        );
        assert_eq!(Window::All.bounds(&Utc).unwrap(), None);
    }
}
