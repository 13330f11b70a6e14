// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-boundary arithmetic for statement periods.

use crate::error::{Result, StatementError};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date that knows where its month begins and ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth(NaiveDate);

impl CalendarMonth {
    pub fn new(date: NaiveDate) -> Self {
        CalendarMonth(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarMonth)
    }

    pub fn today() -> Self {
        CalendarMonth(Local::now().date_naive())
    }

    /// Parse external date text with a chrono format string, e.g. `"%d %b %y"`.
    pub fn parse(text: &str, format: &str) -> Result<Self> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, format)
            .map(CalendarMonth)
            .map_err(|_| StatementError::parse("date", text))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month_start(&self) -> Self {
        CalendarMonth(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Day before the start of the following month.
    pub fn month_end(&self) -> Self {
        self.month_next().month_end_prev()
    }

    pub fn month_end_prev(&self) -> Self {
        CalendarMonth(self.month_start().0.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    pub fn month_prev(&self) -> Self {
        self.month_end_prev().month_start()
    }

    pub fn month_next(&self) -> Self {
        // 31 days past any first-of-month always lands in the next month.
        let start = self.month_start().0;
        CalendarMonth(
            start
                .checked_add_days(Days::new(31))
                .unwrap_or(NaiveDate::MAX),
        )
        .month_start()
    }

    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

impl From<NaiveDate> for CalendarMonth {
    fn from(date: NaiveDate) -> Self {
        CalendarMonth(date)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarMonth {
        CalendarMonth::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn month_end_handles_leap_years() {
        assert_eq!(d(2024, 2, 10).month_end(), d(2024, 2, 29));
        assert_eq!(d(2023, 2, 10).month_end(), d(2023, 2, 28));
        assert_eq!(d(1900, 2, 1).month_end(), d(1900, 2, 28));
        assert_eq!(d(2000, 2, 1).month_end(), d(2000, 2, 29));
    }

    #[test]
    fn month_navigation_crosses_years() {
        assert_eq!(d(2024, 1, 15).month_prev(), d(2023, 12, 1));
        assert_eq!(d(2024, 1, 15).month_end_prev(), d(2023, 12, 31));
        assert_eq!(d(2024, 12, 31).month_next(), d(2025, 1, 1));
        assert_eq!(d(2024, 1, 31).month_next(), d(2024, 2, 1));
    }

    #[test]
    fn boundaries_bracket_every_day_of_a_leap_year() {
        let mut day = d(2024, 1, 1);
        while day.date().year() == 2024 {
            assert!(day.month_start() <= day && day <= day.month_end());
            assert_eq!(day.month_end_prev().date().succ_opt(), Some(day.month_start().date()));
            assert!(day.month_next().month_start() > day.month_end());
            assert_eq!(
                day.month_end().date().succ_opt(),
                Some(day.month_next().month_start().date())
            );
            day = CalendarMonth::new(day.date().succ_opt().unwrap());
        }
    }

    #[test]
    fn parses_bank_dates() {
        assert_eq!(CalendarMonth::parse("15 Jan 24", "%d %b %y").unwrap(), d(2024, 1, 15));
        assert_eq!(CalendarMonth::parse(" 03 Feb 25 ", "%d %b %y").unwrap(), d(2025, 2, 3));
        assert_eq!(CalendarMonth::parse("20240131", "%Y%m%d").unwrap(), d(2024, 1, 31));
        assert!(matches!(
            CalendarMonth::parse("31 Feb 24", "%d %b %y"),
            Err(StatementError::Parse { what: "date", .. })
        ));
        assert!(CalendarMonth::parse("", "%d %b %y").is_err());
    }

    #[test]
    fn displays_as_iso_date() {
        assert_eq!(d(2024, 1, 5).to_string(), "2024-01-05");
    }
}
