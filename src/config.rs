// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::batch::BatchOptions;
use crate::calendar::CalendarMonth;
use crate::money::Rounding;
use crate::session::Credentials;
use crate::utils::parse_date;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::RoundingStrategy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("au.com.nab", "NabQif", "nabqif"));

/// Where saved banking pages live unless `--saved-pages` says otherwise.
pub fn default_saved_pages() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pages"))
}

/// Rule files sit beside the executable by default.
pub fn default_rules_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn parse_rounding(name: &str) -> Result<Rounding> {
    let strategy = match name {
        "half-down" => RoundingStrategy::MidpointTowardZero,
        "half-up" => RoundingStrategy::MidpointAwayFromZero,
        "half-even" => RoundingStrategy::MidpointNearestEven,
        other => return Err(anyhow!("Unknown rounding '{}'", other)),
    };
    Ok(Rounding::new(2, strategy))
}

/// Start defaults to the previous month; end defaults to the end of the
/// start date's month.
pub fn statement_period(
    today: CalendarMonth,
    this_month: bool,
    last_month: bool,
    start: Option<CalendarMonth>,
    end: Option<CalendarMonth>,
) -> (CalendarMonth, CalendarMonth) {
    let start = if this_month {
        today.month_start()
    } else if last_month {
        today.month_prev()
    } else {
        start.unwrap_or_else(|| today.month_prev())
    };
    let end = end.unwrap_or_else(|| start.month_end());
    (start, end)
}

fn opt_date(m: &clap::ArgMatches, id: &str) -> Result<Option<CalendarMonth>> {
    m.get_one::<String>(id)
        .map(|s| parse_date(s.trim()))
        .transpose()
}

pub fn credentials(m: &clap::ArgMatches) -> Credentials {
    Credentials {
        user: m.get_one::<String>("user").cloned().unwrap_or_default(),
        password: m.get_one::<String>("password").cloned().unwrap_or_default(),
    }
}

pub fn saved_pages(m: &clap::ArgMatches) -> Result<PathBuf> {
    match m.get_one::<String>("saved_pages") {
        Some(p) => Ok(PathBuf::from(p.trim())),
        None => default_saved_pages(),
    }
}

pub fn rules_dir(m: &clap::ArgMatches) -> PathBuf {
    m.get_one::<String>("rules_dir")
        .map(|p| PathBuf::from(p.trim()))
        .unwrap_or_else(default_rules_dir)
}

/// Everything the `statements` command needs, resolved from its arguments.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub saved_pages: PathBuf,
    pub test_key: Option<String>,
    pub accounts: Vec<String>,
    pub batch: BatchOptions,
    pub json: bool,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches, today: CalendarMonth) -> Result<Self> {
        let (start, end) = statement_period(
            today,
            m.get_flag("this_month"),
            m.get_flag("last_month"),
            opt_date(m, "start_date")?,
            opt_date(m, "end_date")?,
        );
        if end < start {
            return Err(anyhow!("End date {} is before start date {}", end, start));
        }
        let rounding = parse_rounding(
            m.get_one::<String>("rounding")
                .map(String::as_str)
                .unwrap_or("half-down"),
        )?;
        let out_dir = m
            .get_one::<String>("out_dir")
            .map(|p| PathBuf::from(p.trim()))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            credentials: credentials(m),
            saved_pages: saved_pages(m)?,
            test_key: m.get_one::<String>("test_key").cloned(),
            accounts: m
                .get_many::<String>("account")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
            batch: BatchOptions {
                start,
                end,
                rules_dir: rules_dir(m),
                out_dir,
                rounding,
                delimited: m.get_flag("delimited"),
            },
            json: m.get_flag("json"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarMonth {
        CalendarMonth::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn default_period_is_previous_month() {
        assert_eq!(
            statement_period(d(2024, 3, 15), false, false, None, None),
            (d(2024, 2, 1), d(2024, 2, 29))
        );
    }

    #[test]
    fn this_month_runs_to_month_end() {
        assert_eq!(
            statement_period(d(2024, 3, 15), true, false, None, None),
            (d(2024, 3, 1), d(2024, 3, 31))
        );
    }

    #[test]
    fn explicit_dates_win() {
        assert_eq!(
            statement_period(d(2024, 3, 15), false, false, Some(d(2023, 12, 10)), Some(d(2024, 1, 5))),
            (d(2023, 12, 10), d(2024, 1, 5))
        );
        assert_eq!(
            statement_period(d(2024, 3, 15), false, false, Some(d(2023, 12, 10)), None),
            (d(2023, 12, 10), d(2023, 12, 31))
        );
    }

    #[test]
    fn rounding_names() {
        assert!(parse_rounding("half-down").is_ok());
        assert!(parse_rounding("sideways").is_err());
    }
}
