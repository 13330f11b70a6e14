// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::CalendarMonth;
use anyhow::{Context, Result};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

/// Command line dates are `YYYYMMDD`.
pub fn parse_date(s: &str) -> Result<CalendarMonth> {
    CalendarMonth::parse(s, "%Y%m%d")
        .with_context(|| format!("Invalid date '{}', expected YYYYMMDD", s))
}

pub fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
