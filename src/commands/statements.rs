// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::batch::{BatchReport, StatementBatch};
use crate::calendar::CalendarMonth;
use crate::config::Config;
use crate::session::{SavedSession, Session};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let config = Config::from_matches(m, CalendarMonth::today())?;
    let mut session = SavedSession::new(&config.saved_pages, config.test_key.clone());
    let report = run(&config, &mut session)?;

    if !maybe_print_json(config.json, &report)? {
        let data = report
            .closing_balances
            .iter()
            .map(|cb| {
                vec![
                    cb.nick_name.clone(),
                    cb.account.clone(),
                    cb.date.to_string(),
                    cb.balance.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Number", "As At", "Closing Balance"], data)
        );
        for failure in &report.failures {
            eprintln!("{}: {}", failure.nick_name, failure.error);
        }
        println!("Wrote {}", report.summary_path.display());
    }
    Ok(())
}

/// Connects, discovers accounts and runs the batch for the configured period.
pub fn run(config: &Config, session: &mut dyn Session) -> Result<BatchReport> {
    log::info!("Launching and connecting");
    session
        .connect(&config.credentials)
        .context("Connect to internet banking")?;
    let mut batch = StatementBatch::discover(session, config.batch.clone())?;
    batch.run(session, &config.accounts)
}
