// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::CalendarMonth;
use crate::config::{credentials, saved_pages};
use crate::models::Account;
use crate::session::{SavedSession, Session};
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let as_of = match m.get_one::<String>("as_of") {
        Some(s) => parse_date(s.trim())?,
        None => CalendarMonth::today(),
    };
    let mut session = SavedSession::new(
        saved_pages(m)?,
        m.get_one::<String>("test_key").cloned(),
    );
    let accounts = list(&mut session, &credentials(m), as_of)?;

    if !maybe_print_json(m.get_flag("json"), &accounts)? {
        let data = accounts
            .iter()
            .map(|a| {
                vec![
                    a.nick_name.clone(),
                    a.account_type.clone(),
                    a.bsb.clone().unwrap_or_default(),
                    a.number.clone(),
                    a.identifier(),
                    a.available_balance.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Nickname", "Type", "BSB", "Number", "Identifier", "Available"],
                data
            )
        );
    }
    Ok(())
}

pub fn list(
    session: &mut dyn Session,
    credentials: &crate::session::Credentials,
    as_of: CalendarMonth,
) -> Result<Vec<Account>> {
    session
        .connect(credentials)
        .context("Connect to internet banking")?;
    let listings = session.list_accounts(as_of).context("List accounts")?;
    Ok(listings
        .iter()
        .map(|l| Account::from_listing(l, as_of))
        .collect())
}
