// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One run over every discovered account: extract, export, summarise.

use crate::calendar::CalendarMonth;
use crate::error::StatementError;
use crate::models::Account;
use crate::money::{MoneyAmount, Rounding};
use crate::rules::CategoryRules;
use crate::session::Session;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub start: CalendarMonth,
    pub end: CalendarMonth,
    pub rules_dir: PathBuf,
    pub out_dir: PathBuf,
    pub rounding: Rounding,
    pub delimited: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClosingBalance {
    pub nick_name: String,
    pub account: String,
    pub balance: MoneyAmount,
    pub date: CalendarMonth,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountFailure {
    pub nick_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub end_date: CalendarMonth,
    pub summary_path: PathBuf,
    pub closing_balances: Vec<ClosingBalance>,
    pub failures: Vec<AccountFailure>,
}

/// Accounts keyed by nickname for the duration of one run.
#[derive(Debug)]
pub struct StatementBatch {
    accounts: BTreeMap<String, Account>,
    options: BatchOptions,
}

pub fn summary_file_name(end: CalendarMonth) -> String {
    format!("{}-Closing Balances.csv", end.format("%Y%m%d"))
}

impl StatementBatch {
    pub fn new(accounts: impl IntoIterator<Item = Account>, options: BatchOptions) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|a| (a.nick_name.clone(), a))
            .collect();
        StatementBatch { accounts, options }
    }

    /// Builds the batch from the session's account summary as of the end date.
    pub fn discover(session: &mut dyn Session, options: BatchOptions) -> Result<Self> {
        let listings = session
            .list_accounts(options.end)
            .context("List accounts")?;
        let accounts: Vec<Account> = listings
            .iter()
            .map(|l| Account::from_listing(l, options.end))
            .collect();
        log::info!(
            "Processing accounts: {}",
            accounts
                .iter()
                .map(|a| a.nick_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(StatementBatch::new(accounts, options))
    }

    /// Processes the selected accounts (all when `only` is empty). A failing
    /// account is reported and skipped; a lost session ends the run without
    /// writing a summary.
    pub fn run(&mut self, session: &mut dyn Session, only: &[String]) -> Result<BatchReport> {
        for name in only {
            if !self.accounts.contains_key(name) {
                log::warn!("Account '{}' not found; ignoring", name);
            }
        }
        fs::create_dir_all(&self.options.out_dir)
            .with_context(|| format!("Create output dir {}", self.options.out_dir.display()))?;

        let options = self.options.clone();
        let mut closing_balances = Vec::new();
        let mut failures = Vec::new();
        for (key, account) in self
            .accounts
            .iter_mut()
            .filter(|(k, _)| only.is_empty() || only.contains(*k))
        {
            log::debug!("Doing account:{}", key);
            match generate_statement(account, session, &options) {
                Ok(balance) => closing_balances.push(ClosingBalance {
                    nick_name: account.nick_name.clone(),
                    account: account.display_number(),
                    balance,
                    date: account.closing_balance_date,
                }),
                Err(err) => {
                    if err
                        .downcast_ref::<StatementError>()
                        .is_some_and(StatementError::is_fatal_to_run)
                    {
                        return Err(err.context(format!("Processing account '{}'", key)));
                    }
                    log::error!("Account '{}' failed: {:#}", key, err);
                    failures.push(AccountFailure {
                        nick_name: key.clone(),
                        error: format!("{:#}", err),
                    });
                }
            }
        }

        let summary_path = options.out_dir.join(summary_file_name(options.end));
        write_summary(&summary_path, &closing_balances)?;

        log::info!("Closing Balances (as at {}):", options.end.format("%Y%m%d"));
        for cb in &closing_balances {
            log::info!("  {}: {}", cb.nick_name, cb.balance);
        }
        Ok(BatchReport {
            end_date: options.end,
            summary_path,
            closing_balances,
            failures,
        })
    }
}

/// Extracts one account and writes its export files. Nothing is written
/// unless extraction succeeded.
pub fn generate_statement(
    account: &mut Account,
    session: &mut dyn Session,
    options: &BatchOptions,
) -> Result<MoneyAmount> {
    let output_file = options.out_dir.join(format!("{}.qif", account.nick_name));
    log::info!(
        "   Generating QIF for \"{}\" account ({}) in file \"{}\" from {} to {}",
        account.nick_name,
        account.display_number(),
        output_file.display(),
        options.start,
        options.end
    );
    let rules = CategoryRules::load(&options.rules_dir, &account.nick_name)?;
    let closing = account.extract(session, &rules, options.start, options.end, options.rounding)?;

    let qif = account.to_qif();
    let delimited = if options.delimited {
        Some(account.to_delimited()?)
    } else {
        None
    };

    write_export(&output_file, &qif)?;
    if let Some(text) = delimited {
        let csv_file = options.out_dir.join(format!("{}.csv", account.nick_name));
        if let Err(err) = write_export(&csv_file, &text) {
            // An account is exported completely or not at all.
            if let Err(rm) = fs::remove_file(&output_file) {
                log::warn!("Could not remove {}: {}", output_file.display(), rm);
            }
            return Err(err);
        }
    }
    Ok(closing)
}

fn write_export(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Write {}", path.display()))
}

/// `nickname|account|balance`, one line per exported account.
pub fn write_summary(path: &Path, balances: &[ClosingBalance]) -> Result<()> {
    let mut out = String::new();
    for cb in balances {
        let _ = writeln!(out, "{}|{}|{:6}", cb.nick_name, cb.account, cb.balance);
    }
    fs::write(path, out).with_context(|| format!("Write summary {}", path.display()))
}
