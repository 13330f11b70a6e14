// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! A session replayed from pages saved to disk, for testing without the live site.
//!
//! Layout (a `test_key` sub-directory, when given, is searched first):
//!
//! ```text
//! Account summary.csv          nick_name,type,number,current,available
//! <identifier>.csv             date,details,debit,credit,balance[,balance_label]  (no header)
//! <identifier>.alert           optional alert text, e.g. "Error 302033: ..."
//! ```

use super::{AccountListing, Credentials, RawRow, RowBatch, Session, SessionAlert};
use crate::calendar::CalendarMonth;
use crate::error::{Result, StatementError};
use crate::money::MoneyAmount;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ACCOUNT_SUMMARY: &str = "Account summary";
pub const TRANSACTION_HISTORY: &str = "Transaction History";

const ROW_CELLS: usize = 5;

#[derive(Debug, Deserialize)]
struct SummaryRecord {
    nick_name: Option<String>,
    #[serde(rename = "type")]
    account_type: Option<String>,
    number: String,
    current: Option<String>,
    available: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SavedSession {
    root: PathBuf,
    test_key: Option<String>,
    connected: bool,
}

impl SavedSession {
    pub fn new(root: impl Into<PathBuf>, test_key: Option<String>) -> Self {
        SavedSession {
            root: root.into(),
            test_key,
            connected: false,
        }
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(key) = self.test_key.as_deref().filter(|k| !k.is_empty()) {
            dirs.push(self.root.join(key));
        }
        dirs.push(self.root.clone());
        dirs
    }

    fn find_page(&self, names: &[String], ext: &str) -> Option<PathBuf> {
        for dir in self.search_dirs() {
            for name in names {
                let path = dir.join(format!("{}{}", name, ext));
                if path.is_file() {
                    return Some(path);
                }
            }
        }
        None
    }

    fn ensure_connected(&self, expected: &str) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(StatementError::UnexpectedPageState {
                expected: expected.to_string(),
                actual: "Login".to_string(),
            })
        }
    }

    fn summary_path(&self) -> Option<PathBuf> {
        self.find_page(&[ACCOUNT_SUMMARY.to_string()], ".csv")
    }
}

fn csv_error(path: &Path, err: csv::Error) -> StatementError {
    StatementError::Session(format!("{}: {}", path.display(), err))
}

fn read_alert(path: &Path) -> Result<Option<SessionAlert>> {
    let text = fs::read_to_string(path).map_err(|e| StatementError::io(path, e))?;
    let line = text.lines().map(str::trim).find(|l| !l.is_empty());
    Ok(line.map(SessionAlert::parse))
}

impl Session for SavedSession {
    fn connect(&mut self, credentials: &Credentials) -> Result<()> {
        log::info!("Loading saved pages from {}", self.root.display());
        if credentials.user.trim().is_empty() {
            return Err(StatementError::Authentication("no customer number given".into()));
        }
        if self.summary_path().is_none() {
            return Err(StatementError::Authentication(format!(
                "no saved \"{}\" page under {}",
                ACCOUNT_SUMMARY,
                self.root.display()
            )));
        }
        self.connected = true;
        log::debug!("Connected");
        Ok(())
    }

    fn list_accounts(&mut self, _as_of: CalendarMonth) -> Result<Vec<AccountListing>> {
        self.ensure_connected(ACCOUNT_SUMMARY)?;
        let path = self.summary_path().ok_or_else(|| StatementError::UnexpectedPageState {
            expected: ACCOUNT_SUMMARY.to_string(),
            actual: "<missing>".to_string(),
        })?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| csv_error(&path, e))?;

        let mut listings = Vec::new();
        for result in rdr.deserialize::<SummaryRecord>() {
            let rec = result.map_err(|e| csv_error(&path, e))?;
            log::debug!("Found account row values:{:?}:", rec);
            listings.push(AccountListing {
                nick_name: rec.nick_name.filter(|s| !s.is_empty()),
                account_type: rec
                    .account_type
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "transaction-account".to_string()),
                number: rec.number,
                current_balance: MoneyAmount::parse(rec.current.as_deref()),
                available_balance: MoneyAmount::parse(rec.available.as_deref()),
            });
        }
        Ok(listings)
    }

    fn fetch_transaction_rows(
        &mut self,
        identifier: &str,
        nick_name: &str,
        start: CalendarMonth,
        end: CalendarMonth,
    ) -> Result<RowBatch> {
        self.ensure_connected(TRANSACTION_HISTORY)?;
        log::debug!("Filtering '{}' from {} to {}", nick_name, start, end);
        let names = [
            identifier.to_string(),
            format!("{}-{}", TRANSACTION_HISTORY, identifier),
        ];
        let path = self
            .find_page(&names, ".csv")
            .ok_or_else(|| StatementError::UnexpectedPageState {
                expected: TRANSACTION_HISTORY.to_string(),
                actual: format!("<no saved history for {}>", identifier),
            })?;

        let alert = match self.find_page(&names, ".alert") {
            Some(alert_path) => read_alert(&alert_path)?,
            None => None,
        };
        if let Some(a) = &alert {
            log::info!("{}: [{}] {}", a.severity, a.code, a.message);
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| csv_error(&path, e))?;
        let mut rows = Vec::new();
        for result in rdr.records() {
            let rec = result.map_err(|e| csv_error(&path, e))?;
            let cells: Vec<String> = rec.iter().take(ROW_CELLS).map(str::to_string).collect();
            let balance_label = rec
                .get(ROW_CELLS)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            rows.push(RawRow {
                cells,
                balance_label,
            });
        }
        Ok(RowBatch { rows, alert })
    }
}
