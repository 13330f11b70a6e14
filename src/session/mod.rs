// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The banking session: whatever logs in, lists accounts and hands back raw
//! transaction rows. Calls are synchronous and return fully materialised data.

pub mod saved;

use crate::calendar::CalendarMonth;
use crate::error::Result;
use crate::money::MoneyAmount;

pub use saved::SavedSession;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// One row of the account summary page.
#[derive(Debug, Clone)]
pub struct AccountListing {
    pub nick_name: Option<String>,
    pub account_type: String,
    pub number: String,
    pub current_balance: MoneyAmount,
    pub available_balance: MoneyAmount,
}

/// Positional cells `date, details, debit, credit, balance` as shown on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<String>,
    /// Label text embedded in the balance cell, to be removed before parsing.
    pub balance_label: Option<String>,
}

impl RawRow {
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        RawRow {
            cells: cells.into_iter().map(Into::into).collect(),
            balance_label: None,
        }
    }

    pub fn cell(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAlert {
    pub severity: String,
    pub code: String,
    pub message: String,
}

impl SessionAlert {
    /// Parses `"<Severity> <code>: <message>"`. Short texts are padded on the
    /// left with `info` and `unknown`, so a one-word alert is an info message.
    pub fn parse(text: &str) -> Self {
        let parts: Vec<&str> = text.trim().splitn(3, ' ').collect();
        let padded: Vec<&str> = ["info", "unknown"]
            .into_iter()
            .chain(parts)
            .collect();
        let tail = &padded[padded.len() - 3..];
        SessionAlert {
            severity: tail[0].trim().trim_matches(':').to_lowercase(),
            code: tail[1].trim().trim_matches(':').trim().to_lowercase(),
            message: tail[2].trim().to_string(),
        }
    }

    /// The site reports this when the history table has no balance column.
    pub fn drops_balance_column(&self) -> bool {
        self.severity == "error" && self.code == "302033"
    }
}

/// Rows newest-first, plus any alert the site raised while producing them.
#[derive(Debug, Clone, Default)]
pub struct RowBatch {
    pub rows: Vec<RawRow>,
    pub alert: Option<SessionAlert>,
}

pub trait Session {
    fn connect(&mut self, credentials: &Credentials) -> Result<()>;

    fn list_accounts(&mut self, as_of: CalendarMonth) -> Result<Vec<AccountListing>>;

    fn fetch_transaction_rows(
        &mut self,
        identifier: &str,
        nick_name: &str,
        start: CalendarMonth,
        end: CalendarMonth,
    ) -> Result<RowBatch>;
}
