// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::CalendarMonth;
use crate::money::MoneyAmount;
use crate::narrative::{identifier, split_account_number};
use crate::session::AccountListing;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: CalendarMonth,
    #[serde(rename = "type")]
    pub trans_type: String,
    pub reference: Option<String>,
    pub payee: Option<String>,
    pub memo: String,
    pub amount: MoneyAmount,
    pub category: String,
    pub balance: MoneyAmount,
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    #[serde(rename = "type")]
    pub account_type: String,
    pub bsb: Option<String>,
    pub number: String,
    pub nick_name: String,
    pub current_balance: MoneyAmount,
    pub available_balance: MoneyAmount,
    pub at_date: CalendarMonth,
    pub closing_balance: MoneyAmount,
    pub closing_balance_date: CalendarMonth,
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// `number_text` is the summary page's text, e.g. `BSB: 083-004 Acct No: 12-345-6789`.
    pub fn new(
        account_type: &str,
        number_text: &str,
        nick_name: Option<&str>,
        current_balance: MoneyAmount,
        available_balance: MoneyAmount,
        at_date: CalendarMonth,
    ) -> Self {
        let (bsb, number) = split_account_number(number_text);
        let nick_name = match nick_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => identifier(&number),
        };
        let available_balance = if available_balance.is_defined() {
            available_balance
        } else {
            current_balance
        };
        Account {
            account_type: account_type.trim().trim_matches('\'').to_string(),
            bsb,
            number,
            nick_name,
            current_balance,
            available_balance,
            at_date,
            closing_balance: MoneyAmount::zero(),
            closing_balance_date: at_date,
            transactions: Vec::new(),
        }
    }

    pub fn from_listing(listing: &AccountListing, at_date: CalendarMonth) -> Self {
        Account::new(
            &listing.account_type,
            &listing.number,
            listing.nick_name.as_deref(),
            listing.current_balance,
            listing.available_balance,
            at_date,
        )
    }

    /// Digits-only number; the key the banking session knows this account by.
    pub fn identifier(&self) -> String {
        identifier(&self.number)
    }

    /// `bsb number`, or just the number for cards.
    pub fn display_number(&self) -> String {
        match &self.bsb {
            Some(bsb) => format!("{} {}", bsb, self.number),
            None => self.number.clone(),
        }
    }
}
