// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement serialisation. Both formats read an already extracted account
//! and never change it, so exporting twice gives identical bytes.

use crate::models::{Account, Transaction};
use anyhow::Result;
use std::fmt::Write as _;

/// QIF account type for a bank account type code.
pub fn qif_account_type(account_type: &str) -> &'static str {
    match account_type {
        "DDA" | "SDA" | "transaction-account" => "Bank",
        "VCD" | "credit-card" => "CCard",
        _ => "Bank",
    }
}

impl Transaction {
    pub fn to_qif(&self) -> String {
        format!(
            "D{}\nT{}\nM{}\nN{}\nP{}\nL{}\n^\n",
            self.date,
            self.amount,
            self.memo,
            self.trans_type,
            self.payee.as_deref().unwrap_or_default(),
            self.category
        )
    }

    fn delimited_fields(&self) -> [String; 6] {
        [
            self.date.to_string(),
            self.amount.to_string(),
            self.memo.clone(),
            self.trans_type.clone(),
            self.payee.clone().unwrap_or_default(),
            self.category.clone(),
        ]
    }
}

impl Account {
    /// Account header, closing balance, then one block per transaction.
    pub fn to_qif(&self) -> String {
        let qif_type = qif_account_type(&self.account_type);
        let mut out = String::new();
        out.push_str("!Account\n");
        let _ = writeln!(out, "N{}", self.display_number());
        let _ = writeln!(out, "T{}", qif_type);
        // Undefined shows as 0.00 here and only here.
        if self.closing_balance.is_undefined() {
            out.push_str("$0.00\n");
        } else {
            let _ = writeln!(out, "${}", self.closing_balance);
        }
        let _ = writeln!(out, "/{}", self.closing_balance_date);
        out.push_str("^\n");
        let _ = writeln!(out, "!Type:{}", qif_type);
        for txn in &self.transactions {
            out.push_str(&txn.to_qif());
        }
        out
    }

    /// One comma-separated line per transaction, no header.
    pub fn to_delimited(&self) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        for txn in &self.transactions {
            wtr.write_record(txn.delimited_fields())?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Flush delimited export: {}", e.error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_types_map_to_qif() {
        assert_eq!(qif_account_type("DDA"), "Bank");
        assert_eq!(qif_account_type("SDA"), "Bank");
        assert_eq!(qif_account_type("transaction-account"), "Bank");
        assert_eq!(qif_account_type("VCD"), "CCard");
        assert_eq!(qif_account_type("credit-card"), "CCard");
        assert_eq!(qif_account_type("mortgage"), "Bank");
    }
}
