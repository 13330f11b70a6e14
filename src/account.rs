// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Extraction pass: raw history rows in, ordered and categorised
//! transactions plus the closing balance out.

use crate::calendar::CalendarMonth;
use crate::error::{Result, StatementError};
use crate::models::{Account, Transaction};
use crate::money::{MoneyAmount, Rounding};
use crate::narrative::{payee_from_memo, split_details};
use crate::rules::CategoryRules;
use crate::session::{RawRow, RowBatch, Session};

/// Day, abbreviated month, two-digit year: `15 Jan 24`.
pub const ROW_DATE_FORMAT: &str = "%d %b %y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Details,
    Debit,
    Credit,
    Balance,
}

/// Expected positional layout of a history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    columns: Vec<Column>,
}

impl Default for RowSchema {
    fn default() -> Self {
        RowSchema {
            columns: vec![
                Column::Date,
                Column::Details,
                Column::Debit,
                Column::Credit,
                Column::Balance,
            ],
        }
    }
}

impl RowSchema {
    /// The schema the site uses for this batch. Alert `error 302033` means
    /// the trailing column is absent; no broader rule is inferred from it.
    pub fn for_batch(batch: &RowBatch) -> Self {
        let mut schema = RowSchema::default();
        if batch.alert.as_ref().is_some_and(|a| a.drops_balance_column()) {
            schema.columns.pop();
        }
        schema
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    fn cell<'r>(&self, row: &'r RawRow, column: Column) -> Option<&'r str> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        row.cell(idx)
    }
}

/// Turns one raw row into a transaction.
#[derive(Debug, Clone)]
pub struct RowNormalizer<'a> {
    pub schema: RowSchema,
    pub rules: &'a CategoryRules,
    pub rounding: Rounding,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(schema: RowSchema, rules: &'a CategoryRules, rounding: Rounding) -> Self {
        RowNormalizer {
            schema,
            rules,
            rounding,
        }
    }

    pub fn normalize(&self, row: &RawRow) -> Result<Transaction> {
        if row.cells.len() < self.schema.arity() {
            return Err(StatementError::SchemaMismatch {
                expected: self.schema.arity(),
                found: row.cells.len(),
            });
        }
        let date_text = self.schema.cell(row, Column::Date).unwrap_or_default();
        let date = CalendarMonth::parse(date_text, ROW_DATE_FORMAT)?;

        let details = split_details(self.schema.cell(row, Column::Details).unwrap_or_default());

        // A debit is an outflow whatever sign or DR marker its text carries.
        let debit = match self.money(self.schema.cell(row, Column::Debit)) {
            MoneyAmount::Defined(v) => MoneyAmount::Defined(-v.abs()),
            MoneyAmount::Undefined => MoneyAmount::Undefined,
        };
        let credit = self.money(self.schema.cell(row, Column::Credit));
        let amount = if debit.is_defined() {
            debit
        } else if credit.is_defined() {
            credit
        } else {
            MoneyAmount::zero()
        };

        let payee = payee_from_memo(&details.memo);
        let category = self.rules.categorize(payee.as_deref(), &details.memo);

        let balance = match self.schema.cell(row, Column::Balance) {
            Some(text) => {
                let text = match row.balance_label.as_deref() {
                    Some(label) => text.replacen(label, "", 1),
                    None => text.to_string(),
                };
                self.money(Some(&text))
            }
            None => MoneyAmount::Undefined,
        };

        let txn = Transaction {
            date,
            trans_type: details.trans_type,
            reference: None,
            payee,
            memo: details.memo,
            amount,
            category,
            balance,
        };
        log::debug!("normalized {:?} -> {:?}", row.cells, txn);
        Ok(txn)
    }

    fn money(&self, text: Option<&str>) -> MoneyAmount {
        MoneyAmount::parse_with(text, self.rounding)
    }
}

impl Account {
    /// Normalises a newest-first batch and commits it as this account's
    /// statement. Bad rows are logged and skipped.
    pub fn load_rows(
        &mut self,
        batch: &RowBatch,
        rules: &CategoryRules,
        end: CalendarMonth,
        rounding: Rounding,
    ) -> MoneyAmount {
        let normalizer = RowNormalizer::new(RowSchema::for_batch(batch), rules, rounding);
        if !batch.rows.is_empty() {
            log::info!(
                "      Processing {} transactions for account \"{}\"",
                batch.rows.len(),
                self.nick_name
            );
        }

        let mut transactions = Vec::with_capacity(batch.rows.len());
        for (index, row) in batch.rows.iter().enumerate() {
            match normalizer.normalize(row) {
                Ok(txn) => transactions.push(txn),
                Err(err @ StatementError::SchemaMismatch { .. }) => {
                    log::info!("skipping row {}: {} ({:?})", index, err, row.cells);
                }
                Err(err) => {
                    log::warn!("skipping row {}: {} ({:?})", index, err, row.cells);
                }
            }
        }
        transactions.reverse();
        log::debug!(
            "    Finished {} transactions for account \"{}\"",
            transactions.len(),
            self.nick_name
        );

        let (closing_balance, closing_date) = match transactions.last() {
            Some(last) => (last.balance, last.date),
            None => (MoneyAmount::zero(), end),
        };
        self.transactions = transactions;
        self.closing_balance = closing_balance;
        self.closing_balance_date = closing_date;
        self.closing_balance
    }

    /// One extraction pass against the session. A session failure leaves the
    /// account untouched.
    pub fn extract(
        &mut self,
        session: &mut dyn Session,
        rules: &CategoryRules,
        start: CalendarMonth,
        end: CalendarMonth,
        rounding: Rounding,
    ) -> Result<MoneyAmount> {
        let batch = session.fetch_transaction_rows(&self.identifier(), &self.nick_name, start, end)?;
        Ok(self.load_rows(&batch, rules, end, rounding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionAlert;

    fn normalizer(rules: &CategoryRules) -> RowNormalizer<'_> {
        RowNormalizer::new(RowSchema::default(), rules, Rounding::default())
    }

    #[test]
    fn debit_wins_over_credit_and_is_negated() {
        let rules = CategoryRules::empty();
        let row = RawRow::new(["15 Jan 24", "SHOP", "50.00", "20.00", "100.00"]);
        let txn = normalizer(&rules).normalize(&row).unwrap();
        assert_eq!(txn.amount.to_string(), "-50.00");
        assert_eq!(txn.balance.to_string(), "100.00");
    }

    #[test]
    fn signed_debit_text_is_still_an_outflow() {
        let rules = CategoryRules::empty();
        for debit in ["50.00 DR", "-minus50.00", "-50.00", "50.00"] {
            let row = RawRow::new(["15 Jan 24", "SHOP", debit, "", "100.00"]);
            let txn = normalizer(&rules).normalize(&row).unwrap();
            assert_eq!(txn.amount.to_string(), "-50.00", "debit text {:?}", debit);
        }
    }

    #[test]
    fn neither_debit_nor_credit_is_zero() {
        let rules = CategoryRules::empty();
        let row = RawRow::new(["15 Jan 24", "NOTE", "", "N/A", "100.00"]);
        let txn = normalizer(&rules).normalize(&row).unwrap();
        assert_eq!(txn.amount, MoneyAmount::zero());
    }

    #[test]
    fn short_rows_are_schema_mismatches() {
        let rules = CategoryRules::empty();
        let row = RawRow::new(["15 Jan 24", "SHOP", "50.00", ""]);
        assert!(matches!(
            normalizer(&rules).normalize(&row),
            Err(StatementError::SchemaMismatch { expected: 5, found: 4 })
        ));
    }

    #[test]
    fn bad_dates_are_parse_errors() {
        let rules = CategoryRules::empty();
        let row = RawRow::new(["yesterday", "SHOP", "50.00", "", "1.00"]);
        assert!(matches!(
            normalizer(&rules).normalize(&row),
            Err(StatementError::Parse { what: "date", .. })
        ));
    }

    #[test]
    fn balance_label_is_removed() {
        let rules = CategoryRules::empty();
        let mut row = RawRow::new(["15 Jan 24", "SHOP", "", "5.00", "Balance $1,005.00 CR"]);
        row.balance_label = Some("Balance".to_string());
        let txn = normalizer(&rules).normalize(&row).unwrap();
        assert_eq!(txn.balance.to_string(), "1005.00");
    }

    #[test]
    fn dropped_balance_column_shrinks_schema() {
        let batch = RowBatch {
            rows: vec![RawRow::new(["15 Jan 24", "SHOP", "5.00", ""])],
            alert: Some(SessionAlert::parse("Error 302033: no balances")),
        };
        let schema = RowSchema::for_batch(&batch);
        assert_eq!(schema.arity(), 4);
        let rules = CategoryRules::empty();
        let txn = RowNormalizer::new(schema, &rules, Rounding::default())
            .normalize(&batch.rows[0])
            .unwrap();
        assert!(txn.balance.is_undefined());
        assert_eq!(txn.amount.to_string(), "-5.00");
    }

    #[test]
    fn other_alerts_keep_full_schema() {
        let batch = RowBatch {
            rows: vec![],
            alert: Some(SessionAlert::parse("Info 100: all good")),
        };
        assert_eq!(RowSchema::for_batch(&batch).arity(), 5);
    }
}
