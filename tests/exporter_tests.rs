// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nabqif::session::{RawRow, RowBatch};
use nabqif::{Account, CalendarMonth, CategoryRules, MoneyAmount, Rounding};

fn end_date() -> CalendarMonth {
    CalendarMonth::from_ymd(2024, 1, 31).unwrap()
}

fn everyday() -> Account {
    Account::new(
        "DDA",
        "BSB: 083-004 Acct No: 12-345-6789",
        Some("Everyday"),
        MoneyAmount::zero(),
        MoneyAmount::Undefined,
        end_date(),
    )
}

fn january_batch() -> RowBatch {
    RowBatch {
        rows: vec![
            RawRow::new([
                "15 Jan 24",
                "SYDNEY   COFFEE SHOP\nEFTPOS DEBIT",
                "50.00",
                "",
                "100.00",
            ]),
            RawRow::new([
                "10 Jan 24",
                "INTERNET TRANSFER SALARY\nTRANSFER CREDIT",
                "",
                "200.00",
                "150.00",
            ]),
        ],
        alert: None,
    }
}

fn loaded() -> Account {
    let mut acct = everyday();
    let rules = CategoryRules::parse("coffee|Dining\n");
    acct.load_rows(&january_batch(), &rules, end_date(), Rounding::default());
    acct
}

#[test]
fn ledger_export_has_header_balance_and_blocks() {
    let acct = loaded();
    assert_eq!(
        acct.to_qif(),
        "!Account\n\
         N083-004 12-345-6789\n\
         TBank\n\
         $100.00\n\
         /2024-01-15\n\
         ^\n\
         !Type:Bank\n\
         D2024-01-10\n\
         T200.00\n\
         MINTERNET TRANSFER SALARY\n\
         NTRANSFER CREDIT\n\
         PSALARY\n\
         LUnspecified\n\
         ^\n\
         D2024-01-15\n\
         T-50.00\n\
         MCOFFEE SHOP\n\
         NEFTPOS DEBIT\n\
         PCOFFEE SHOP\n\
         LDining\n\
         ^\n"
    );
}

#[test]
fn delimited_export_is_one_line_per_transaction() {
    let acct = loaded();
    assert_eq!(
        acct.to_delimited().unwrap(),
        "2024-01-10,200.00,INTERNET TRANSFER SALARY,TRANSFER CREDIT,SALARY,Unspecified\n\
         2024-01-15,-50.00,COFFEE SHOP,EFTPOS DEBIT,COFFEE SHOP,Dining\n"
    );
}

#[test]
fn delimited_export_quotes_embedded_commas() {
    let mut acct = everyday();
    let batch = RowBatch {
        rows: vec![RawRow::new(["02 Jan 24", "SMITH, J", "", "1.00", "1.00"])],
        alert: None,
    };
    acct.load_rows(&batch, &CategoryRules::empty(), end_date(), Rounding::default());
    assert_eq!(
        acct.to_delimited().unwrap(),
        "2024-01-02,1.00,\"SMITH, J\",,\"SMITH, J\",Unspecified\n"
    );
}

#[test]
fn re_export_is_byte_identical() {
    let acct = loaded();
    assert_eq!(acct.to_qif(), acct.to_qif());
    assert_eq!(acct.to_delimited().unwrap(), acct.to_delimited().unwrap());

    assert_eq!(acct.closing_balance.to_string(), "100.00");
    assert_eq!(acct.transactions.len(), 2);
}

#[test]
fn undefined_closing_balance_renders_as_zero_only_in_ledger() {
    let mut acct = everyday();
    let batch = RowBatch {
        rows: vec![RawRow::new(["03 Jan 24", "FEES ACCOUNT KEEPING", "5.00", "", "N/A"])],
        alert: None,
    };
    acct.load_rows(&batch, &CategoryRules::empty(), end_date(), Rounding::default());
    assert!(acct.closing_balance.is_undefined());
    let qif = acct.to_qif();
    assert!(qif.contains("\n$0.00\n/2024-01-03\n"));
    assert!(acct.closing_balance.is_undefined());
}

#[test]
fn empty_statement_closes_at_zero_on_end_date() {
    let mut acct = Account::new(
        "VCD",
        "Card ending 4321",
        Some("Visa"),
        MoneyAmount::Undefined,
        MoneyAmount::Undefined,
        end_date(),
    );
    let closing = acct.load_rows(
        &RowBatch::default(),
        &CategoryRules::empty(),
        end_date(),
        Rounding::default(),
    );
    assert_eq!(closing, MoneyAmount::zero());
    assert_eq!(
        acct.to_qif(),
        "!Account\nN4321\nTCCard\n$0.00\n/2024-01-31\n^\n!Type:CCard\n"
    );
    assert_eq!(acct.to_delimited().unwrap(), "");
}
