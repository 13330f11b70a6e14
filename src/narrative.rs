// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! String surgery on the bank's presentation text. Everything here is pure so
//! that presentation changes stay out of the reconciliation code.

use once_cell::sync::Lazy;
use regex::Regex;

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("static regex"));

static PAYEE_NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^.*[0-9][0-9]:[0-9][0-9] ",
        r"^INTERNET BPAY *",
        r"^INTERNET TRANSFER *",
        r"^FEES *",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

static BSB_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^BSB:\s*(?P<bsb>\S+)\s+Acc(?:t No)?:\s*(?P<number>.+)$").expect("static regex")
});

static CARD_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Card ending\s*(?P<number>\S+)").expect("static regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    pub location: String,
    pub memo: String,
    pub trans_type: String,
}

/// Splits a details cell. The first line is the narrative, cut at its last
/// run of two or more spaces into `location` and `memo`; later lines are the
/// transaction type text.
pub fn split_details(blob: &str) -> Details {
    let mut lines = blob.lines();
    let narrative = lines.next().unwrap_or_default().trim();
    let trans_type = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let (location, memo) = match MULTI_SPACE.find_iter(narrative).last() {
        Some(m) => (
            narrative[..m.start()].trim().to_string(),
            narrative[m.end()..].trim().to_string(),
        ),
        None => (String::new(), narrative.to_string()),
    };
    Details {
        location,
        memo,
        trans_type,
    }
}

/// Memo with time stamps and channel prefixes removed; `None` for an empty memo.
pub fn payee_from_memo(memo: &str) -> Option<String> {
    if memo.is_empty() {
        return None;
    }
    let payee = PAYEE_NOISE
        .iter()
        .fold(memo.to_string(), |acc, re| re.replace(&acc, "").into_owned());
    Some(payee)
}

/// `(bsb, number)` from the account summary's number text.
pub fn split_account_number(text: &str) -> (Option<String>, String) {
    let text = text.trim();
    if let Some(caps) = BSB_NUMBER.captures(text) {
        return (Some(caps["bsb"].to_string()), caps["number"].trim().to_string());
    }
    if let Some(caps) = CARD_ENDING.captures(text) {
        return (None, caps["number"].to_string());
    }
    (None, text.to_string())
}

/// The digits of an account number: the key the banking site uses for it.
pub fn identifier(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_run_of_spaces() {
        let d = split_details("SOMEMERCHANT   COFFEE SHOP");
        assert_eq!(d.location, "SOMEMERCHANT");
        assert_eq!(d.memo, "COFFEE SHOP");

        let d = split_details("A  B    C D");
        assert_eq!(d.location, "A  B");
        assert_eq!(d.memo, "C D");
    }

    #[test]
    fn single_spaces_leave_everything_in_memo() {
        let d = split_details("  INTERNET BPAY TELSTRA ");
        assert_eq!(d.location, "");
        assert_eq!(d.memo, "INTERNET BPAY TELSTRA");
        assert_eq!(split_details(""), Details::default());
    }

    #[test]
    fn later_lines_are_transaction_type() {
        let d = split_details("SYDNEY   WOOLWORTHS 1234\nEFTPOS DEBIT\n");
        assert_eq!(d.memo, "WOOLWORTHS 1234");
        assert_eq!(d.trans_type, "EFTPOS DEBIT");
    }

    #[test]
    fn payee_strips_known_prefixes() {
        assert_eq!(payee_from_memo("INTERNET BPAY TELSTRA").as_deref(), Some("TELSTRA"));
        assert_eq!(
            payee_from_memo("INTERNET TRANSFER  J SMITH").as_deref(),
            Some("J SMITH")
        );
        assert_eq!(payee_from_memo("FEES ACCOUNT KEEPING").as_deref(), Some("ACCOUNT KEEPING"));
        assert_eq!(
            payee_from_memo("12/01 14:32 COFFEE SHOP").as_deref(),
            Some("COFFEE SHOP")
        );
        assert_eq!(payee_from_memo("COFFEE SHOP").as_deref(), Some("COFFEE SHOP"));
        assert_eq!(payee_from_memo(""), None);
    }

    #[test]
    fn account_numbers() {
        assert_eq!(
            split_account_number("BSB: 083-004 Acct No: 12-345-6789"),
            (Some("083-004".to_string()), "12-345-6789".to_string())
        );
        assert_eq!(
            split_account_number("BSB: 083-004  Acc: 123456789"),
            (Some("083-004".to_string()), "123456789".to_string())
        );
        assert_eq!(
            split_account_number("Card ending 4321 Visa"),
            (None, "4321".to_string())
        );
        assert_eq!(split_account_number("55-123-4567"), (None, "55-123-4567".to_string()));
        assert_eq!(identifier("12-345-6789"), "123456789");
    }
}
