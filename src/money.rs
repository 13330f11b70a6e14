// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Currency amounts as presented by internet banking: `$1,234.56`,
//! `120.00 DR`, `N/A`, or nothing at all.

use crate::error::{Result, StatementError};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;

static CURRENCY_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+,$]").expect("static regex"));

/// How parsed and computed amounts are rounded.
#[derive(Debug, Clone, Copy)]
pub struct Rounding {
    pub dp: u32,
    pub strategy: RoundingStrategy,
}

impl Rounding {
    pub fn new(dp: u32, strategy: RoundingStrategy) -> Self {
        Rounding { dp, strategy }
    }

    pub fn apply(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.dp, self.strategy)
    }
}

impl Default for Rounding {
    /// Two decimal places, ties rounded toward zero.
    fn default() -> Self {
        Rounding::new(2, RoundingStrategy::MidpointTowardZero)
    }
}

/// An exact amount, or `Undefined` when the source had no usable value.
///
/// `Undefined` is never coerced to zero; callers branch on it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoneyAmount {
    Defined(Decimal),
    #[default]
    Undefined,
}

impl MoneyAmount {
    pub fn zero() -> Self {
        MoneyAmount::Defined(Decimal::ZERO)
    }

    pub fn from_decimal(value: Decimal, rounding: Rounding) -> Self {
        MoneyAmount::Defined(rounding.apply(value))
    }

    /// Lenient parse: absent, sentinel and malformed text all yield `Undefined`.
    pub fn parse(text: Option<&str>) -> Self {
        Self::parse_with(text, Rounding::default())
    }

    pub fn parse_with(text: Option<&str>, rounding: Rounding) -> Self {
        let Some(text) = text else {
            return MoneyAmount::Undefined;
        };
        match Self::parse_strict(text, rounding) {
            Ok(amount) => amount,
            Err(err) => {
                log::debug!("{}; treating as undefined", err);
                MoneyAmount::Undefined
            }
        }
    }

    /// Sentinels map to `Undefined`; anything else that is not a number is an error.
    pub fn parse_strict(text: &str, rounding: Rounding) -> Result<Self> {
        let joined: String = text.split('\n').map(str::trim).collect();
        let value = CURRENCY_NOISE.replace_all(&joined, "");
        let value = value.trim();
        if value.is_empty() || value == "N/A" {
            return Ok(MoneyAmount::Undefined);
        }
        let mut tokens = value.split_whitespace();
        let number = tokens.next().unwrap_or_default().replace("-minus", "-");
        let marker = tokens.next().unwrap_or_default();
        log::trace!("v:{}: n:{}: dc:{}:", value, number, marker);

        let parsed =
            Decimal::from_str(&number).map_err(|_| StatementError::parse("amount", text.trim()))?;
        let signed = if marker == "DR" { -parsed } else { parsed };
        Ok(MoneyAmount::from_decimal(signed, rounding))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, MoneyAmount::Undefined)
    }

    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            MoneyAmount::Defined(v) => Some(*v),
            MoneyAmount::Undefined => None,
        }
    }

    /// The sum re-rounded under `rounding`. Undefined on either side, or a
    /// sum too large for `Decimal`, is undefined.
    pub fn add_with(self, rhs: MoneyAmount, rounding: Rounding) -> MoneyAmount {
        match (self, rhs) {
            (MoneyAmount::Defined(a), MoneyAmount::Defined(b)) => match a.checked_add(b) {
                Some(sum) => MoneyAmount::from_decimal(sum, rounding),
                None => {
                    log::warn!("{} + {} overflows; treating as undefined", a, b);
                    MoneyAmount::Undefined
                }
            },
            _ => MoneyAmount::Undefined,
        }
    }

    /// Fixed two-decimal text, or `None` when undefined.
    fn canonical(&self) -> Option<String> {
        self.value().map(|v| {
            let mut v = v.round_dp_with_strategy(2, RoundingStrategy::MidpointTowardZero);
            if v.is_zero() {
                v.set_sign_positive(true);
            }
            v.rescale(2);
            v.to_string()
        })
    }
}

impl FromStr for MoneyAmount {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self> {
        MoneyAmount::parse_strict(s, Rounding::default())
    }
}

impl Add for MoneyAmount {
    type Output = MoneyAmount;

    fn add(self, rhs: MoneyAmount) -> MoneyAmount {
        self.add_with(rhs, Rounding::default())
    }
}

impl Neg for MoneyAmount {
    type Output = MoneyAmount;

    fn neg(self) -> MoneyAmount {
        match self {
            MoneyAmount::Defined(v) => MoneyAmount::Defined(-v),
            MoneyAmount::Undefined => MoneyAmount::Undefined,
        }
    }
}

impl fmt::Display for MoneyAmount {
    // A bare width right-aligns, like a number would.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.canonical().unwrap_or_else(|| "NaN".to_string());
        match (f.width(), f.align()) {
            (Some(width), None) => write!(f, "{:>width$}", s),
            _ => f.pad(&s),
        }
    }
}

impl Serialize for MoneyAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.canonical() {
            Some(s) => serializer.serialize_str(&s),
            None => serializer.serialize_none(),
        }
    }
}
