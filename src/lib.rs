// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod account;
pub mod batch;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod money;
pub mod narrative;
pub mod rules;
pub mod session;
pub mod utils;

pub use calendar::CalendarMonth;
pub use error::StatementError;
pub use models::{Account, Transaction};
pub use money::{MoneyAmount, Rounding};
pub use rules::CategoryRules;
