// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::rules_dir;
use crate::narrative::payee_from_memo;
use crate::rules::CategoryRules;
use anyhow::{Context, Result};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let nick_name = m
        .get_one::<String>("nick_name")
        .context("NICKNAME is required")?
        .trim();
    let text = m.get_one::<String>("text").context("TEXT is required")?.trim();
    let (source, category) = explain(&rules_dir(m), nick_name, text)?;
    match source {
        Some(path) => println!("Rules: {}", path),
        None => println!("Rules: none found"),
    }
    println!("{} -> {}", text, category);
    Ok(())
}

/// The rule file that applies to `nick_name` and the category `text` gets.
pub fn explain(
    dir: &std::path::Path,
    nick_name: &str,
    text: &str,
) -> Result<(Option<String>, String)> {
    let rules = CategoryRules::load(dir, nick_name)?;
    let payee = payee_from_memo(text);
    let category = rules.categorize(payee.as_deref(), text);
    Ok((rules.source().map(|p| p.display().to_string()), category))
}
