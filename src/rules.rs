// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Payee category rules: `pattern|category` lines, first match wins.

use crate::error::{Result, StatementError};
use regex::{Regex, RegexBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATEGORY: &str = "Unspecified";
pub const SHARED_RULES_FILE: &str = "PayeeCategories.txt";

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub pattern: String,
    pub category: String,
    regex: Regex,
}

impl CategoryRule {
    /// Patterns are case-insensitive regexes; one that does not compile is
    /// matched as literal text instead.
    pub fn new(pattern: &str, category: &str) -> Self {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|err| {
                log::warn!("Rule pattern '{}' is not a valid regex ({}); matching literally", pattern, err);
                RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(true)
                    .build()
                    .expect("escaped pattern is a valid regex")
            });
        CategoryRule {
            pattern: pattern.to_string(),
            category: category.to_string(),
            regex,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered rules; earlier rules shadow later ones.
#[derive(Debug, Clone, Default)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    source: Option<PathBuf>,
}

impl CategoryRules {
    pub fn empty() -> Self {
        CategoryRules::default()
    }

    /// Account-specific file first, then the shared one.
    pub fn candidate_files(dir: &Path, nick_name: &str) -> [PathBuf; 2] {
        [
            dir.join(format!("PayeeCategories-{}.txt", nick_name)),
            dir.join(SHARED_RULES_FILE),
        ]
    }

    /// Reads at most one rule file; no file at all is an empty rule set.
    pub fn load(dir: &Path, nick_name: &str) -> Result<Self> {
        for path in Self::candidate_files(dir, nick_name) {
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|e| StatementError::io(&path, e))?;
            let mut rules = Self::parse(&text);
            log::debug!("Loaded {} category rules from {}", rules.len(), path.display());
            rules.source = Some(path);
            return Ok(rules);
        }
        log::debug!("No category rules for '{}' in {}", nick_name, dir.display());
        Ok(Self::empty())
    }

    /// The category is everything after the last `|`, so patterns may use alternation.
    pub fn parse(text: &str) -> Self {
        let mut rules = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.rsplit_once('|') {
                Some((pattern, category)) if !pattern.trim().is_empty() && !category.trim().is_empty() => {
                    rules.push(CategoryRule::new(pattern.trim(), category.trim()));
                }
                _ => log::warn!("Skipping malformed category rule on line {}: '{}'", idx + 1, line),
            }
        }
        CategoryRules { rules, source: None }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn first_match(&self, text: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.is_match(text))
    }

    /// Payee is tried before memo; the first field with any match decides.
    pub fn categorize(&self, payee: Option<&str>, memo: &str) -> String {
        [payee.unwrap_or_default(), memo]
            .into_iter()
            .find_map(|field| self.first_match(field))
            .map(|r| r.category.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }
}
