// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("Invalid {what} '{input}'")]
    Parse { what: &'static str, input: String },

    #[error("Row has {found} columns, expected {expected}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("Expected page \"{expected}\", got \"{actual}\"")]
    UnexpectedPageState { expected: String, actual: String },

    #[error("Could not establish banking session: {0}")]
    Authentication(String),

    #[error("Banking session failed: {0}")]
    Session(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StatementError {
    pub fn parse(what: &'static str, input: impl Into<String>) -> Self {
        StatementError::Parse {
            what,
            input: input.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatementError::Io {
            path: path.into(),
            source,
        }
    }

    /// No account can be processed once the session itself is gone.
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(self, StatementError::Authentication(_))
    }
}

pub type Result<T, E = StatementError> = std::result::Result<T, E>;
