// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

/// The failure of an entire top-level operation
/// (`match_`/`search`/`find_all`/`sub`/`split`/`compile`).
///
/// Both variants are expected, recoverable conditions on the caller's
/// side, equivalent to Python's `re.error`. They are never used to signal
/// "the pattern did not match this text" -- that case is `Ok(None)`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PyreError {
    /// Syntactically malformed pattern: unterminated group or character
    /// class, malformed `{n}` quantifier, dangling escape.
    InvalidPattern(String),

    /// Syntactically valid but out of scope for this engine: alternation
    /// (`|`), or a quantifier other than exactly-one applied to a group.
    UnsupportedPattern(String),
}

impl Display for PyreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PyreError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
            PyreError::UnsupportedPattern(msg) => write!(f, "Unsupported pattern: {}", msg),
        }
    }
}

impl std::error::Error for PyreError {}
