// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! `regex-pyre` is a compact backtracking regex engine with a Python
//! `re` compatible surface: `match_`, `search`, `find_all`, `sub`,
//! `split`, and a compiled [`Regex`] handle.
//!
//! The supported syntax is a deliberately restricted subset of
//! Python's `re`: literals, `.`, escaped literals, the preset classes
//! `\d`/`\w`/`\s`, character classes `[...]`/`[^...]` with ranges,
//! capture groups `(...)`, the greedy quantifiers `*`/`+`/`?`/`{n}`,
//! and the anchors `^`/`$`. Alternation (`|`), `{n,m}` ranges,
//! lookaround and in-pattern backreferences are out of scope and are
//! rejected rather than misparsed. Replacement templates for [`sub`]
//! do support `\N` backreferences.
//!
//! Subjects are byte slices and all matching is byte-wise: `.` and
//! character classes consume exactly one byte, so multi-byte UTF-8
//! sequences can be split mid-code-point. This is a documented
//! property of the engine, inherited from its embedded-runtime origin.
//!
//! ```
//! use regex_pyre::Regex;
//!
//! let re = Regex::new(r"(\d+)-(\d+)").unwrap();
//! let m = re.search(b"order 12-34 shipped").unwrap().unwrap();
//!
//! assert_eq!(m.as_bytes(), &b"12-34"[..]);
//! assert_eq!(m.group(1), Some(&b"12"[..]));
//! assert_eq!(m.span(0), Some((6, 11)));
//! ```

#[macro_use]
mod macros;

mod ast;
mod charclass;
mod matcher;
mod parser;
mod process;

pub mod error;
pub mod regex;

pub use error::PyreError;
pub use regex::{compile, find_all, match_, search, split, sub, FindAllItem, Match, Regex};
