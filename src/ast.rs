// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::charclass::CharClass;

/// The parsed form of a pattern string.
///
/// `group_count` equals the number of `Group` atoms encountered during
/// parsing, assigned in left-to-right order of the opening parenthesis,
/// nested groups included. Index 0 is reserved for the whole match and
/// is never assigned by the parser.
#[derive(Debug, PartialEq)]
pub struct Program {
    pub tokens: Vec<Token>,
    pub anchor_start: bool,
    pub anchor_end: bool,
    pub group_count: usize,
}

/// One matchable unit plus its repetition.
///
/// `group_index` is set only for `Group` atoms: a 1-based index into
/// the match's capture-group array.
#[derive(Debug, PartialEq)]
pub struct Token {
    pub atom: Atom,
    pub quantifier: Quantifier,
    pub group_index: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub enum Atom {
    /// matches exactly this byte
    Literal(u8),
    /// `.`, matches any one byte
    Any,
    /// `[...]`, `\d`, `\w`, `\s`
    Class(CharClass),
    /// `(...)`, a capture group owning its own token sequence.
    /// The nesting is strictly a tree, group contents are parsed once
    /// and never mutated.
    Group(Vec<Token>),
}

/// `{min, max}` repetition bounds. `max == None` means unbounded.
///
/// The parser produces exactly one of: `*` (0,inf), `+` (1,inf),
/// `?` (0,1), bare atom (1,1), or `{n}` (n,n). There is no `{n,m}` form.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Quantifier {
    pub min: usize,
    pub max: Option<usize>,
}

impl Quantifier {
    /// the default quantifier of a bare atom
    pub fn one() -> Self {
        Quantifier {
            min: 1,
            max: Some(1),
        }
    }

    /// `*`
    pub fn zero_or_more() -> Self {
        Quantifier { min: 0, max: None }
    }

    /// `+`
    pub fn one_or_more() -> Self {
        Quantifier { min: 1, max: None }
    }

    /// `?`
    pub fn optional() -> Self {
        Quantifier {
            min: 0,
            max: Some(1),
        }
    }

    /// `{n}`
    pub fn repeat(n: usize) -> Self {
        Quantifier {
            min: n,
            max: Some(n),
        }
    }

    pub fn is_one(&self) -> bool {
        self.min == 1 && self.max == Some(1)
    }
}
