// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    ast::{Atom, Token},
    error::PyreError,
};

/// The span of one capture group within a match attempt.
///
/// `matched == false` means the group did not participate in the
/// match, which is distinct from an empty match (`start == end` with
/// `matched == true`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct GroupSpan {
    pub start: usize,
    pub end: usize,
    pub matched: bool,
}

/// Attempts to match the whole token sequence against `text` starting
/// at `pos`, returning the end offset on success.
///
/// On success the group spans recorded along the winning branch are
/// written into `groups`; on failure (`Ok(None)`) `groups` is left
/// untouched. `Err` is an engine-level failure (a quantified group),
/// not "did not match".
pub fn match_tokens(
    tokens: &[Token],
    text: &[u8],
    pos: usize,
    groups: &mut Vec<GroupSpan>,
) -> Result<Option<usize>, PyreError> {
    match_from(tokens, 0, text, pos, groups)
}

// The backtracking core. Recursion advances one token per frame and
// iterates repetition counts within the frame, so the recursion depth
// is proportional to the pattern length (plus group nesting), never to
// the subject length. The worst-case running time is still exponential,
// as with any backtracking engine.
fn match_from(
    tokens: &[Token],
    index: usize,
    text: &[u8],
    pos: usize,
    groups: &mut Vec<GroupSpan>,
) -> Result<Option<usize>, PyreError> {
    // an empty remainder succeeds without consuming anything
    if index >= tokens.len() {
        return Ok(Some(pos));
    }

    let token = &tokens[index];

    if let Atom::Group(group_tokens) = &token.atom {
        if !token.quantifier.is_one() {
            return Err(PyreError::UnsupportedPattern(
                "Quantifiers on groups are not supported.".to_owned(),
            ));
        }

        // the group's tokens are matched in place, starting at the same
        // absolute position in the subject. a failed attempt must not
        // leak partial group recordings, hence the cloned spans.
        let mut attempt = groups.clone();
        if let Some(group_end) = match_from(group_tokens, 0, text, pos, &mut attempt)? {
            if let Some(group_index) = token.group_index {
                attempt[group_index] = GroupSpan {
                    start: pos,
                    end: group_end,
                    matched: true,
                };
            }

            if let Some(final_end) = match_from(tokens, index + 1, text, group_end, &mut attempt)? {
                *groups = attempt;
                return Ok(Some(final_end));
            }
        }

        return Ok(None);
    }

    // non-group atom: compute the greedy upper bound with a plain
    // forward scan, clamp it by the quantifier's own ceiling, then try
    // counts from highest down to the minimum (greedy-first).
    let quantifier = token.quantifier;
    let scan_bound = max_repeat_single(&token.atom, text, pos);
    let ceiling = match quantifier.max {
        Some(max) => max.min(scan_bound),
        None => scan_bound,
    };
    // never below the minimum: an impossible count is tried once and
    // fails in consume_repeats.
    let max_count = ceiling.max(quantifier.min);

    let mut count = max_count;
    loop {
        if let Some(repeat_end) = consume_repeats(&token.atom, count, text, pos) {
            let mut attempt = groups.clone();
            if let Some(final_end) = match_from(tokens, index + 1, text, repeat_end, &mut attempt)? {
                *groups = attempt;
                return Ok(Some(final_end));
            }
        }

        if count == quantifier.min {
            break;
        }
        count -= 1;
    }

    Ok(None)
}

// how many consecutive positions starting at `pos` the atom can match,
// scanning forward until the first miss.
fn max_repeat_single(atom: &Atom, text: &[u8], pos: usize) -> usize {
    let mut count = 0;
    while match_single(atom, text, pos + count).is_some() {
        count += 1;
    }
    count
}

// each repetition must individually match: when `max_count` was clamped
// up to the quantifier minimum, the count exceeds the scanned run and
// has to fail here.
fn consume_repeats(atom: &Atom, count: usize, text: &[u8], pos: usize) -> Option<usize> {
    let mut cursor = pos;
    for _ in 0..count {
        cursor = match_single(atom, text, cursor)?;
    }
    Some(cursor)
}

fn match_single(atom: &Atom, text: &[u8], pos: usize) -> Option<usize> {
    let byte = *text.get(pos)?;

    let matched = match atom {
        Atom::Literal(expected) => byte == *expected,
        Atom::Any => true,
        Atom::Class(charclass) => charclass.contains(byte),
        // groups are handled by match_from before reaching here
        Atom::Group(_) => unreachable!(),
    };

    if matched {
        Some(pos + 1)
    } else {
        None
    }
}
