// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    ast::Program,
    error::PyreError,
    matcher::{match_tokens, GroupSpan},
};

/// Scans candidate start offsets and runs the matcher at each one.
///
/// With `search == false` (Python's `match()`) only offset 0 is tried.
/// Otherwise offsets `0..=text.len()` are tried in increasing order;
/// the upper bound is inclusive so that an empty pattern can match at
/// the end of the subject. An `anchor_start` pattern pins the scan to
/// offset 0 regardless of `search`.
///
/// On success the returned spans hold the whole match at index 0 and
/// one entry per capture group; spans of non-participating groups keep
/// `matched == false`.
pub fn exec_match(
    program: &Program,
    text: &[u8],
    search: bool,
) -> Result<Option<Vec<GroupSpan>>, PyreError> {
    let last_start = if program.anchor_start || !search {
        0
    } else {
        text.len()
    };

    for pos in 0..=last_start {
        let mut groups = vec![GroupSpan::default(); program.group_count + 1];

        if let Some(end) = match_tokens(&program.tokens, text, pos, &mut groups)? {
            // an end-anchored candidate that stops short is rejected
            // and the scan continues at the next offset.
            if program.anchor_end && end != text.len() {
                continue;
            }

            trace!("exec_match: hit at {}..{}", pos, end);

            groups[0] = GroupSpan {
                start: pos,
                end,
                matched: true,
            };
            return Ok(Some(groups));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::parser::parse;

    use super::exec_match;

    fn whole(pattern: &str, text: &[u8], search: bool) -> Option<(usize, usize)> {
        let program = parse(pattern).unwrap();
        exec_match(&program, text, search)
            .unwrap()
            .map(|spans| (spans[0].start, spans[0].end))
    }

    #[test]
    fn test_exec_match_at_start_only() {
        assert_eq!(whole("abc", b"abcdef", false), Some((0, 3)));
        assert_eq!(whole("bcd", b"abcdef", false), None);
    }

    #[test]
    fn test_exec_search_scans_offsets() {
        assert_eq!(whole("bcd", b"abcdef", true), Some((1, 4)));
        assert_eq!(whole("xyz", b"abcdef", true), None);

        // the first (leftmost) offset wins
        assert_eq!(whole("ab", b"xabab", true), Some((1, 3)));
    }

    #[test]
    fn test_exec_empty_pattern() {
        // an empty pattern matches at offset 0, and still matches at
        // the very end of the subject
        assert_eq!(whole("", b"", true), Some((0, 0)));
        assert_eq!(whole("", b"ab", false), Some((0, 0)));
        assert_eq!(whole("x*", b"ab", true), Some((0, 0)));
    }

    #[test]
    fn test_exec_anchor_start() {
        assert_eq!(whole("^abc", b"abcx", true), Some((0, 3)));
        // anchored patterns never scan past offset 0
        assert_eq!(whole("^abc", b"xabc", true), None);
    }

    #[test]
    fn test_exec_anchor_end() {
        assert_eq!(whole("abc$", b"xxabc", true), Some((2, 5)));
        assert_eq!(whole("abc$", b"abcx", true), None);

        assert_eq!(whole("^abc$", b"abc", true), Some((0, 3)));
        assert_eq!(whole("^abc$", b"xabc", true), None);
        assert_eq!(whole("^abc$", b"abcx", true), None);

        // a rejected end-anchored candidate does not stop the scan
        assert_eq!(whole("a*$", b"aab", true), Some((3, 3)));
    }
}
