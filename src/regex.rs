// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    ast::Program,
    error::PyreError,
    matcher::GroupSpan,
    parser::parse,
    process::exec_match,
};

/// A compiled pattern handle.
///
/// Only the raw pattern string is stored: every method re-parses it on
/// the way in. This is a deliberate simplicity/performance trade-off
/// (patterns are short, parsing is linear), not an oversight.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
}

impl Regex {
    /// Validates `pattern` and wraps it into a handle.
    ///
    /// Syntax errors surface here; a quantified group such as `(a)*`
    /// passes validation and fails only when a match is attempted.
    pub fn new(pattern: &str) -> Result<Self, PyreError> {
        parse(pattern)?;
        Ok(Regex {
            pattern: pattern.to_owned(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Python's `re.match`: the match must begin at offset 0.
    pub fn match_<'t>(&self, text: &'t [u8]) -> Result<Option<Match<'t>>, PyreError> {
        let program = parse(&self.pattern)?;
        match_program(&program, text)
    }

    /// Python's `re.search`: the first match at any offset.
    pub fn search<'t>(&self, text: &'t [u8]) -> Result<Option<Match<'t>>, PyreError> {
        let program = parse(&self.pattern)?;
        search_program(&program, text)
    }

    pub fn is_match(&self, text: &[u8]) -> Result<bool, PyreError> {
        Ok(self.search(text)?.is_some())
    }

    /// Python's `re.findall`: all non-overlapping occurrences, left to
    /// right. The item shape mirrors Python: the whole match when the
    /// pattern has no groups, the single group's text when it has one,
    /// a tuple of all group texts when it has two or more.
    pub fn find_all<'t>(&self, text: &'t [u8]) -> Result<Vec<FindAllItem<'t>>, PyreError> {
        let program = parse(&self.pattern)?;
        find_all_program(&program, text)
    }

    /// Python's `re.sub`: replaces up to `count` occurrences (`0` means
    /// all of them), expanding `\N` backreferences in `repl`.
    pub fn sub(&self, repl: &[u8], text: &[u8], count: usize) -> Result<Vec<u8>, PyreError> {
        let program = parse(&self.pattern)?;
        sub_program(&program, repl, text, count)
    }

    /// Python's `re.split`: splits on up to `maxsplit` occurrences
    /// (`0` means no limit). The result always holds exactly
    /// `splits_performed + 1` segments.
    pub fn split<'t>(&self, text: &'t [u8], maxsplit: usize) -> Result<Vec<&'t [u8]>, PyreError> {
        let program = parse(&self.pattern)?;
        split_program(&program, text, maxsplit)
    }
}

/// One `find_all` hit.
#[derive(Debug, PartialEq, Eq)]
pub enum FindAllItem<'t> {
    /// the whole match (pattern without groups), or the single group's
    /// text (pattern with exactly one group)
    Text(&'t [u8]),
    /// one element per capture group, in group order
    Tuple(Vec<&'t [u8]>),
}

/// A successful match over the exact subject slice that was searched.
///
/// Index 0 is the whole match; indices `1..=group_count` are the
/// capture groups. Immutable once produced.
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t [u8],
    spans: Vec<GroupSpan>,
}

impl<'t> Match<'t> {
    fn new(text: &'t [u8], spans: Vec<GroupSpan>) -> Self {
        Match { text, spans }
    }

    /// The text of group `index` (0 = the whole match), or `None` if
    /// the group did not participate in the match.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of capture groups.
    pub fn group(&self, index: usize) -> Option<&'t [u8]> {
        let span = self.checked_span(index);
        if span.matched {
            Some(&self.text[span.start..span.end])
        } else {
            None
        }
    }

    /// The texts of groups `1..=group_count`; empty when the pattern
    /// has no groups.
    pub fn groups(&self) -> Vec<Option<&'t [u8]>> {
        (1..self.spans.len()).map(|index| self.group(index)).collect()
    }

    /// `(start, end)` offsets of group `index`, or `None` if the group
    /// did not participate.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of capture groups.
    pub fn span(&self, index: usize) -> Option<(usize, usize)> {
        let span = self.checked_span(index);
        if span.matched {
            Some((span.start, span.end))
        } else {
            None
        }
    }

    pub fn start(&self, index: usize) -> Option<usize> {
        self.span(index).map(|(start, _)| start)
    }

    pub fn end(&self, index: usize) -> Option<usize> {
        self.span(index).map(|(_, end)| end)
    }

    /// The whole matched slice, i.e. `group(0)` without the `Option`.
    pub fn as_bytes(&self) -> &'t [u8] {
        let span = &self.spans[0];
        &self.text[span.start..span.end]
    }

    fn checked_span(&self, index: usize) -> &GroupSpan {
        match self.spans.get(index) {
            Some(span) => span,
            None => panic!(
                "Group index {} is out of range, the pattern has {} capture group(s).",
                index,
                self.spans.len() - 1
            ),
        }
    }
}

// ---- module-level functions, mirroring Python's `re` module ----

pub fn compile(pattern: &str) -> Result<Regex, PyreError> {
    Regex::new(pattern)
}

pub fn match_<'t>(pattern: &str, text: &'t [u8]) -> Result<Option<Match<'t>>, PyreError> {
    let program = parse(pattern)?;
    match_program(&program, text)
}

pub fn search<'t>(pattern: &str, text: &'t [u8]) -> Result<Option<Match<'t>>, PyreError> {
    let program = parse(pattern)?;
    search_program(&program, text)
}

pub fn find_all<'t>(pattern: &str, text: &'t [u8]) -> Result<Vec<FindAllItem<'t>>, PyreError> {
    let program = parse(pattern)?;
    find_all_program(&program, text)
}

pub fn sub(pattern: &str, repl: &[u8], text: &[u8], count: usize) -> Result<Vec<u8>, PyreError> {
    let program = parse(pattern)?;
    sub_program(&program, repl, text, count)
}

pub fn split<'t>(
    pattern: &str,
    text: &'t [u8],
    maxsplit: usize,
) -> Result<Vec<&'t [u8]>, PyreError> {
    let program = parse(pattern)?;
    split_program(&program, text, maxsplit)
}

// ---- the shared implementations over a parsed program ----

fn match_program<'t>(program: &Program, text: &'t [u8]) -> Result<Option<Match<'t>>, PyreError> {
    let spans = exec_match(program, text, false)?;
    Ok(spans.map(|spans| Match::new(text, spans)))
}

fn search_program<'t>(program: &Program, text: &'t [u8]) -> Result<Option<Match<'t>>, PyreError> {
    let spans = exec_match(program, text, true)?;
    Ok(spans.map(|spans| Match::new(text, spans)))
}

// scans successive suffixes of `text`, yielding each hit re-anchored
// to the original subject. the scan offset advances by
// `max(end, start + 1)` so that zero-length matches still make
// progress.
struct Scanner<'p, 't> {
    program: &'p Program,
    text: &'t [u8],
    scan_pos: usize,
}

impl<'p, 't> Scanner<'p, 't> {
    fn new(program: &'p Program, text: &'t [u8]) -> Self {
        Scanner {
            program,
            text,
            scan_pos: 0,
        }
    }

    // the next hit as (absolute start, absolute end, suffix-relative
    // spans, suffix base offset), or None when the subject is
    // exhausted.
    #[allow(clippy::type_complexity)]
    fn next_hit(&mut self) -> Result<Option<(usize, usize, Vec<GroupSpan>, usize)>, PyreError> {
        if self.scan_pos > self.text.len() {
            return Ok(None);
        }

        let base = self.scan_pos;
        let spans = match exec_match(self.program, &self.text[base..], true)? {
            Some(spans) => spans,
            None => return Ok(None),
        };

        let start = base + spans[0].start;
        let end = base + spans[0].end;
        self.scan_pos = end.max(start + 1);

        Ok(Some((start, end, spans, base)))
    }
}

// a non-participating group contributes an empty slice here, not
// `None`: findall/sub/split coerce every group into text, matching the
// source semantics (`Match::group` alone reports participation).
fn group_slice<'t>(text: &'t [u8], base: usize, spans: &[GroupSpan], index: usize) -> &'t [u8] {
    match spans.get(index) {
        Some(span) if span.matched => &text[base + span.start..base + span.end],
        _ => &[],
    }
}

fn find_all_program<'t>(
    program: &Program,
    text: &'t [u8],
) -> Result<Vec<FindAllItem<'t>>, PyreError> {
    let mut items = vec![];
    let mut scanner = Scanner::new(program, text);

    while let Some((start, end, spans, base)) = scanner.next_hit()? {
        let item = match program.group_count {
            0 => FindAllItem::Text(&text[start..end]),
            1 => FindAllItem::Text(group_slice(text, base, &spans, 1)),
            _ => FindAllItem::Tuple(
                (1..=program.group_count)
                    .map(|index| group_slice(text, base, &spans, index))
                    .collect(),
            ),
        };
        items.push(item);
    }

    Ok(items)
}

fn sub_program(
    program: &Program,
    repl: &[u8],
    text: &[u8],
    count: usize,
) -> Result<Vec<u8>, PyreError> {
    let mut output = Vec::with_capacity(text.len());
    let mut scanner = Scanner::new(program, text);
    let mut tail = 0; // end of the last replaced occurrence
    let mut replaced = 0;

    while count == 0 || replaced < count {
        let (start, end, spans, base) = match scanner.next_hit()? {
            Some(hit) => hit,
            None => break,
        };

        output.extend_from_slice(&text[tail..start]);
        expand_template(&mut output, repl, text, base, &spans);
        tail = end;
        replaced += 1;
    }

    output.extend_from_slice(&text[tail..]);
    Ok(output)
}

// `\N` (a backslash followed by one ASCII digit) expands to the text
// of group N, or to nothing if the group did not participate or does
// not exist. everything else, the backslash of a non-digit escape
// included, is copied verbatim.
fn expand_template(
    output: &mut Vec<u8>,
    repl: &[u8],
    text: &[u8],
    base: usize,
    spans: &[GroupSpan],
) {
    let mut cursor = 0;
    while cursor < repl.len() {
        let byte = repl[cursor];
        if byte == b'\\' && cursor + 1 < repl.len() && repl[cursor + 1].is_ascii_digit() {
            let index = (repl[cursor + 1] - b'0') as usize;
            output.extend_from_slice(group_slice(text, base, spans, index));
            cursor += 2;
        } else {
            output.push(byte);
            cursor += 1;
        }
    }
}

fn split_program<'t>(
    program: &Program,
    text: &'t [u8],
    maxsplit: usize,
) -> Result<Vec<&'t [u8]>, PyreError> {
    let mut segments = vec![];
    let mut scanner = Scanner::new(program, text);
    let mut tail = 0;
    let mut splits = 0;

    while maxsplit == 0 || splits < maxsplit {
        let (start, end, ..) = match scanner.next_hit()? {
            Some(hit) => hit,
            None => break,
        };

        segments.push(&text[tail..start]);
        tail = end;
        splits += 1;
    }

    segments.push(&text[tail..]);
    Ok(segments)
}
