// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary:
//
// - c        Any non-meta character matches itself
// - .        Any one byte
// - \c       Escaped character, a literal of `c`
// - \d \w \s Preset character classes
// - [ ]      Character class, supports `a-z` ranges and the presets
// - [^ ]     Negated character class
// - ( )      Capture group
// - *        Zero or more repetitions (greedy)
// - +        One or more repetitions (greedy)
// - ?        Optional (greedy)
// - {n}      Exactly n repetitions
// - ^        Start-of-subject anchor (first character only)
// - $        End-of-subject anchor (last character only)
//
// Unsupported (rejected, not silently ignored):
// - |        Alternation
// - {n,m} {n,}   Variable repetition ranges
// - lookaround, in-pattern backreferences, lazy quantifiers

use crate::{
    ast::{Atom, Program, Quantifier, Token},
    charclass::CharClass,
    error::PyreError,
};

/// Parses a pattern string into a [`Program`].
///
/// The parser is purely syntactic: a quantified group such as `(a)*`
/// parses fine and is rejected by the matcher only when the program
/// is actually run.
pub fn parse(pattern: &str) -> Result<Program, PyreError> {
    let bytes = pattern.as_bytes();
    let mut start = 0;
    let mut end = bytes.len();

    // the anchors are stripped from the working slice bounds
    // before tokenizing.
    let anchor_start = bytes.first() == Some(&b'^');
    if anchor_start {
        start = 1;
    }

    let anchor_end = end > start && bytes[end - 1] == b'$' && !is_escaped(bytes, start, end - 1);
    if anchor_end {
        end -= 1;
    }

    trace!(
        "parse: pattern={:?}, anchor_start={}, anchor_end={}",
        pattern,
        anchor_start,
        anchor_end
    );

    let mut parser = Parser {
        bytes: &bytes[..end],
        pos: start,
        group_count: 0,
    };

    let tokens = parser.parse_sequence(0)?;

    Ok(Program {
        tokens,
        anchor_start,
        anchor_end,
        group_count: parser.group_count,
    })
}

// a trailing character is escaped iff it is preceded by an odd
// number of consecutive backslashes, e.g. `a\$` (escaped) vs `a\\$`
// (the backslash itself is escaped, `$` anchors).
fn is_escaped(bytes: &[u8], start: usize, index: usize) -> bool {
    let mut backslashes = 0;
    let mut cursor = index;
    while cursor > start && bytes[cursor - 1] == b'\\' {
        backslashes += 1;
        cursor -= 1;
    }
    backslashes % 2 == 1
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    // running total of `(` seen, in left-to-right order of the
    // opening parenthesis. becomes `Program::group_count`.
    group_count: usize,
}

impl Parser<'_> {
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek(0);
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn parse_sequence(&mut self, depth: usize) -> Result<Vec<Token>, PyreError> {
        // byte ... ")"?
        // ----
        // ^
        // | current
        //
        // a `)` terminates the sequence only inside a group; at the
        // top level it is an ordinary literal.

        let mut tokens = vec![];

        while let Some(byte) = self.peek(0) {
            if byte == b')' && depth > 0 {
                break;
            }

            if byte == b'|' {
                return Err(PyreError::UnsupportedPattern(
                    "Alternation \"|\" is not supported.".to_owned(),
                ));
            }

            let token = self.parse_token(depth)?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn parse_token(&mut self, depth: usize) -> Result<Token, PyreError> {
        let (atom, group_index) = self.parse_atom(depth)?;
        let quantifier = self.parse_quantifier()?;

        Ok(Token {
            atom,
            quantifier,
            group_index,
        })
    }

    fn parse_atom(&mut self, depth: usize) -> Result<(Atom, Option<usize>), PyreError> {
        let byte = match self.next_byte() {
            Some(byte) => byte,
            None => {
                return Err(PyreError::InvalidPattern(
                    "Unexpected end of pattern.".to_owned(),
                ));
            }
        };

        let atom_and_index = match byte {
            b'(' => {
                // the group index is allocated at the opening
                // parenthesis, before the interior is parsed, so nested
                // groups number left-to-right.
                self.group_count += 1;
                let group_index = self.group_count;

                let tokens = self.parse_sequence(depth + 1)?;

                if self.next_byte() != Some(b')') {
                    return Err(PyreError::InvalidPattern(
                        "Unterminated group, expect \")\".".to_owned(),
                    ));
                }

                (Atom::Group(tokens), Some(group_index))
            }
            b'[' => (Atom::Class(self.parse_charclass()?), None),
            b'.' => (Atom::Any, None),
            b'\\' => match self.next_byte() {
                Some(b'd') => (Atom::Class(CharClass::digit()), None),
                Some(b'w') => (Atom::Class(CharClass::word()), None),
                Some(b's') => (Atom::Class(CharClass::space()), None),
                Some(other) => (Atom::Literal(other), None),
                None => {
                    return Err(PyreError::InvalidPattern(
                        "Dangling escape at end of pattern.".to_owned(),
                    ));
                }
            },
            _ => (Atom::Literal(byte), None),
        };

        Ok(atom_and_index)
    }

    fn parse_charclass(&mut self) -> Result<CharClass, PyreError> {
        // "[" "^"? {byte | byte "-" byte | "\" preset} "]"
        // ---
        // ^
        // | current, "[" consumed

        let mut charclass = CharClass::new();

        if self.peek(0) == Some(b'^') {
            charclass.negated = true;
            self.pos += 1;
        }

        // a `]` as the very first class member is a literal,
        // e.g. `[]abc]`.
        let mut first = true;

        loop {
            let byte = match self.next_byte() {
                Some(byte) => byte,
                None => {
                    return Err(PyreError::InvalidPattern(
                        "Unterminated character class, expect \"]\".".to_owned(),
                    ));
                }
            };

            match byte {
                b']' if !first => break,
                b'\\' => match self.next_byte() {
                    Some(b'd') => charclass.union(&CharClass::digit()),
                    Some(b'w') => charclass.union(&CharClass::word()),
                    Some(b's') => charclass.union(&CharClass::space()),
                    Some(other) => charclass.insert(other),
                    None => {
                        return Err(PyreError::InvalidPattern(
                            "Dangling escape in character class.".to_owned(),
                        ));
                    }
                },
                _ => {
                    // `X-Y` range: a three-byte run whose end byte is
                    // not `]`. otherwise `-` is a plain literal, e.g.
                    // `[ab-]`.
                    if self.peek(0) == Some(b'-') && matches!(self.peek(1), Some(end) if end != b']')
                    {
                        self.pos += 1; // consume "-"
                        if let Some(end_included) = self.next_byte() {
                            charclass.insert_range(byte, end_included);
                        }
                    } else {
                        charclass.insert(byte);
                    }
                }
            }

            first = false;
        }

        Ok(charclass)
    }

    fn parse_quantifier(&mut self) -> Result<Quantifier, PyreError> {
        let quantifier = match self.peek(0) {
            Some(b'*') => {
                self.pos += 1;
                Quantifier::zero_or_more()
            }
            Some(b'+') => {
                self.pos += 1;
                Quantifier::one_or_more()
            }
            Some(b'?') => {
                self.pos += 1;
                Quantifier::optional()
            }
            Some(b'{') => {
                self.pos += 1;
                self.parse_repeat()?
            }
            _ => Quantifier::one(),
        };

        Ok(quantifier)
    }

    fn parse_repeat(&mut self) -> Result<Quantifier, PyreError> {
        // "{" digit+ "}"
        // ---
        // ^
        // | current, "{" consumed

        let mut count = 0usize;
        let mut has_digits = false;

        loop {
            match self.next_byte() {
                Some(byte @ b'0'..=b'9') => {
                    has_digits = true;
                    count = count
                        .saturating_mul(10)
                        .saturating_add((byte - b'0') as usize);
                }
                Some(b'}') => {
                    if !has_digits {
                        return Err(PyreError::InvalidPattern(
                            "Empty repetition count \"{}\".".to_owned(),
                        ));
                    }
                    break;
                }
                Some(_) => {
                    return Err(PyreError::InvalidPattern(
                        "Malformed repetition, expect digits followed by \"}\".".to_owned(),
                    ));
                }
                None => {
                    return Err(PyreError::InvalidPattern(
                        "Unterminated repetition, expect \"}\".".to_owned(),
                    ));
                }
            }
        }

        Ok(Quantifier::repeat(count))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::{Atom, Program, Quantifier, Token},
        charclass::CharClass,
        error::PyreError,
    };

    use super::parse;

    fn single(atom: Atom) -> Token {
        Token {
            atom,
            quantifier: Quantifier::one(),
            group_index: None,
        }
    }

    fn literal(byte: u8) -> Token {
        single(Atom::Literal(byte))
    }

    #[test]
    fn test_parse_literals() {
        let program = parse("abc").unwrap();

        assert_eq!(
            program,
            Program {
                tokens: vec![literal(b'a'), literal(b'b'), literal(b'c')],
                anchor_start: false,
                anchor_end: false,
                group_count: 0,
            }
        );
    }

    #[test]
    fn test_parse_anchors() {
        let program = parse("^ab$").unwrap();
        assert!(program.anchor_start);
        assert!(program.anchor_end);
        assert_eq!(program.tokens, vec![literal(b'a'), literal(b'b')]);

        // a `^` or `$` elsewhere is a plain literal
        let middle = parse("a^b$c").unwrap();
        assert!(!middle.anchor_start);
        assert!(!middle.anchor_end);
        assert_eq!(
            middle.tokens,
            vec![
                literal(b'a'),
                literal(b'^'),
                literal(b'b'),
                literal(b'$'),
                literal(b'c'),
            ]
        );

        // an escaped trailing `$` does not anchor
        let escaped = parse(r"ab\$").unwrap();
        assert!(!escaped.anchor_end);
        assert_eq!(
            escaped.tokens,
            vec![literal(b'a'), literal(b'b'), literal(b'$')]
        );

        // `\\$`: the backslash is escaped, the `$` anchors
        let double = parse(r"ab\\$").unwrap();
        assert!(double.anchor_end);
        assert_eq!(
            double.tokens,
            vec![literal(b'a'), literal(b'b'), literal(b'\\')]
        );
    }

    #[test]
    fn test_parse_quantifiers() {
        let program = parse("a*b+c?d{3}e").unwrap();

        assert_eq!(
            program.tokens,
            vec![
                Token {
                    atom: Atom::Literal(b'a'),
                    quantifier: Quantifier::zero_or_more(),
                    group_index: None,
                },
                Token {
                    atom: Atom::Literal(b'b'),
                    quantifier: Quantifier::one_or_more(),
                    group_index: None,
                },
                Token {
                    atom: Atom::Literal(b'c'),
                    quantifier: Quantifier::optional(),
                    group_index: None,
                },
                Token {
                    atom: Atom::Literal(b'd'),
                    quantifier: Quantifier::repeat(3),
                    group_index: None,
                },
                literal(b'e'),
            ]
        );
    }

    #[test]
    fn test_parse_escapes() {
        let program = parse(r"\d\w\s\.\\").unwrap();

        assert_eq!(
            program.tokens,
            vec![
                single(Atom::Class(CharClass::digit())),
                single(Atom::Class(CharClass::word())),
                single(Atom::Class(CharClass::space())),
                literal(b'.'),
                literal(b'\\'),
            ]
        );
    }

    #[test]
    fn test_parse_any() {
        let program = parse("a.c").unwrap();
        assert_eq!(
            program.tokens,
            vec![literal(b'a'), single(Atom::Any), literal(b'c')]
        );
    }

    #[test]
    fn test_parse_charclass() {
        // chars and a range
        let program = parse("[a-cxy]").unwrap();
        let mut expected = CharClass::new();
        expected.insert_range(b'a', b'c');
        expected.insert(b'x');
        expected.insert(b'y');
        assert_eq!(program.tokens, vec![single(Atom::Class(expected))]);

        // negated
        let negated = parse("[^0-9]").unwrap();
        let mut expected = CharClass::digit();
        expected.negated = true;
        assert_eq!(negated.tokens, vec![single(Atom::Class(expected))]);

        // preset inside a class
        let mixed = parse(r"[a-f\d]").unwrap();
        let mut expected = CharClass::new();
        expected.insert_range(b'a', b'f');
        expected.union(&CharClass::digit());
        assert_eq!(mixed.tokens, vec![single(Atom::Class(expected))]);

        // `]` as the very first member is a literal
        let bracket = parse("[]a]").unwrap();
        let mut expected = CharClass::new();
        expected.insert(b']');
        expected.insert(b'a');
        assert_eq!(bracket.tokens, vec![single(Atom::Class(expected))]);

        // a trailing `-` is a literal, `X-]` is not a range
        let dash = parse("[a-]").unwrap();
        let mut expected = CharClass::new();
        expected.insert(b'a');
        expected.insert(b'-');
        assert_eq!(dash.tokens, vec![single(Atom::Class(expected))]);
    }

    #[test]
    fn test_parse_groups() {
        let program = parse("a(b(c)d)(e)").unwrap();

        assert_eq!(program.group_count, 3);
        assert_eq!(
            program.tokens,
            vec![
                literal(b'a'),
                Token {
                    atom: Atom::Group(vec![
                        literal(b'b'),
                        Token {
                            atom: Atom::Group(vec![literal(b'c')]),
                            quantifier: Quantifier::one(),
                            group_index: Some(2),
                        },
                        literal(b'd'),
                    ]),
                    quantifier: Quantifier::one(),
                    group_index: Some(1),
                },
                Token {
                    atom: Atom::Group(vec![literal(b'e')]),
                    quantifier: Quantifier::one(),
                    group_index: Some(3),
                },
            ]
        );
    }

    #[test]
    fn test_parse_quantified_group_is_accepted() {
        // the parser stays purely syntactic; the matcher rejects this
        // at run time.
        let program = parse("(a)*").unwrap();
        assert_eq!(
            program.tokens,
            vec![Token {
                atom: Atom::Group(vec![literal(b'a')]),
                quantifier: Quantifier::zero_or_more(),
                group_index: Some(1),
            }]
        );
    }

    #[test]
    fn test_parse_invalid_patterns() {
        assert!(matches!(
            parse("(abc"),
            Err(PyreError::InvalidPattern(_))
        ));
        assert!(matches!(
            parse("[abc"),
            Err(PyreError::InvalidPattern(_))
        ));
        assert!(matches!(
            parse("a{2"),
            Err(PyreError::InvalidPattern(_))
        ));
        assert!(matches!(
            parse("a{}"),
            Err(PyreError::InvalidPattern(_))
        ));
        assert!(matches!(
            parse("a{1,2}"),
            Err(PyreError::InvalidPattern(_))
        ));
        assert!(matches!(parse("a\\"), Err(PyreError::InvalidPattern(_))));
    }

    #[test]
    fn test_parse_unsupported_patterns() {
        assert!(matches!(
            parse("a|b"),
            Err(PyreError::UnsupportedPattern(_))
        ));
        assert!(matches!(
            parse("(a|b)c"),
            Err(PyreError::UnsupportedPattern(_))
        ));
    }
}
