// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// A set of bytes, i.e. the `[...]` notation or one of the preset
/// classes `\d`, `\w`, `\s`.
///
/// Membership is kept as a 256-bit table indexed by byte value. The
/// `negated` flag is applied at match time (`contains` XORs it in),
/// the table itself is never inverted, so preset tables stay reusable
/// when unioned into a larger class.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CharClass {
    bits: [u64; 4],
    pub negated: bool,
}

impl CharClass {
    pub fn new() -> Self {
        CharClass {
            bits: [0; 4],
            negated: false,
        }
    }

    /// `\d` == `[0-9]`
    pub fn digit() -> Self {
        let mut charclass = CharClass::new();
        charclass.insert_range(b'0', b'9');
        charclass
    }

    /// `\w` == `[a-zA-Z0-9_]`
    pub fn word() -> Self {
        let mut charclass = CharClass::new();
        charclass.insert_range(b'a', b'z');
        charclass.insert_range(b'A', b'Z');
        charclass.insert_range(b'0', b'9');
        charclass.insert(b'_');
        charclass
    }

    /// `\s` == `[ \t\n\r\x0b\x0c]`
    pub fn space() -> Self {
        let mut charclass = CharClass::new();
        for byte in [b' ', b'\t', b'\n', b'\r', 0x0b, 0x0c] {
            charclass.insert(byte);
        }
        charclass
    }

    pub fn insert(&mut self, byte: u8) {
        self.bits[(byte >> 6) as usize] |= 1 << (byte & 0x3f);
    }

    /// Sets every byte in `start..=end_included`.
    /// An inverted range (start > end) sets nothing.
    pub fn insert_range(&mut self, start: u8, end_included: u8) {
        let mut byte = start;
        while byte <= end_included {
            self.insert(byte);

            if byte == u8::MAX {
                break;
            }
            byte += 1;
        }
    }

    /// Unions the membership table of `other` into `self`.
    /// The `negated` flag of `other` is ignored: only positive preset
    /// classes may appear inside a custom class.
    pub fn union(&mut self, other: &CharClass) {
        for (lhs, rhs) in self.bits.iter_mut().zip(other.bits.iter()) {
            *lhs |= rhs;
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        let member = self.bits[(byte >> 6) as usize] & (1 << (byte & 0x3f)) != 0;
        member ^ self.negated
    }
}

impl Default for CharClass {
    fn default() -> Self {
        Self::new()
    }
}
