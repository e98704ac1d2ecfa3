//! Alphabet: bidirectional mapping between symbols and dense indices.
//!
//! Two representations share the [`Alphabet`] contract: a contiguous
//! [`CharacterRange`] (e.g. `A-Z`) and an explicit [`MixedAlphabet`] listing
//! arbitrary distinct symbols in order. Both are immutable after construction
//! and are shared read-only through [`SharedAlphabet`].

use std::fmt;
use std::rc::Rc;

use crate::error::EnigmaError;

/// Shared handle to an alphabet, held by the machine and every permutation.
pub type SharedAlphabet = Rc<dyn Alphabet>;

/// An ordered set of distinct symbols indexed `0..size()`.
pub trait Alphabet: fmt::Debug {
    /// Number of symbols.
    fn size(&self) -> i32;

    /// Returns `true` if `ch` is one of the symbols.
    fn contains(&self, ch: char) -> bool;

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `index` is outside `0..size()`.
    fn to_char(&self, index: i32) -> Result<char, EnigmaError>;

    /// Returns the index of `ch`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `ch` is not in the alphabet.
    fn to_int(&self, ch: char) -> Result<i32, EnigmaError>;

    /// All symbols in index order.
    fn symbols(&self) -> String {
        (0..self.size())
            .filter_map(|i| self.to_char(i).ok())
            .collect()
    }
}

const SURROGATE_FIRST: u32 = 0xD800;
const SURROGATE_LAST: u32 = 0xDFFF;

/// Alphabet of the contiguous character range `first..=last`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRange {
    first: char,
    last: char,
}

impl CharacterRange {
    /// Creates the range `first..=last`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] if `last` precedes `first`, or if the
    /// range spans the surrogate block `U+D800..=U+DFFF`, which holds no `char`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::alphabet::{Alphabet, CharacterRange};
    ///
    /// let upper = CharacterRange::new('A', 'Z').unwrap();
    /// assert_eq!(upper.size(), 26);
    /// assert_eq!(upper.to_int('C').unwrap(), 2);
    /// ```
    pub fn new(first: char, last: char) -> Result<Self, EnigmaError> {
        if first > last {
            return Err(EnigmaError::format(format!(
                "empty character range {}-{}",
                first, last
            )));
        }
        if (first as u32) < SURROGATE_FIRST && (last as u32) > SURROGATE_LAST {
            return Err(EnigmaError::format(format!(
                "character range {}-{} spans the surrogate block",
                first.escape_unicode(),
                last.escape_unicode()
            )));
        }
        Ok(CharacterRange { first, last })
    }

    /// The uppercase Latin alphabet `A-Z`.
    pub fn upper() -> Self {
        CharacterRange {
            first: 'A',
            last: 'Z',
        }
    }
}

impl Alphabet for CharacterRange {
    fn size(&self) -> i32 {
        (self.last as u32 - self.first as u32 + 1) as i32
    }

    fn contains(&self, ch: char) -> bool {
        (self.first..=self.last).contains(&ch)
    }

    fn to_char(&self, index: i32) -> Result<char, EnigmaError> {
        if !(0..self.size()).contains(&index) {
            return Err(EnigmaError::range(format!(
                "character index {} out of range",
                index
            )));
        }
        char::from_u32(self.first as u32 + index as u32).ok_or_else(|| {
            EnigmaError::range(format!("character index {} is not a valid symbol", index))
        })
    }

    fn to_int(&self, ch: char) -> Result<i32, EnigmaError> {
        if !self.contains(ch) {
            return Err(EnigmaError::range(format!(
                "character '{}' not in alphabet",
                ch
            )));
        }
        Ok((ch as u32 - self.first as u32) as i32)
    }
}

/// Alphabet listing arbitrary distinct symbols in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedAlphabet {
    chars: Vec<char>,
}

impl MixedAlphabet {
    /// Creates an alphabet of the characters of `chars`, in order.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] if `chars` is empty or repeats a symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::alphabet::{Alphabet, MixedAlphabet};
    ///
    /// let alpha = MixedAlphabet::new("QWERTY").unwrap();
    /// assert_eq!(alpha.to_char(1).unwrap(), 'W');
    /// assert!(MixedAlphabet::new("ABA").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        let mut seen: Vec<char> = Vec::with_capacity(chars.len());
        for ch in chars.chars() {
            if seen.contains(&ch) {
                return Err(EnigmaError::format(format!(
                    "duplicate symbol '{}' in alphabet",
                    ch
                )));
            }
            seen.push(ch);
        }
        if seen.is_empty() {
            return Err(EnigmaError::format("alphabet must not be empty"));
        }
        Ok(MixedAlphabet { chars: seen })
    }
}

impl Alphabet for MixedAlphabet {
    fn size(&self) -> i32 {
        self.chars.len() as i32
    }

    fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    fn to_char(&self, index: i32) -> Result<char, EnigmaError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.chars.get(i).copied())
            .ok_or_else(|| {
                EnigmaError::range(format!("character index {} out of range", index))
            })
    }

    fn to_int(&self, ch: char) -> Result<i32, EnigmaError> {
        self.chars
            .iter()
            .position(|&c| c == ch)
            .map(|i| i as i32)
            .ok_or_else(|| EnigmaError::range(format!("character '{}' not in alphabet", ch)))
    }
}
