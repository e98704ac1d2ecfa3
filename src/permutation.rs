//! Permutation: a bijection over alphabet indices written in cycle notation.
//!
//! A permutation is parsed from text such as `(ABCD) (EF)`: each
//! parenthesized group maps every symbol to its successor, the last symbol
//! wrapping to the first. Symbols that appear in no cycle are fixed points.
//!
//! The parsed cycles are kept for inspection, and forward/inverse lookup
//! tables indexed by alphabet position are derived from them so that
//! `permute` and `invert` are constant time on the conversion hot path.

use crate::alphabet::SharedAlphabet;
use crate::error::EnigmaError;

/// A permutation of the indices of an alphabet.
#[derive(Debug, Clone)]
pub struct Permutation {
    alphabet: SharedAlphabet,
    cycles: Vec<Vec<char>>,
    forward: Vec<i32>,
    inverse: Vec<i32>,
}

impl Permutation {
    /// Parses `cycles` in cycle notation over `alphabet`.
    ///
    /// Whitespace is ignored everywhere, so `(AB)(CD)` and `( A B ) (CD)` are
    /// the same permutation. The empty cycle `()` is accepted and has no effect.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] on unbalanced or nested parentheses,
    /// a symbol outside any cycle or outside the alphabet, or a symbol that
    /// appears more than once.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use enigma::alphabet::CharacterRange;
    /// use enigma::permutation::Permutation;
    ///
    /// let perm = Permutation::new("(BACD)", Rc::new(CharacterRange::upper())).unwrap();
    /// assert_eq!(perm.permute(1), 0); // B -> A
    /// assert_eq!(perm.invert(1), 3); // B <- D
    /// assert_eq!(perm.permute(25), 25); // Z is a fixed point
    /// ```
    pub fn new(cycles: &str, alphabet: SharedAlphabet) -> Result<Self, EnigmaError> {
        let mut perm = Permutation::identity(alphabet);
        let mut current: Option<Vec<char>> = None;

        for ch in cycles.chars().filter(|c| !c.is_whitespace()) {
            match ch {
                '(' => {
                    if current.is_some() {
                        return Err(EnigmaError::format(format!(
                            "nested '(' in cycles \"{}\"",
                            cycles
                        )));
                    }
                    current = Some(Vec::new());
                }
                ')' => match current.take() {
                    Some(cycle) => perm.add_cycle(&cycle)?,
                    None => {
                        return Err(EnigmaError::format(format!(
                            "unbalanced ')' in cycles \"{}\"",
                            cycles
                        )));
                    }
                },
                c => match current.as_mut() {
                    Some(cycle) => cycle.push(c),
                    None => {
                        return Err(EnigmaError::format(format!(
                            "symbol '{}' outside of a cycle in \"{}\"",
                            c, cycles
                        )));
                    }
                },
            }
        }

        if current.is_some() {
            return Err(EnigmaError::format(format!(
                "unbalanced '(' in cycles \"{}\"",
                cycles
            )));
        }
        Ok(perm)
    }

    /// The identity permutation over `alphabet` (every symbol fixed).
    pub fn identity(alphabet: SharedAlphabet) -> Self {
        let size = alphabet.size();
        let table: Vec<i32> = (0..size).collect();
        Permutation {
            alphabet,
            cycles: Vec::new(),
            forward: table.clone(),
            inverse: table,
        }
    }

    /// Appends `cycle` to the permutation.
    ///
    /// Only used while building; a finished permutation is immutable.
    pub(crate) fn add_cycle(&mut self, cycle: &[char]) -> Result<(), EnigmaError> {
        if cycle.is_empty() {
            return Ok(());
        }

        let mut indices = Vec::with_capacity(cycle.len());
        for (k, &ch) in cycle.iter().enumerate() {
            if !self.alphabet.contains(ch) {
                return Err(EnigmaError::format(format!(
                    "symbol '{}' in cycle is not in the alphabet",
                    ch
                )));
            }
            let repeated = cycle[..k].contains(&ch) || self.cycles.iter().any(|c| c.contains(&ch));
            if repeated {
                return Err(EnigmaError::format(format!(
                    "symbol '{}' appears in more than one cycle position",
                    ch
                )));
            }
            indices.push(self.alphabet.to_int(ch)?);
        }

        let len = indices.len();
        for (k, &from) in indices.iter().enumerate() {
            let to = indices[(k + 1) % len];
            self.forward[from as usize] = to;
            self.inverse[to as usize] = from;
        }
        self.cycles.push(cycle.to_vec());
        Ok(())
    }

    /// Returns the size of the alphabet I permute.
    pub fn size(&self) -> i32 {
        self.alphabet.size()
    }

    /// Reduces `p` into `0..size()` (never negative).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use enigma::alphabet::CharacterRange;
    /// use enigma::permutation::Permutation;
    ///
    /// let perm = Permutation::identity(Rc::new(CharacterRange::upper()));
    /// assert_eq!(perm.wrap(-1), 25);
    /// assert_eq!(perm.wrap(27), 1);
    /// ```
    pub fn wrap(&self, p: i32) -> i32 {
        p.rem_euclid(self.size())
    }

    /// Applies the permutation to index `p`, taken modulo the alphabet size.
    pub fn permute(&self, p: i32) -> i32 {
        self.forward[self.wrap(p) as usize]
    }

    /// Applies the inverse permutation to index `c`, taken modulo the alphabet size.
    pub fn invert(&self, c: i32) -> i32 {
        self.inverse[self.wrap(c) as usize]
    }

    /// Applies the permutation to symbol `p`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `p` is not in the alphabet.
    pub fn permute_char(&self, p: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(p)?;
        self.alphabet.to_char(self.permute(index))
    }

    /// Applies the inverse permutation to symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `c` is not in the alphabet.
    pub fn invert_char(&self, c: char) -> Result<char, EnigmaError> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.invert(index))
    }

    /// Returns the alphabet used to build this permutation.
    pub fn alphabet(&self) -> &SharedAlphabet {
        &self.alphabet
    }

    /// The parsed cycles, in the order they were written.
    pub fn cycles(&self) -> &[Vec<char>] {
        &self.cycles
    }

    /// Returns `true` iff no symbol of the alphabet maps to itself,
    /// including symbols that appear in no cycle.
    pub fn derangement(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(i, &to)| to as usize != i)
    }
}
