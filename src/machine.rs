//! Machine: a stack of rotor slots plus a plugboard.
//!
//! Slot 0 holds the reflector and the highest slot holds the fastest rotor.
//! Each converted symbol first steps the rotors, then travels
//! plugboard → rotors right-to-left → reflector → rotors left-to-right →
//! plugboard.
//!
//! # Stepping
//!
//! Stepping reproduces the irregular motion of the historical machine:
//!
//! 1. Record which slots are at a notch *before* anything moves.
//! 2. Advance the rightmost slot.
//! 3. For each slot `i` from the rightmost down to 1 whose recorded notch
//!    flag is set and whose left neighbor rotates: advance slot `i - 1`, and
//!    if `i` is not the rightmost slot advance slot `i` as well.
//!
//! The last clause is the double step: a middle rotor sitting on its own
//! notch moves on two consecutive symbols.

use tracing::{debug, trace};

use crate::alphabet::SharedAlphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorArena, RotorId};

/// A complete rotor cipher machine.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: SharedAlphabet,
    num_rotors: usize,
    num_pawls: usize,
    arena: RotorArena,
    slots: Vec<RotorId>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine over `alphabet` with `num_rotors` slots and
    /// `num_pawls` pawls, choosing rotors from `rotors`.
    ///
    /// No rotors are inserted and the plugboard is the identity.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] unless
    /// `1 < num_rotors` and `num_pawls < num_rotors`.
    pub fn new(
        alphabet: SharedAlphabet,
        num_rotors: usize,
        num_pawls: usize,
        rotors: RotorArena,
    ) -> Result<Self, EnigmaError> {
        if num_rotors < 2 {
            return Err(EnigmaError::configuration(format!(
                "machine needs at least 2 rotor slots, got {}",
                num_rotors
            )));
        }
        if num_pawls >= num_rotors {
            return Err(EnigmaError::configuration(format!(
                "{} pawls do not fit {} rotor slots",
                num_pawls, num_rotors
            )));
        }
        let plugboard = Permutation::identity(alphabet.clone());
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            arena: rotors,
            slots: Vec::with_capacity(num_rotors),
            plugboard,
        })
    }

    /// Returns the number of rotor slots, including the reflector slot.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls (and thus rotating rotors).
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the common alphabet of my rotors.
    pub fn alphabet(&self) -> &SharedAlphabet {
        &self.alphabet
    }

    /// Returns every rotor available for insertion.
    pub fn available_rotors(&self) -> &RotorArena {
        &self.arena
    }

    /// Returns the rotor in `slot`, if rotors are inserted.
    pub fn rotor_at(&self, slot: usize) -> Option<&Rotor> {
        self.slots.get(slot).map(|&id| self.arena.get(id))
    }

    /// Returns the current plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Fills my slots with the rotors named `rotors`, leftmost (reflector) first.
    ///
    /// Names match ignoring case. Every inserted rotor is reset to position 0.
    /// Checking that slot 0 holds a reflector is left to the caller.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] unless the names select exactly
    /// `num_rotors()` distinct known rotors. My slots are unchanged on error.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, rotors: &[S]) -> Result<(), EnigmaError> {
        let mut selected: Vec<RotorId> = Vec::with_capacity(self.num_rotors);
        for name in rotors {
            if let Some(id) = self.arena.find(name.as_ref()) {
                if !selected.contains(&id) {
                    selected.push(id);
                }
            }
        }
        if selected.len() != self.num_rotors || rotors.len() != self.num_rotors {
            return Err(EnigmaError::configuration(format!(
                "expected {} distinct known rotors, found {}",
                self.num_rotors,
                selected.len()
            )));
        }

        for &id in &selected {
            self.arena.get_mut(id).set(0)?;
        }
        self.slots = selected;

        debug!(
            rotors = %self.slot_names().join(" "),
            "inserted rotors"
        );
        Ok(())
    }

    /// Positions slots 1.. from `setting`, one symbol per slot, left to right.
    /// The reflector in slot 0 is never positioned.
    ///
    /// # Errors
    /// Returns [`EnigmaError::State`] if no rotors are inserted, and
    /// [`EnigmaError::Configuration`] if `setting` does not hold exactly
    /// `num_rotors() - 1` alphabet symbols.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        self.require_rotors()?;

        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != self.num_rotors - 1 {
            return Err(EnigmaError::configuration(format!(
                "setting \"{}\" must have {} symbols",
                setting,
                self.num_rotors - 1
            )));
        }
        if let Some(&bad) = symbols.iter().find(|&&c| !self.alphabet.contains(c)) {
            return Err(EnigmaError::configuration(format!(
                "initial setting '{}' is not in the alphabet",
                bad
            )));
        }

        for (&id, &ch) in self.slots[1..].iter().zip(&symbols) {
            let index = self.alphabet.to_int(ch)?;
            self.arena.get_mut(id).set(index)?;
        }

        debug!(setting, "positioned rotors");
        Ok(())
    }

    /// Installs `plugboard`. Fixed points are allowed.
    ///
    /// The plugboard is applied forward on the way in and again on the way
    /// out, so the machine is its own inverse only when every cycle of
    /// `plugboard` has length 1 or 2.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        debug!(
            pairs = plugboard.cycles().len(),
            "installed plugboard"
        );
        self.plugboard = plugboard;
    }

    /// Converts the symbol index `c` after first stepping the rotors.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `c` is not a valid index,
    /// [`EnigmaError::State`] if no rotors are inserted or if a reflector
    /// sits in a slot other than 0.
    pub fn convert(&mut self, c: i32) -> Result<i32, EnigmaError> {
        self.require_rotors()?;
        self.alphabet.to_char(c)?;

        self.step();

        let mut signal = self.plugboard.permute(c);
        for &id in self.slots.iter().rev() {
            signal = self.arena.get(id).convert_forward(signal);
        }
        for &id in &self.slots[1..] {
            signal = self.arena.get(id).convert_backward(signal)?;
        }
        Ok(self.plugboard.permute(signal))
    }

    /// Converts every symbol of `msg` in order, carrying rotor state across
    /// symbols and across calls.
    ///
    /// Rotor motion for symbols before an error is not undone.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] for a symbol outside the alphabet, or
    /// any error of [`convert`](Self::convert).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::config::MachineConfig;
    ///
    /// let config = MachineConfig::parse(
    ///     "A-Z
    ///      4 3
    ///      I   MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
    ///      II  ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
    ///      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    ///      B   R  (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
    /// ).unwrap();
    /// let mut machine = config.build().unwrap();
    /// machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    /// machine.set_rotors("AAA").unwrap();
    /// assert_eq!(machine.convert_message("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn convert_message(&mut self, msg: &str) -> Result<String, EnigmaError> {
        let mut converted = String::with_capacity(msg.len());
        for ch in msg.chars() {
            let index = self.alphabet.to_int(ch)?;
            let result = self.convert(index)?;
            converted.push(self.alphabet.to_char(result)?);
        }
        Ok(converted)
    }

    /// Returns the current positions of slots 1.. as symbols.
    pub fn positions(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .filter_map(|&id| self.arena.get(id).setting().ok())
            .collect()
    }

    /// Advances the rotors for one symbol.
    fn step(&mut self) {
        let notched: Vec<bool> = self
            .slots
            .iter()
            .map(|&id| self.arena.get(id).at_notch())
            .collect();

        let last = self.num_rotors - 1;
        self.arena.get_mut(self.slots[last]).advance();

        for i in (1..=last).rev() {
            let left = self.slots[i - 1];
            if notched[i] && self.arena.get(left).rotates() {
                self.arena.get_mut(left).advance();
                if i != last {
                    self.arena.get_mut(self.slots[i]).advance();
                }
            }
        }

        trace!(positions = %self.positions(), "stepped rotors");
    }

    fn require_rotors(&self) -> Result<(), EnigmaError> {
        if self.slots.len() != self.num_rotors {
            return Err(EnigmaError::state("no rotors inserted"));
        }
        Ok(())
    }

    fn slot_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|&id| self.arena.get(id).name())
            .collect()
    }
}
