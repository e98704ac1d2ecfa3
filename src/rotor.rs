//! Rotor: stateful substitution unit with a rotating position offset.
//!
//! A [`Rotor`] holds a [`Permutation`] at its zero setting plus a position.
//! Signals are shifted into the rotor's frame by its position, substituted,
//! and shifted back. Moving rotors advance and carry notches, fixed rotors
//! never move, and the reflector is fixed at position 0 and is only ever
//! entered from the forward direction. Callers tell them apart with
//! [`Rotor::rotates`] and [`Rotor::reflecting`].
//!
//! All rotors built from a configuration live in a [`RotorArena`] and are
//! referenced by [`RotorId`]. A machine's slot assignment is a list of ids,
//! so rotor positions are mutated through the arena only.

use crate::alphabet::SharedAlphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// Unique identifier for a Rotor within an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub usize);

/// The physical variant of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RotorKind {
    /// Rotates when driven by a pawl. `notches` are positions at which the
    /// rotor pushes its left neighbor on the next step.
    Moving { notches: Vec<i32> },
    /// Never rotates; may be set to any position.
    Fixed,
    /// Never rotates, always at position 0, reflects the signal.
    Reflector,
}

/// A rotor with its permutation and current position.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    kind: RotorKind,
    permutation: Permutation,
    position: i32,
}

impl Rotor {
    /// Creates a moving rotor whose notches are the symbols of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] if a notch symbol is not in the
    /// permutation's alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use enigma::alphabet::CharacterRange;
    /// use enigma::permutation::Permutation;
    /// use enigma::rotor::Rotor;
    ///
    /// let perm = Permutation::new("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)",
    ///     Rc::new(CharacterRange::upper())).unwrap();
    /// let mut rotor = Rotor::moving("I", perm, "Q").unwrap();
    /// rotor.set_char('Q').unwrap();
    /// assert!(rotor.at_notch());
    /// ```
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, EnigmaError> {
        let name = name.into();
        let alphabet = permutation.alphabet();
        let mut positions = Vec::with_capacity(notches.len());
        for ch in notches.chars() {
            let index = alphabet.to_int(ch).map_err(|_| {
                EnigmaError::format(format!(
                    "notch '{}' of rotor {} is not in the alphabet",
                    ch, name
                ))
            })?;
            if !positions.contains(&index) {
                positions.push(index);
            }
        }
        Ok(Rotor {
            name,
            kind: RotorKind::Moving { notches: positions },
            permutation,
            position: 0,
        })
    }

    /// Creates a non-moving rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            kind: RotorKind::Fixed,
            permutation,
            position: 0,
        }
    }

    /// Creates a reflector.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            kind: RotorKind::Reflector,
            permutation,
            position: 0,
        }
    }

    /// Returns my name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns my permutation at the zero setting.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the alphabet of my permutation.
    pub fn alphabet(&self) -> &SharedAlphabet {
        self.permutation.alphabet()
    }

    /// Returns the size of my alphabet.
    pub fn size(&self) -> i32 {
        self.permutation.size()
    }

    /// Returns `true` iff I can rotate.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns `true` iff I reflect.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns `true` iff I am positioned at one of my notches.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.position),
            RotorKind::Fixed | RotorKind::Reflector => false,
        }
    }

    /// Returns my current position.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Returns the symbol of my current position.
    pub fn setting(&self) -> Result<char, EnigmaError> {
        self.alphabet().to_char(self.position)
    }

    /// Sets my position to `posn`, taken modulo the alphabet size.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if I am a reflector and
    /// `posn != 0`.
    pub fn set(&mut self, posn: i32) -> Result<(), EnigmaError> {
        if self.reflecting() && posn != 0 {
            return Err(EnigmaError::configuration(format!(
                "reflector {} has only one position",
                self.name
            )));
        }
        self.position = self.permutation.wrap(posn);
        Ok(())
    }

    /// Sets my position to the index of symbol `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Range`] if `cposn` is not in the alphabet, or
    /// [`EnigmaError::Configuration`] as for [`set`](Self::set).
    pub fn set_char(&mut self, cposn: char) -> Result<(), EnigmaError> {
        let posn = self.alphabet().to_int(cposn)?;
        self.set(posn)
    }

    /// Advances me one position if I rotate; does nothing otherwise.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.position = self.permutation.wrap(self.position + 1);
        }
    }

    /// Converts `p` entering from the right, returning the contact it exits on the left.
    pub fn convert_forward(&self, p: i32) -> i32 {
        let perm = &self.permutation;
        let entry = perm.wrap(p + self.position);
        perm.wrap(perm.permute(entry) - self.position)
    }

    /// Converts `e` entering from the left, returning the contact it exits on the right.
    ///
    /// # Errors
    /// Returns [`EnigmaError::State`] for a reflector, which is only entered
    /// from the right.
    pub fn convert_backward(&self, e: i32) -> Result<i32, EnigmaError> {
        if self.reflecting() {
            return Err(EnigmaError::state(format!(
                "reflector {} can only be entered forward",
                self.name
            )));
        }
        let perm = &self.permutation;
        let entry = perm.wrap(e + self.position);
        Ok(perm.wrap(perm.invert(entry) - self.position))
    }
}

/// Arena owning every rotor available to a machine.
///
/// Stores all rotors in a contiguous `Vec` and hands out [`RotorId`]s.
/// Names are unique ignoring ASCII case.
#[derive(Debug, Clone, Default)]
pub struct RotorArena {
    rotors: Vec<Rotor>,
}

impl RotorArena {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        RotorArena { rotors: Vec::new() }
    }

    /// Creates a new empty arena with room for `capacity` rotors.
    pub fn with_capacity(capacity: usize) -> Self {
        RotorArena {
            rotors: Vec::with_capacity(capacity),
        }
    }

    /// Adds `rotor` to the arena.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if a rotor with the same name
    /// (ignoring case) is already present.
    pub fn add(&mut self, rotor: Rotor) -> Result<RotorId, EnigmaError> {
        if self.find(rotor.name()).is_some() {
            return Err(EnigmaError::configuration(format!(
                "duplicate rotor name {}",
                rotor.name()
            )));
        }
        let id = RotorId(self.rotors.len());
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Looks up a rotor by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<RotorId> {
        self.rotors
            .iter()
            .position(|r| r.name().eq_ignore_ascii_case(name))
            .map(RotorId)
    }

    /// Returns the rotor with the given id.
    pub fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    /// Returns the rotor with the given id for mutation.
    pub fn get_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }

    /// Returns the number of rotors in the arena.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns `true` if the arena holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Iterates over all rotors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rotor> {
        self.rotors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::CharacterRange;
    use std::rc::Rc;

    const ROTOR_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
    const BETA: &str = "(ALBEVFCYODJWUGNMQTZSKPR) (HIX)";
    const REFLECTOR_B: &str = "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";

    fn perm(cycles: &str) -> Permutation {
        Permutation::new(cycles, Rc::new(CharacterRange::upper())).unwrap()
    }

    #[test]
    fn test_capabilities_per_variant() {
        let moving = Rotor::moving("I", perm(ROTOR_I), "Q").unwrap();
        let fixed = Rotor::fixed("Beta", perm(BETA));
        let reflector = Rotor::reflector("B", perm(REFLECTOR_B));

        assert!(moving.rotates() && !moving.reflecting());
        assert!(!fixed.rotates() && !fixed.reflecting());
        assert!(!reflector.rotates() && reflector.reflecting());
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut rotor = Rotor::moving("I", perm(ROTOR_I), "Q").unwrap();
        rotor.set_char('Z').unwrap();
        rotor.advance();
        assert_eq!(rotor.position(), 0);
        assert_eq!(rotor.setting().unwrap(), 'A');
    }

    #[test]
    fn test_advance_noop_for_non_rotating() {
        let mut fixed = Rotor::fixed("Beta", perm(BETA));
        fixed.set(3).unwrap();
        fixed.advance();
        assert_eq!(fixed.position(), 3);

        let mut reflector = Rotor::reflector("B", perm(REFLECTOR_B));
        reflector.advance();
        assert_eq!(reflector.position(), 0);
    }

    #[test]
    fn test_at_notch() {
        let mut rotor = Rotor::moving("multi", perm(ROTOR_I), "ZM").unwrap();
        assert!(!rotor.at_notch());
        rotor.set_char('M').unwrap();
        assert!(rotor.at_notch());
        rotor.set_char('Z').unwrap();
        assert!(rotor.at_notch());

        let mut fixed = Rotor::fixed("Beta", perm(BETA));
        for p in 0..26 {
            fixed.set(p).unwrap();
            assert!(!fixed.at_notch());
        }
    }

    #[test]
    fn test_moving_without_notches_never_at_notch() {
        let mut rotor = Rotor::moving("plain", perm(ROTOR_I), "").unwrap();
        for _ in 0..26 {
            assert!(!rotor.at_notch());
            rotor.advance();
        }
    }

    #[test]
    fn test_bad_notch_rejected() {
        let result = Rotor::moving("I", perm(ROTOR_I), "Q?");
        assert!(matches!(result, Err(EnigmaError::Format(_))));
    }

    #[test]
    fn test_reflector_set() {
        let mut reflector = Rotor::reflector("B", perm(REFLECTOR_B));
        assert!(reflector.set(0).is_ok());
        assert!(matches!(
            reflector.set(1),
            Err(EnigmaError::Configuration(_))
        ));
        assert!(matches!(
            reflector.set_char('C'),
            Err(EnigmaError::Configuration(_))
        ));
        assert_eq!(reflector.position(), 0);
    }

    #[test]
    fn test_set_char_outside_alphabet() {
        let mut rotor = Rotor::moving("I", perm(ROTOR_I), "Q").unwrap();
        assert!(matches!(rotor.set_char('a'), Err(EnigmaError::Range(_))));
    }

    #[test]
    fn test_convert_at_zero_setting() {
        let rotor = Rotor::moving("I", perm(ROTOR_I), "Q").unwrap();
        // A -> E
        assert_eq!(rotor.convert_forward(0), 4);
        // E <- A
        assert_eq!(rotor.convert_backward(4).unwrap(), 0);
    }

    #[test]
    fn test_convert_with_offset() {
        let mut rotor = Rotor::moving("I", perm(ROTOR_I), "Q").unwrap();
        rotor.set_char('B').unwrap();
        // A enters at contact B, B -> K, exits at K - 1 = J.
        assert_eq!(rotor.convert_forward(0), 9);
        assert_eq!(rotor.convert_backward(9).unwrap(), 0);
    }

    #[test]
    fn test_offset_inverse_every_position() {
        let mut rotor = Rotor::fixed("Beta", perm(BETA));
        for posn in 0..26 {
            rotor.set(posn).unwrap();
            for x in 0..26 {
                let y = rotor.convert_forward(x);
                assert_eq!(rotor.convert_backward(y).unwrap(), x);
            }
        }
    }

    #[test]
    fn test_reflector_backward_is_state_error() {
        let reflector = Rotor::reflector("B", perm(REFLECTOR_B));
        assert_eq!(reflector.convert_forward(0), 4);
        assert!(matches!(
            reflector.convert_backward(4),
            Err(EnigmaError::State(_))
        ));
    }

    #[test]
    fn test_arena_find_ignores_case() {
        let mut arena = RotorArena::new();
        let id = arena.add(Rotor::fixed("Beta", perm(BETA))).unwrap();
        assert_eq!(arena.find("BETA"), Some(id));
        assert_eq!(arena.find("beta"), Some(id));
        assert_eq!(arena.find("Gamma"), None);
    }

    #[test]
    fn test_arena_rejects_duplicate_names() {
        let mut arena = RotorArena::with_capacity(2);
        arena.add(Rotor::fixed("Beta", perm(BETA))).unwrap();
        let result = arena.add(Rotor::fixed("BETA", perm(BETA)));
        assert!(matches!(result, Err(EnigmaError::Configuration(_))));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_mutation_through_id() {
        let mut arena = RotorArena::new();
        assert!(arena.is_empty());
        let id = arena.add(Rotor::moving("I", perm(ROTOR_I), "Q").unwrap()).unwrap();
        arena.get_mut(id).advance();
        assert_eq!(arena.get(id).position(), 1);
        assert_eq!(arena.iter().count(), 1);
    }
}
