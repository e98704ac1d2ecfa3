//! Per-message setting line: `* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)`.
//!
//! A setting line names the rotors for every slot (reflector first), gives
//! the initial positions of slots 1.., and optionally a plugboard in cycle
//! notation. [`Settings::apply`] validates the selection against the machine
//! before changing anything.

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;

/// Marker that starts a setting line.
pub const SETTING_MARKER: char = '*';

/// Returns `true` if `line` is a setting line.
pub fn is_setting_line(line: &str) -> bool {
    line.trim_start().starts_with(SETTING_MARKER)
}

/// A parsed setting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rotor names, reflector first.
    pub rotors: Vec<String>,
    /// Initial positions of slots 1.., one symbol each.
    pub positions: String,
    /// Plugboard in cycle notation; empty for no plugboard.
    pub plugboard: String,
}

impl Settings {
    /// Parses a setting line for a machine with `num_rotors` slots.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] if the line does not start with `*`,
    /// and [`EnigmaError::Configuration`] if it names too few rotors or has no
    /// position string.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::settings::Settings;
    ///
    /// let s = Settings::parse("* B Beta III IV I AXLE (HQ) (EX)", 5).unwrap();
    /// assert_eq!(s.rotors, ["B", "Beta", "III", "IV", "I"]);
    /// assert_eq!(s.positions, "AXLE");
    /// assert_eq!(s.plugboard, "(HQ) (EX)");
    /// ```
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self, EnigmaError> {
        let rest = line
            .trim_start()
            .strip_prefix(SETTING_MARKER)
            .ok_or_else(|| EnigmaError::format(format!("not a setting line: \"{}\"", line)))?;

        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if tokens.len() < num_rotors + 1 {
            return Err(EnigmaError::configuration(format!(
                "setting line needs {} rotor names and a position string",
                num_rotors
            )));
        }

        Ok(Settings {
            rotors: tokens[..num_rotors].iter().map(|s| s.to_string()).collect(),
            positions: tokens[num_rotors].to_string(),
            plugboard: tokens[num_rotors + 1..].join(" "),
        })
    }

    /// Validates this selection against `machine`, then inserts the rotors,
    /// positions them, and installs the plugboard.
    ///
    /// The machine is untouched if validation fails.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] for a repeated or unknown rotor,
    /// a non-reflector in slot 0, a reflector elsewhere, a moving rotor
    /// outside the pawl slots (or a non-moving one inside them), or a position
    /// string of the wrong length. Returns [`EnigmaError::Format`] for a
    /// malformed plugboard.
    pub fn apply(&self, machine: &mut Machine) -> Result<(), EnigmaError> {
        self.validate(machine)?;
        let plugboard = Permutation::new(&self.plugboard, machine.alphabet().clone())?;

        machine.insert_rotors(self.rotors.as_slice())?;
        machine.set_rotors(&self.positions)?;
        machine.set_plugboard(plugboard);
        Ok(())
    }

    fn validate(&self, machine: &Machine) -> Result<(), EnigmaError> {
        let num_rotors = machine.num_rotors();
        if self.rotors.len() != num_rotors {
            return Err(EnigmaError::configuration(format!(
                "expected {} rotors, got {}",
                num_rotors,
                self.rotors.len()
            )));
        }
        if self.positions.chars().count() != num_rotors - 1 {
            return Err(EnigmaError::configuration(format!(
                "position string \"{}\" must have {} symbols",
                self.positions,
                num_rotors - 1
            )));
        }

        let first_moving = num_rotors - machine.num_pawls();
        let available = machine.available_rotors();
        for (slot, name) in self.rotors.iter().enumerate() {
            if self.rotors[..slot]
                .iter()
                .any(|prev| prev.eq_ignore_ascii_case(name))
            {
                return Err(EnigmaError::configuration(format!(
                    "rotor {} is used more than once",
                    name
                )));
            }

            let rotor = available
                .find(name)
                .map(|id| available.get(id))
                .ok_or_else(|| EnigmaError::configuration(format!("unknown rotor {}", name)))?;

            if slot == 0 {
                if !rotor.reflecting() {
                    return Err(EnigmaError::configuration(format!(
                        "first rotor {} is not a reflector",
                        name
                    )));
                }
            } else if rotor.reflecting() {
                return Err(EnigmaError::configuration(format!(
                    "reflector {} must be in the first slot",
                    name
                )));
            } else if rotor.rotates() != (slot >= first_moving) {
                return Err(EnigmaError::configuration(format!(
                    "rotor {} does not fit slot {} with {} pawls",
                    name,
                    slot,
                    machine.num_pawls()
                )));
            }
        }
        Ok(())
    }
}
