//! Machine configuration: parsing the configuration text into a record and
//! building a [`Machine`] from it.
//!
//! # Format
//!
//! ```text
//! A-Z                     alphabet: a range F-L, or an explicit symbol list
//! 5 3                     number of rotor slots, number of pawls
//! I    MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B    R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//! ```
//!
//! The first line is the alphabet; everything after it is a stream of
//! whitespace-separated tokens. A rotor type is `M` followed by its notches,
//! `N` for a fixed rotor, or `R` for a reflector.

use std::rc::Rc;

use tracing::debug;

use crate::alphabet::{CharacterRange, MixedAlphabet, SharedAlphabet};
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorArena};

/// Symbols that cannot belong to an alphabet.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// How the alphabet is described in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetSpec {
    /// Contiguous range `first..=last`, written `F-L`.
    Range { first: char, last: char },
    /// Explicit list of symbols in order.
    Symbols(String),
}

impl AlphabetSpec {
    /// Parses an alphabet line. Whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] for an empty line, a reserved symbol,
    /// or a malformed range.
    pub fn parse(line: &str) -> Result<Self, EnigmaError> {
        let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.is_empty() {
            return Err(EnigmaError::format("missing alphabet"));
        }
        if let Some(c) = symbols.iter().find(|c| RESERVED.contains(*c)) {
            return Err(EnigmaError::format(format!(
                "reserved symbol '{}' in alphabet",
                c
            )));
        }

        if symbols.contains(&'-') {
            return match symbols.as_slice() {
                [first, '-', last] => Ok(AlphabetSpec::Range {
                    first: *first,
                    last: *last,
                }),
                _ => Err(EnigmaError::format(format!(
                    "malformed alphabet range \"{}\"",
                    line.trim()
                ))),
            };
        }
        Ok(AlphabetSpec::Symbols(symbols.into_iter().collect()))
    }

    /// Builds the described alphabet.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] for an inverted range or a repeated symbol.
    pub fn build(&self) -> Result<SharedAlphabet, EnigmaError> {
        let alphabet: SharedAlphabet = match self {
            AlphabetSpec::Range { first, last } => Rc::new(CharacterRange::new(*first, *last)?),
            AlphabetSpec::Symbols(chars) => Rc::new(MixedAlphabet::new(chars)?),
        };
        Ok(alphabet)
    }
}

/// The declared variant of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorType {
    /// `M<notches>`
    Moving { notches: String },
    /// `N`
    Fixed,
    /// `R`
    Reflector,
}

impl RotorType {
    fn parse(token: &str) -> Result<Self, EnigmaError> {
        let mut chars = token.chars();
        let kind = match chars.next() {
            Some('M') => RotorType::Moving {
                notches: chars.as_str().to_string(),
            },
            Some('N') if chars.as_str().is_empty() => RotorType::Fixed,
            Some('R') if chars.as_str().is_empty() => RotorType::Reflector,
            _ => {
                return Err(EnigmaError::format(format!(
                    "bad rotor type \"{}\"",
                    token
                )));
            }
        };
        Ok(kind)
    }
}

/// One rotor entry of the configuration, before its permutation is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorDescriptor {
    pub name: String,
    pub kind: RotorType,
    /// Cycle notation, tokens joined by single spaces.
    pub cycles: String,
}

impl RotorDescriptor {
    /// Builds the rotor over `alphabet`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] for malformed cycles or notches.
    pub fn build(&self, alphabet: &SharedAlphabet) -> Result<Rotor, EnigmaError> {
        let perm = Permutation::new(&self.cycles, alphabet.clone())?;
        let rotor = match &self.kind {
            RotorType::Moving { notches } => Rotor::moving(&self.name, perm, notches)?,
            RotorType::Fixed => Rotor::fixed(&self.name, perm),
            RotorType::Reflector => {
                if !perm.derangement() {
                    debug!(rotor = %self.name, "reflector permutation has fixed points");
                }
                Rotor::reflector(&self.name, perm)
            }
        };
        Ok(rotor)
    }
}

/// Parses one rotor descriptor from the front of `tokens`.
///
/// Consumes the name, the type, and every following token that opens a
/// cycle. Returns the descriptor and the number of tokens consumed.
///
/// # Errors
/// Returns [`EnigmaError::Format`] if the name or type is missing or
/// malformed, or a cycle token does not close its cycle.
///
/// # Examples
///
/// ```
/// use enigma::config::{parse_rotor_descriptor, RotorType};
///
/// let tokens = ["III", "MV", "(ABDHPEJT)", "(CFLVMZOYQIRWUKXSG)", "(N)", "IV"];
/// let (rotor, used) = parse_rotor_descriptor(&tokens).unwrap();
/// assert_eq!(rotor.name, "III");
/// assert_eq!(rotor.kind, RotorType::Moving { notches: "V".to_string() });
/// assert_eq!(used, 5);
/// ```
pub fn parse_rotor_descriptor<S: AsRef<str>>(
    tokens: &[S],
) -> Result<(RotorDescriptor, usize), EnigmaError> {
    let name = match tokens.first().map(|t| t.as_ref()) {
        Some(name) if !name.starts_with('(') => name,
        Some(token) => {
            return Err(EnigmaError::format(format!(
                "expected rotor name, found \"{}\"",
                token
            )));
        }
        None => return Err(EnigmaError::format("bad rotor description")),
    };
    let kind = match tokens.get(1) {
        Some(token) => RotorType::parse(token.as_ref())?,
        None => {
            return Err(EnigmaError::format(format!(
                "rotor {} has no type",
                name
            )));
        }
    };

    let mut cycles = Vec::new();
    for token in tokens[2..].iter().map(|t| t.as_ref()) {
        if !token.starts_with('(') {
            break;
        }
        if !token.ends_with(')') {
            return Err(EnigmaError::format(format!(
                "unterminated cycle \"{}\" in rotor {}",
                token, name
            )));
        }
        cycles.push(token);
    }

    let used = 2 + cycles.len();
    Ok((
        RotorDescriptor {
            name: name.to_string(),
            kind,
            cycles: cycles.join(" "),
        },
        used,
    ))
}

/// A parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub alphabet: AlphabetSpec,
    pub num_rotors: usize,
    pub num_pawls: usize,
    pub rotors: Vec<RotorDescriptor>,
}

impl MachineConfig {
    /// Parses configuration text.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] for any malformed or truncated part.
    pub fn parse(text: &str) -> Result<Self, EnigmaError> {
        let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
        let alphabet = AlphabetSpec::parse(lines.next().unwrap_or(""))?;

        let tokens: Vec<&str> = lines.flat_map(str::split_whitespace).collect();
        let num_rotors = parse_count(tokens.first(), "number of rotors")?;
        let num_pawls = parse_count(tokens.get(1), "number of pawls")?;

        let mut rotors = Vec::new();
        let mut rest = tokens.get(2..).unwrap_or(&[]);
        while !rest.is_empty() {
            let (rotor, used) = parse_rotor_descriptor(rest)?;
            rotors.push(rotor);
            rest = &rest[used..];
        }

        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            rotors,
        })
    }

    /// Builds a machine with every described rotor available.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Format`] for a bad alphabet, cycle, or notch,
    /// and [`EnigmaError::Configuration`] for duplicate rotor names or an
    /// impossible slot/pawl count.
    pub fn build(&self) -> Result<Machine, EnigmaError> {
        let alphabet = self.alphabet.build()?;
        let mut arena = RotorArena::with_capacity(self.rotors.len());
        for descriptor in &self.rotors {
            arena.add(descriptor.build(&alphabet)?)?;
        }
        debug!(
            alphabet = %alphabet.symbols(),
            rotors = arena.len(),
            num_rotors = self.num_rotors,
            num_pawls = self.num_pawls,
            "built machine"
        );
        Machine::new(alphabet, self.num_rotors, self.num_pawls, arena)
    }
}

fn parse_count(token: Option<&&str>, what: &str) -> Result<usize, EnigmaError> {
    let token = token.ok_or_else(|| EnigmaError::format("configuration file truncated"))?;
    token
        .parse()
        .map_err(|_| EnigmaError::format(format!("expected {}, found \"{}\"", what, token)))
}
