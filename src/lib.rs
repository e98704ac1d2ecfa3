//! Enigma: rotor cipher machine simulator.
//!
//! Simulates the electromechanical rotor machines of the Enigma family: a
//! configurable stack of substitution rotors and a reflector, wired through a
//! plugboard, that encodes each symbol by composing permutations and steps
//! its rotors between symbols, including the irregular double step of the
//! middle rotor.
//!
//! Because the signal path is reflected, the same machine state both encodes
//! and decodes: running the ciphertext through an identically configured
//! machine yields the plaintext.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol <-> index, contiguous range or explicit list)
//!     ↓ shared by
//! Permutation  (cycle notation, permute / invert)
//!     ↓ held by
//! Rotor        (moving / fixed / reflector, position offset) in a RotorArena
//!     ↓ slots of
//! Machine      (stepping + plugboard → rotors → reflector → rotors → plugboard)
//! ```
//!
//! The [`config`], [`settings`], and [`message`] modules parse the text formats
//! of the `enigma` command-line tool and feed the engine.
//!
//! # Examples
//!
//! ```
//! use enigma::config::MachineConfig;
//! use enigma::settings::Settings;
//!
//! let config = MachineConfig::parse("\
//! A-Z
//! 5 3
//! I    MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! III  MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//! IV   MJ (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//! Beta N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B    R  (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//! ").unwrap();
//!
//! let line = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)";
//!
//! let mut encoder = config.build().unwrap();
//! Settings::parse(line, 5).unwrap().apply(&mut encoder).unwrap();
//! let ciphertext = encoder.convert_message("FROMHISSHOULDERHIAWATHA").unwrap();
//! assert_eq!(ciphertext, "QVPQSOKOILPUBKJZPISFXDW");
//!
//! let mut decoder = config.build().unwrap();
//! Settings::parse(line, 5).unwrap().apply(&mut decoder).unwrap();
//! assert_eq!(decoder.convert_message(&ciphertext).unwrap(), "FROMHISSHOULDERHIAWATHA");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod message;
pub mod permutation;
pub mod rotor;
pub mod settings;

pub use error::EnigmaError;
pub use machine::Machine;
