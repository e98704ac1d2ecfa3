//! Known-answer tests for complete machines.
//!
//! Vectors are taken from the historical M3 (`AAAAA` → `BDZGO` with rotors
//! I II III, reflector B, all positions `A`) and from the four-rotor naval
//! machine with a thin reflector.

use enigma::config::MachineConfig;
use enigma::permutation::Permutation;
use enigma::settings::Settings;
use enigma::{EnigmaError, Machine};

const NAVAL: &str = "\
A-Z
5 3
I     MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II    ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III   MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
IV    MJ (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
V     MZ (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
VI    MZM (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
VII   MZM (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
VIII  MZM (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
Beta  N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
Gamma N  (AFNIRLBSQWVXGUZDKMTPCOYJHE)
B     R  (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
C     R  (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)
UKWB  R  (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)
";

fn naval() -> Machine {
    MachineConfig::parse(NAVAL).unwrap().build().unwrap()
}

fn with_slots(num_rotors: usize, num_pawls: usize) -> Machine {
    let mut config = MachineConfig::parse(NAVAL).unwrap();
    config.num_rotors = num_rotors;
    config.num_pawls = num_pawls;
    config.build().unwrap()
}

fn configure(machine: &mut Machine, line: &str) {
    Settings::parse(line, machine.num_rotors())
        .unwrap()
        .apply(machine)
        .unwrap();
}

// ═══════════════════════════════════════════════════════════════════════
// Historic machines: frozen ciphertext
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn historic_m3_vector() {
    let mut m = with_slots(4, 3);
    configure(&mut m, "* UKWB I II III AAA");
    assert_eq!(m.convert_message("AAAAA").unwrap(), "BDZGO");
}

#[test]
fn two_moving_one_fixed_one_reflector() {
    // Moving rotor with notch Q on the right, notch E beside it, a fixed rotor,
    // and the thin reflector; empty plugboard.
    let mut m = with_slots(4, 2);
    configure(&mut m, "* B Beta II I AAA");
    assert_eq!(m.convert_message("AAAA").unwrap(), "OJJH");
    assert_eq!(m.positions(), "AAE");
}

#[test]
fn hiawatha_encrypts() {
    let mut m = naval();
    configure(&mut m, "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)");
    assert_eq!(
        m.convert_message("FROMHISSHOULDERHIAWATHA").unwrap(),
        "QVPQSOKOILPUBKJZPISFXDW"
    );
    assert_eq!(m.positions(), "AXMB");
}

#[test]
fn hiawatha_decrypts() {
    let mut m = naval();
    configure(&mut m, "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)");
    assert_eq!(
        m.convert_message("QVPQSOKOILPUBKJZPISFXDW").unwrap(),
        "FROMHISSHOULDERHIAWATHA"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Plugboard
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn plugboard_swaps_both_ways() {
    let mut m = with_slots(4, 3);
    configure(&mut m, "* UKWB I II III AAA (AB) (CD)");
    assert_eq!(m.convert_message("HELLOWORLD").unwrap(), "ILACBBMTBE");
}

#[test]
fn set_plugboard_directly() {
    let mut m = with_slots(4, 3);
    m.insert_rotors(&["UKWB", "I", "II", "III"]).unwrap();
    m.set_rotors("AAA").unwrap();
    let plugboard = Permutation::new("(AB) (CD)", m.alphabet().clone()).unwrap();
    m.set_plugboard(plugboard);
    assert_eq!(m.convert_message("HELLOWORLD").unwrap(), "ILACBBMTBE");
}

// ═══════════════════════════════════════════════════════════════════════
// Machine-wide behavior
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn reflector_is_a_derangement_and_no_letter_maps_to_itself() {
    let mut m = naval();
    configure(&mut m, "* C Gamma VI VII VIII ZZZZ (AZ)");
    let reflector = m.rotor_at(0).unwrap();
    assert!(reflector.permutation().derangement());

    let plaintext = "A".repeat(200);
    let ciphertext = m.convert_message(&plaintext).unwrap();
    assert!(!ciphertext.contains('A'));
}

#[test]
fn reconfiguring_resets_positions() {
    let mut m = naval();
    let line = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)";
    configure(&mut m, line);
    let first = m.convert_message("FROMHIS").unwrap();
    configure(&mut m, line);
    let second = m.convert_message("FROMHIS").unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_symbol_aborts_conversion() {
    let mut m = naval();
    configure(&mut m, "* B Beta III IV I AAAA");
    assert!(matches!(
        m.convert_message("HELLO WORLD"),
        Err(EnigmaError::Range(_))
    ));
}
