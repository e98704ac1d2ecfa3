//! Benchmarks for the Enigma machine.
//!
//! Measures configuration loading, single-symbol conversion, and message
//! throughput across message lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma::config::MachineConfig;
use enigma::settings::Settings;
use enigma::Machine;

/// Naval configuration used across all benchmarks.
const BENCH_CONFIG: &str = "\
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
";

const BENCH_SETTING: &str = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)";

fn configured_machine() -> Machine {
    let mut machine = MachineConfig::parse(BENCH_CONFIG).unwrap().build().unwrap();
    Settings::parse(BENCH_SETTING, machine.num_rotors())
        .unwrap()
        .apply(&mut machine)
        .unwrap();
    machine
}

/// Benchmarks parsing the configuration text and building the machine.
fn bench_config_load(c: &mut Criterion) {
    c.bench_function("config_load", |b| {
        b.iter(|| {
            MachineConfig::parse(black_box(BENCH_CONFIG))
                .unwrap()
                .build()
                .unwrap()
        });
    });
}

/// Benchmarks applying a setting line to an existing machine.
fn bench_apply_settings(c: &mut Criterion) {
    let mut machine = configured_machine();
    let settings = Settings::parse(BENCH_SETTING, machine.num_rotors()).unwrap();

    c.bench_function("apply_settings", |b| {
        b.iter(|| settings.apply(black_box(&mut machine)).unwrap());
    });
}

/// Benchmarks one `convert()` call, stepping included.
///
/// The machine is configured once and its rotors keep advancing between
/// iterations, so double steps occur at their natural rate.
fn bench_convert(c: &mut Criterion) {
    let mut machine = configured_machine();

    let mut group = c.benchmark_group("convert_single_symbol");
    group.throughput(Throughput::Elements(1));
    group.bench_function("naval_5_rotors", |b| {
        b.iter(|| machine.convert(black_box(7)).unwrap());
    });
    group.finish();
}

/// Benchmarks `convert_message()` across message lengths.
fn bench_message_scaling(c: &mut Criterion) {
    let lengths: &[usize] = &[16, 256, 4096];

    let mut group = c.benchmark_group("convert_message_scaling");
    for &len in lengths {
        let message: String = "FROMHISSHOULDERHIAWATHA".chars().cycle().take(len).collect();
        let mut machine = configured_machine();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &message, |b, msg| {
            b.iter(|| machine.convert_message(black_box(msg)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_config_load,
    bench_apply_settings,
    bench_convert,
    bench_message_scaling,
);
criterion_main!(benches);
