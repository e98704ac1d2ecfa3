//! Message processing: drives a machine over an input stream of setting
//! lines and message lines, writing converted text in groups of five.

use std::io::{BufRead, Write};

use tracing::info;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::settings::{is_setting_line, Settings};

/// Number of symbols per printed group.
pub const GROUP_SIZE: usize = 5;

/// Splits `msg` into groups of five symbols separated by single spaces.
/// The last group may be shorter.
///
/// # Examples
///
/// ```
/// use enigma::message::format_groups;
///
/// assert_eq!(format_groups("QVPQSOKOILPUBKJZPISFXDW"), "QVPQS OKOIL PUBKJ ZPISF XDW");
/// assert_eq!(format_groups(""), "");
/// ```
pub fn format_groups(msg: &str) -> String {
    let symbols: Vec<char> = msg.chars().collect();
    symbols
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes whitespace from `line` and folds each symbol missing from
/// `alphabet` to upper case when that form is in the alphabet.
pub fn normalize_line(line: &str, alphabet: &dyn Alphabet) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| fold_case(c, alphabet))
        .collect()
}

fn fold_case(c: char, alphabet: &dyn Alphabet) -> char {
    if alphabet.contains(c) {
        return c;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if alphabet.contains(u) => u,
        _ => c,
    }
}

/// Converts every message in `input`, writing results to `output`.
///
/// The input must start with a setting line (blank lines before it are
/// echoed). Each later setting line reconfigures the machine. Blank message
/// lines are echoed as blank lines. Lines already written stay written when
/// a later line fails.
///
/// # Errors
/// Returns [`EnigmaError::Format`] if a message line precedes the first
/// setting line, any error from applying a setting line or converting a
/// message, and [`EnigmaError::Io`] if reading or writing fails.
pub fn process<R: BufRead, W: Write>(
    machine: &mut Machine,
    input: R,
    mut output: W,
) -> Result<(), EnigmaError> {
    let mut configured = false;

    for (number, line) in input.lines().enumerate() {
        let line = line?;

        if is_setting_line(&line) {
            let settings = Settings::parse(&line, machine.num_rotors())?;
            settings.apply(machine)?;
            info!(
                line = number + 1,
                rotors = %settings.rotors.join(" "),
                positions = %settings.positions,
                plugboard = %settings.plugboard,
                "configured machine"
            );
            configured = true;
            continue;
        }

        let text = normalize_line(&line, machine.alphabet().as_ref());
        if text.is_empty() {
            writeln!(output)?;
            continue;
        }
        if !configured {
            return Err(EnigmaError::format(format!(
                "line {}: message before the first setting line",
                number + 1
            )));
        }

        let converted = machine.convert_message(&text)?;
        writeln!(output, "{}", format_groups(&converted))?;
    }

    output.flush()?;
    Ok(())
}
