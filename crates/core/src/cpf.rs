//! CPF (Cadastro de Pessoas Físicas) validation and formatting.
//!
//! A complete CPF has 11 decimal digits, the last two being mod-11 check digits computed over
//! the preceding ones. User input usually carries the `DDD.DDD.DDD-DD` punctuation, so every
//! entry point strips non-digit characters before looking at the value.
//!
//! - [`format`] is total and is meant to run on every keystroke of an input control.
//! - [`is_valid`] is the submission gate.
//! - [`Cpf`] wraps a value that has already passed [`is_valid`].

use crate::constants::CPF_LEN;
use crate::{CoreError, CoreResult};
use std::fmt;

/// Returns the ASCII digits of `input`, in order, with everything else removed.
pub fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a partial or complete CPF progressively.
///
/// Non-digits are stripped and the result is truncated to 11 digits before punctuation is
/// applied:
///
/// | digits | output |
/// |--------|--------|
/// | 0–3 | `DDD` |
/// | 4–6 | `DDD.DDD` |
/// | 7–9 | `DDD.DDD.DDD` |
/// | 10–11 | `DDD.DDD.DDD-DD` |
///
/// Re-applying the formatter to its own output yields the same string.
pub fn format(raw: &str) -> String {
    let mut d = digits(raw);
    d.truncate(CPF_LEN);

    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
    }
}

/// Returns true if `input` holds a checksum-valid CPF.
///
/// Punctuation is ignored. The value must have exactly 11 digits, must not be a single digit
/// repeated 11 times, and both check digits must match.
pub fn is_valid(input: &str) -> bool {
    let ds: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    if ds.len() != CPF_LEN || ds.iter().all(|&d| d == ds[0]) {
        return false;
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&ds[..9]);
    check_digits(&base) == [ds[9], ds[10]]
}

/// Computes both check digits for the first nine digits of a CPF.
pub fn check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = check_digit(base);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    [first, check_digit(&extended)]
}

// Weights run from len + 1 down to 2; remainders of 10 collapse to 0.
fn check_digit(ds: &[u8]) -> u8 {
    let top = ds.len() as u32 + 1;
    let sum: u32 = ds
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();

    match (sum * 10) % 11 {
        r if r >= 10 => 0,
        r => r as u8,
    }
}

/// A checksum-valid CPF stored as its 11 digits.
///
/// Construct with [`Cpf::parse`]; once you hold a `Cpf` the value is known to be valid.
/// `Display` renders the punctuated form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Validates `input` (punctuation allowed) and keeps its digits.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCpf`] if `input` fails [`is_valid`].
    pub fn parse(input: &str) -> CoreResult<Self> {
        if !is_valid(input) {
            return Err(CoreError::InvalidCpf);
        }
        Ok(Self(digits(input)))
    }

    /// The 11 digits, no punctuation.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The `DDD.DDD.DDD-DD` form.
    pub fn formatted(&self) -> String {
        format(&self.0)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for Cpf {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
