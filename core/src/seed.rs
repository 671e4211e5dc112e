//! Seed derivation.
//!
//! A seed is the 32-bit wrapping sum of every part's contribution:
//! integers contribute themselves, strings the sum of their character
//! codes. There is no separator and no positional weight, so distinct
//! part lists can land on the same seed. That collision behaviour is
//! part of the contract: changing it changes every published figure.

use crate::types::{DayBucket, MachineId};

/// One identifying component of a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPart<'a> {
    Int(i64),
    Text(&'a str),
}

impl SeedPart<'_> {
    /// This part's contribution to the folded seed.
    pub fn contribution(&self) -> u32 {
        match *self {
            SeedPart::Int(n) => n as u32,
            SeedPart::Text(s) => char_code_sum(s),
        }
    }
}

impl From<i64> for SeedPart<'_> {
    fn from(n: i64) -> Self {
        SeedPart::Int(n)
    }
}

impl From<u32> for SeedPart<'_> {
    fn from(n: u32) -> Self {
        SeedPart::Int(i64::from(n))
    }
}

impl From<usize> for SeedPart<'_> {
    fn from(n: usize) -> Self {
        SeedPart::Int(n as i64)
    }
}

impl<'a> From<&'a str> for SeedPart<'a> {
    fn from(s: &'a str) -> Self {
        SeedPart::Text(s)
    }
}

/// Fold an ordered list of parts into one seed.
pub fn fold_seed(parts: &[SeedPart<'_>]) -> u32 {
    parts
        .iter()
        .fold(0u32, |acc, part| acc.wrapping_add(part.contribution()))
}

/// Seed for a per-machine reading: `(machine_id, label, day)`.
pub fn metric_seed(machine_id: MachineId, label: &str, day: DayBucket) -> u32 {
    fold_seed(&[SeedPart::Int(machine_id), SeedPart::Text(label), SeedPart::Int(day)])
}

/// Sum of character codes, where a character's code is the first UTF-16
/// unit of its encoding. Characters outside the BMP therefore contribute
/// their high surrogate.
fn char_code_sum(s: &str) -> u32 {
    let mut buf = [0u16; 2];
    s.chars()
        .map(|c| u32::from(c.encode_utf16(&mut buf)[0]))
        .fold(0u32, u32::wrapping_add)
}
