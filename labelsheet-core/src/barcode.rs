// Symbol generation is delegated to `barcoders`. This module only picks
// the symbology, screens the payload and adds quiet zones around the
// module sequence.

use barcoders::sym::code128::Code128;
use thiserror::Error;

pub const SYMBOLOGY: &str = "Code 128 (set B)";

// Blank modules on each side of the symbol.
pub const QUIET_ZONE_MODULES: usize = 2;

// Leading character that selects Code 128 character set B in barcoders.
const CODE128_SET_B: char = 'Ɓ';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("payload is empty")]
    Empty,

    #[error("character {0:?} cannot be encoded in {SYMBOLOGY}")]
    Unsupported(char),

    #[error("encoder rejected payload: {0}")]
    Rejected(String),
}

// Encoded symbol: one entry per module, `true` for a bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarcodeModules {
    modules: Vec<bool>,
}

impl BarcodeModules {
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    // Consecutive bar runs as `(first_module, run_length)`.
    pub fn bar_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start: Option<usize> = None;
        for (i, &bar) in self.modules.iter().enumerate() {
            match (bar, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    runs.push((s, i - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.modules.len() - s));
        }
        runs
    }
}

pub fn encode(payload: &str) -> Result<BarcodeModules, BarcodeError> {
    if payload.is_empty() {
        return Err(BarcodeError::Empty);
    }
    // Set B covers printable ASCII; anything else would be read by the
    // encoder as a set switch or rejected outright.
    if let Some(c) = payload.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(BarcodeError::Unsupported(c));
    }
    let symbol = Code128::new(format!("{CODE128_SET_B}{payload}"))
        .map_err(|e| BarcodeError::Rejected(format!("{e:?}")))?;

    let encoded = symbol.encode();
    let mut modules = Vec::with_capacity(encoded.len() + QUIET_ZONE_MODULES * 2);
    modules.extend(std::iter::repeat_n(false, QUIET_ZONE_MODULES));
    modules.extend(encoded.iter().map(|&m| m == 1));
    modules.extend(std::iter::repeat_n(false, QUIET_ZONE_MODULES));
    Ok(BarcodeModules { modules })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_printable_ascii() {
        let b = encode("ABC-001").unwrap();
        // symbols are 11 modules wide, the stop pattern 13
        let symbol_len = b.len() - QUIET_ZONE_MODULES * 2;
        assert_eq!((symbol_len - 13) % 11, 0);
        assert!(symbol_len >= 9 * 11 + 13);
        assert!(!b.modules()[0]);
        assert!(b.modules()[QUIET_ZONE_MODULES]);
        assert!(!b.modules()[b.len() - 1]);
    }

    #[test]
    fn rejects_empty_payload() {
        assert_eq!(encode(""), Err(BarcodeError::Empty));
    }

    #[test]
    fn rejects_characters_outside_set_b() {
        assert_eq!(encode("café"), Err(BarcodeError::Unsupported('é')));
        assert_eq!(encode("A\tB"), Err(BarcodeError::Unsupported('\t')));
        assert_eq!(encode("ƁX"), Err(BarcodeError::Unsupported('Ɓ')));
    }

    #[test]
    fn bar_runs_cover_every_bar_module() {
        let b = encode("12345").unwrap();
        let bars: usize = b.bar_runs().iter().map(|(_, n)| n).sum();
        assert_eq!(bars, b.modules().iter().filter(|m| **m).count());
        for (start, len) in b.bar_runs() {
            assert!(b.modules()[start..start + len].iter().all(|m| *m));
        }
    }
}
