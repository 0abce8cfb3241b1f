//! Machine image loading.
//!
//! The simulator consumes finished machine code: an ordered list of
//! `(address, value)` pairs as produced by an external assembler. Entries
//! below the data segment are instruction words; entries at or above it
//! are single data bytes. A plain-text hex listing format (`address:
//! value` per line, `#` comments) feeds the CLI.

use std::fs;

use crate::common::constants::DATA_BASE;
use crate::common::SimError;

/// A finished machine-code image.
#[derive(Clone, Debug, Default)]
pub struct MachineImage {
    entries: Vec<(u32, u32)>,
}

impl MachineImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw `(address, value)` pairs in insertion order.
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    /// Appends an instruction word. The address must lie in the text
    /// segment for the simulator to treat it as code.
    pub fn push_text(&mut self, addr: u32, word: u32) {
        self.entries.push((addr, word));
    }

    /// Appends one data byte.
    pub fn push_data_byte(&mut self, addr: u32, byte: u8) {
        self.entries.push((addr, byte as u32));
    }

    /// Appends a little-endian data word as four byte entries.
    pub fn push_data_word(&mut self, addr: u32, word: u32) {
        for (i, b) in word.to_le_bytes().iter().enumerate() {
            self.push_data_byte(addr + i as u32, *b);
        }
    }

    /// Convenience constructor for a contiguous text segment starting at
    /// address zero.
    pub fn from_words(words: &[u32]) -> Self {
        let mut image = Self::new();
        for (i, &w) in words.iter().enumerate() {
            image.push_text(i as u32 * 4, w);
        }
        image
    }

    /// Parses a hex listing: one `address: value` pair per line, both in
    /// hexadecimal with optional `0x` prefixes. Blank lines and lines
    /// starting with `#` are skipped. Data-segment values wider than a
    /// byte are expanded little-endian.
    pub fn from_hex(listing: &str) -> Result<Self, SimError> {
        let mut image = Self::new();
        for (idx, raw) in listing.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, ':');
            let (addr_str, value_str) = match (parts.next(), parts.next()) {
                (Some(a), Some(v)) => (a.trim(), v.trim()),
                _ => {
                    return Err(SimError::MalformedImage {
                        line: idx + 1,
                        reason: "expected `address: value`".to_string(),
                    });
                }
            };
            let addr = parse_hex(addr_str).ok_or_else(|| SimError::MalformedImage {
                line: idx + 1,
                reason: format!("bad address `{}`", addr_str),
            })?;
            let value = parse_hex(value_str).ok_or_else(|| SimError::MalformedImage {
                line: idx + 1,
                reason: format!("bad value `{}`", value_str),
            })?;

            if addr >= DATA_BASE {
                image.push_data_word(addr, value);
            } else {
                image.push_text(addr, value);
            }
        }
        if image.entries.is_empty() {
            return Err(SimError::EmptyProgram);
        }
        Ok(image)
    }

    /// Reads and parses a hex listing file.
    pub fn from_hex_file(path: &str) -> Result<Self, SimError> {
        let listing = fs::read_to_string(path).map_err(|e| SimError::MalformedImage {
            line: 0,
            reason: format!("could not read '{}': {}", path, e),
        })?;
        Self::from_hex(&listing)
    }
}

fn parse_hex(s: &str) -> Option<u32> {
    u32::from_str_radix(s.trim_start_matches("0x"), 16).ok()
}
