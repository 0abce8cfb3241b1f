//! Text and data images.
//!
//! Both images are sparse maps over the simulated address space. The text
//! image holds one 32-bit word plus its disassembly per instruction
//! address; the data image is byte-addressable with little-endian
//! multi-byte access. Data reads of absent bytes yield zero. Every data
//! access is bounds-checked against the memory range and fails with
//! [`SimError::MemoryRange`] when it falls outside.

use std::collections::{BTreeMap, HashMap};

use crate::common::constants::MEMORY_SIZE;
use crate::common::SimError;

/// One entry of the text image.
#[derive(Clone, Debug)]
pub struct TextWord {
    /// The 32-bit instruction word.
    pub word: u32,
    /// Disassembly of the word, for trace output and state observers.
    pub disasm: String,
}

/// Ordered, sparse mapping from instruction address to text word.
///
/// An address absent from the image terminates fetch.
#[derive(Default)]
pub struct TextImage {
    words: BTreeMap<u32, TextWord>,
}

impl TextImage {
    pub fn insert(&mut self, addr: u32, word: u32, disasm: String) {
        self.words.insert(addr, TextWord { word, disasm });
    }

    pub fn get(&self, addr: u32) -> Option<&TextWord> {
        self.words.get(&addr)
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.words.contains_key(&addr)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &TextWord)> {
        self.words.iter()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}

/// Byte-addressable sparse data memory.
#[derive(Default)]
pub struct DataImage {
    bytes: HashMap<u32, u8>,
}

impl DataImage {
    fn check(addr: u32, size: u32) -> Result<(), SimError> {
        match addr.checked_add(size) {
            Some(end) if end <= MEMORY_SIZE => Ok(()),
            _ => Err(SimError::MemoryRange { addr, size }),
        }
    }

    fn byte(&self, addr: u32) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    pub fn read_u8(&self, addr: u32) -> Result<u8, SimError> {
        Self::check(addr, 1)?;
        Ok(self.byte(addr))
    }

    pub fn read_u16(&self, addr: u32) -> Result<u16, SimError> {
        Self::check(addr, 2)?;
        Ok(u16::from_le_bytes([self.byte(addr), self.byte(addr + 1)]))
    }

    pub fn read_u32(&self, addr: u32) -> Result<u32, SimError> {
        Self::check(addr, 4)?;
        Ok(u32::from_le_bytes([
            self.byte(addr),
            self.byte(addr + 1),
            self.byte(addr + 2),
            self.byte(addr + 3),
        ]))
    }

    pub fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), SimError> {
        Self::check(addr, 1)?;
        self.bytes.insert(addr, val);
        Ok(())
    }

    pub fn write_u16(&mut self, addr: u32, val: u16) -> Result<(), SimError> {
        Self::check(addr, 2)?;
        for (i, b) in val.to_le_bytes().iter().enumerate() {
            self.bytes.insert(addr + i as u32, *b);
        }
        Ok(())
    }

    pub fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), SimError> {
        Self::check(addr, 4)?;
        for (i, b) in val.to_le_bytes().iter().enumerate() {
            self.bytes.insert(addr + i as u32, *b);
        }
        Ok(())
    }

    /// Borrow of the raw byte map for state observers.
    pub fn bytes(&self) -> &HashMap<u32, u8> {
        &self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
