//! The machine's 4KiB memory and the resident font table
//!
//! Every access masks the address to 12 bits, so reads and writes can never
//! leave the array. The region below [PROGRAM_BASE] belongs to the
//! interpreter; program images load at [PROGRAM_BASE] and up.

use crate::error::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Total addressable memory, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Base address of the resident font glyphs
pub const FONT_BASE: u16 = 0x050;
/// Bytes per font glyph
pub const FONT_STRIDE: u16 = 5;
/// First address of program space; everything below it is interpreter-resident
pub const PROGRAM_BASE: u16 = 0x200;

/// Glyph bitmaps for hex digits 0..=F, 5 bytes per glyph, MSB leftmost
const FONT: [u8; 16 * FONT_STRIDE as usize] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Fixed-size machine memory. The font table is written once at construction
/// and never mutated by the interpreter afterwards.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    bytes: [u8; MEM_SIZE],
}

impl Mem {
    /// Constructs a blank memory with the font table resident
    /// # Examples
    /// ```rust
    /// # use ocho::prelude::*;
    /// let mem = mem::Mem::new();
    /// // first byte of glyph `0`
    /// assert_eq!(0xf0, mem.read(0x050));
    /// ```
    pub fn new() -> Self {
        Mem::default()
    }

    /// Reads the byte at `adr`
    #[inline(always)]
    pub fn read(&self, adr: u16) -> u8 {
        self.bytes[adr as usize % MEM_SIZE]
    }

    /// Writes a byte at `adr`
    #[inline(always)]
    pub fn write(&mut self, adr: u16, data: u8) {
        self.bytes[adr as usize % MEM_SIZE] = data;
    }

    /// Reads the big-endian instruction word at `adr`
    #[inline(always)]
    pub fn read_word(&self, adr: u16) -> u16 {
        u16::from_be_bytes([self.read(adr), self.read(adr.wrapping_add(1))])
    }

    /// Writes a big-endian instruction word at `adr`
    pub fn write_word(&mut self, adr: u16, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.write(adr, hi);
        self.write(adr.wrapping_add(1), lo);
    }

    /// Capacity of program space, in bytes
    pub fn program_cap(&self) -> usize {
        MEM_SIZE - PROGRAM_BASE as usize
    }

    /// Zeroes program space, then copies `rom` in at [PROGRAM_BASE].
    ///
    /// Oversize images are rejected whole with [Error::OversizeProgram];
    /// memory is left untouched on failure.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        let cap = self.program_cap();
        if rom.len() > cap {
            return Err(Error::OversizeProgram { len: rom.len(), cap });
        }
        let program = &mut self.bytes[PROGRAM_BASE as usize..];
        program.fill(0);
        program[..rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Address of the resident glyph for the low nibble of `digit`
    /// # Examples
    /// ```rust
    /// # use ocho::prelude::*;
    /// let mem = mem::Mem::new();
    /// assert_eq!(0x050, mem.glyph(0x0));
    /// assert_eq!(0x09b, mem.glyph(0xf));
    /// // only the low nibble selects the glyph
    /// assert_eq!(mem.glyph(0x3), mem.glyph(0xa3));
    /// ```
    pub fn glyph(&self, digit: u8) -> u16 {
        FONT_BASE + FONT_STRIDE * (digit & 0xf) as u16
    }
}

impl Default for Mem {
    fn default() -> Self {
        let mut bytes = [0; MEM_SIZE];
        bytes[FONT_BASE as usize..FONT_BASE as usize + FONT.len()].copy_from_slice(&FONT);
        Mem { bytes }
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
