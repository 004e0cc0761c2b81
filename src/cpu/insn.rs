#![allow(clippy::bad_bit_mask)]
//! The base Chip-8 instruction table
//!
//! Decoding is driven by the `imperative-rs` [InstructionSet] derive: each
//! variant's `#[opcode]` template fixes the constant nibbles and binds the
//! variable ones to fields. Words that match no template fall out of
//! [Insn::decode] as an error, which [crate::Cpu::step] turns into the
//! non-fatal [crate::Step::Unknown] outcome.

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// One decoded instruction of the 35-instruction base set.
///
/// `0nnn` (machine-routine call) is the one member handled outside this
/// table, since its pattern overlaps `00e0`/`00ee`.
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    #[opcode = "0x00e0"]
    cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    ret,
    /// | 1aaa | Jump to an absolute address
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// | 2aaa | Push pc onto the stack, then jump to a
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// | 3xbb | Skip next instruction if vX == b
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// | 4xbb | Skip next instruction if vX != b
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// | 5xy0 | Skip next instruction if vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// | 6xbb | Load immediate byte b into vX
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// | 7xbb | Add immediate byte b to vX, no carry out
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// | 8xy0 | Copy vY into vX
    #[opcode = "0x8xy0"]
    mov { x: usize, y: usize },
    /// | 8xy1 | Bitwise or of vX and vY into vX
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// | 8xy2 | Bitwise and of vX and vY into vX
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// | 8xy3 | Bitwise xor of vX and vY into vX
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// | 8xy4 | vX += vY; vF = carry
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// | 8xy5 | vX -= vY; vF = !borrow
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// | 8xy6 | vX >>= 1; vF = bit shifted out
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// | 8xy7 | vX = vY - vX; vF = !borrow
    #[opcode = "0x8xy7"]
    bsub { y: usize, x: usize },
    /// | 8xyE | vX <<= 1; vF = bit shifted out
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// | 9xy0 | Skip next instruction if vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// | Aaaa | Load address a into register I
    #[opcode = "0xaAAA"]
    movI { A: u16 },
    /// | Baaa | Jump to a + v0
    #[opcode = "0xbAAA"]
    jmpr { A: u16 },
    /// | Cxbb | Load random byte & b into vX
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },
    /// | Dxyn | Draw an n-row sprite at (vX, vY); vF = collision
    #[opcode = "0xdxyn"]
    draw { y: usize, x: usize, n: u8 },
    /// | Ex9e | Skip next instruction if key vX is pressed
    #[opcode = "0xex9e"]
    sek { x: usize },
    /// | Exa1 | Skip next instruction if key vX is not pressed
    #[opcode = "0xexa1"]
    snek { x: usize },
    /// | Fx07 | Load the delay timer into vX
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// | Fx0a | Wait for a key release, store the key in vX
    #[opcode = "0xfx0a"]
    waitk { x: usize },
    /// | Fx15 | Load vX into the delay timer
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// | Fx18 | Load vX into the sound timer
    #[opcode = "0xfx18"]
    setst { x: usize },
    /// | Fx1e | Add vX to I; vF set on overflow past 0xfff
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// | Fx29 | Load the address of the glyph for vX into I
    #[opcode = "0xfx29"]
    font { x: usize },
    /// | Fx33 | Store the decimal digits of vX at I, I+1, I+2
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// | Fx55 | Store v0..=vX to memory starting at I
    #[opcode = "0xfx55"]
    dmao { x: usize },
    /// | Fx65 | Load v0..=vX from memory starting at I
    #[opcode = "0xfx65"]
    dmai { x: usize },
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { A }         => write!(f, "jmp    {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     #{B:02x}, v{x:X}"),
            Insn::sneb { B, x }     => write!(f, "sne    #{B:02x}, v{x:X}"),
            Insn::se { y, x }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { B, x }     => write!(f, "mov    #{B:02x}, v{x:X}"),
            Insn::addb { B, x }     => write!(f, "add    #{B:02x}, v{x:X}"),
            Insn::mov { x, y }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { y, x }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { y, x }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { y, x }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sub { y, x }      => write!(f, "sub    v{y:X}, v{x:X}"),
            Insn::shr { y, x }      => write!(f, "shr    v{y:X}, v{x:X}"),
            Insn::bsub { y, x }     => write!(f, "bsub   v{y:X}, v{x:X}"),
            Insn::shl { y, x }      => write!(f, "shl    v{y:X}, v{x:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movI { A }        => write!(f, "mov    ${A:03x}, I"),
            Insn::jmpr { A }        => write!(f, "jmp    ${A:03x}+v0"),
            Insn::rand { B, x }     => write!(f, "rand   #{B:02x}, v{x:X}"),
            Insn::draw { y, x, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x }         => write!(f, "sek    v{x:X}"),
            Insn::snek { x }        => write!(f, "snek   v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::setst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addI { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
        }
    }
}
