//! Decodes and runs instructions
//!
//! [Cpu] owns every piece of machine state: memory, registers, call stack,
//! display buffer, timers and keypad latches. It performs no I/O of its own;
//! the host drives [Cpu::step] and [Cpu::tick] and reads the results.


pub mod behavior;
pub mod flags;
pub mod insn;
pub mod mem;
pub mod screen;

use self::{flags::Flags, insn::Insn, mem::Mem, screen::Screen};
use crate::error::{Error, Result};
use imperative_rs::InstructionSet;
use owo_colors::OwoColorize;
use std::fmt::{Debug, Display};

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Maximum depth of the call stack. The seventeenth nested call is fatal.
pub const STACK_DEPTH: usize = 16;

/// The outcome of one [Cpu::step].
///
/// Only stack faults abort a step; an undecodable word is an ordinary,
/// non-fatal outcome that the host may log or ignore.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// An instruction was decoded and executed
    Ran(Insn),
    /// A `0nnn` machine-routine call was fetched and ignored
    Sys(Adr),
    /// The word did not decode; the program counter advanced past it
    Unknown(u16),
    /// The machine is paused; no instruction was fetched
    Idle,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Ran(insn) => write!(f, "{insn}"),
            Step::Sys(a) => write!(f, "sys    {a:03x}"),
            Step::Unknown(word) => write!(f, ".dw    {word:04x}"),
            Step::Idle => write!(f, "idle   "),
        }
    }
}

/// The complete state of one Chip-8 machine.
///
/// Multiple machines coexist safely; there is no shared or global state.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cpu {
    /// Host-visible execution flags (pause, redraw, key-wait)
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    keys: [bool; 16],
    // execution data
    cycle: usize,
}

// public interface
impl Cpu {
    /// Constructs a new machine: blank screen, font resident, pc at 0x200
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let cpu = Cpu::new();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new() -> Self {
        Cpu::default()
    }

    /// Reads a ROM file and loads it into program space
    pub fn load_rom(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program(&std::fs::read(rom)?)
    }

    /// Loads bytes into program space, then performs a full [Cpu::reset].
    ///
    /// An image larger than program space is rejected whole with
    /// [Error::OversizeProgram], and the machine keeps its prior state.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut cpu = Cpu::new();
    /// cpu.load_program(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(0x200, cpu.pc());
    /// cpu.load_program(&vec![0; 0xf000]).unwrap_err();
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        self.reset();
        Ok(self)
    }

    /// Resets everything in reset scope: registers, index register, call
    /// stack, display buffer, timers, cycle count, and the draw/key-wait
    /// flags; pc returns to 0x200.
    ///
    /// Program bytes, the font table, the key latches, and the host-owned
    /// `pause`/`debug` flags are left alone.
    pub fn reset(&mut self) {
        self.flags = Flags {
            keypause: false,
            draw: false,
            lastkey: None,
            ..self.flags
        };
        self.stack.truncate(0);
        self.pc = mem::PROGRAM_BASE;
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        self.screen.clear();
        self.cycle = 0;
    }

    /// Fetches, decodes, and executes a single instruction.
    ///
    /// The program counter advances past the fetched word *before* the
    /// instruction runs, so calls and jumps observe the post-fetch address.
    /// Undecodable words are skipped and reported as [Step::Unknown].
    ///
    /// Returns [Error::StackOverflow] or [Error::StackUnderflow] for stack
    /// faults; those end the session, and the host should stop stepping.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut cpu = Cpu::new();
    /// cpu.load_program(&[0x00, 0xe0]).unwrap();
    /// cpu.step().unwrap();
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    pub fn step(&mut self) -> Result<Step> {
        if self.flags.pause {
            return Ok(Step::Idle);
        }
        let pc = self.pc;
        let word = self.mem.read_word(pc);
        self.pc = self.pc.wrapping_add(2);
        self.cycle += 1;
        let step = match Insn::decode(&word.to_be_bytes()) {
            Ok((_, insn)) => Step::Ran(insn),
            // 0nnn called into native code on the original hardware;
            // a virtual machine has nothing to jump to
            Err(_) if word & 0xf000 == 0x0000 => Step::Sys(word & 0x0fff),
            Err(_) => Step::Unknown(word),
        };
        if self.flags.debug {
            println!("{:3} {pc:03x}: {step}", self.cycle.bright_black());
        }
        if let Step::Ran(insn) = step {
            self.execute(insn)?;
        }
        Ok(step)
    }

    /// Decrements both timers toward zero. Driven by the host at a fixed
    /// rate, conventionally 60Hz, independent of the step cadence.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut cpu = Cpu::new();
    /// cpu.tick();
    /// assert_eq!(0, cpu.delay()); // no underflow
    /// ```
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Runs one frame: `ipf` steps, then one timer tick.
    ///
    /// The instructions-per-frame ratio is host policy, not a machine
    /// invariant. Stops at the first fatal error; [Step::Unknown] outcomes do
    /// not stop the frame.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut cpu = Cpu::new();
    /// cpu.load_program(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jmp 0x202
    /// ]).unwrap();
    /// cpu.frame(8).unwrap();
    /// assert_eq!(8, cpu.cycle());
    /// ```
    pub fn frame(&mut self, ipf: usize) -> Result<&mut Self> {
        for _ in 0..ipf {
            self.step()?;
        }
        self.tick();
        Ok(self)
    }

    /// Sets or clears one key latch, reporting whether its state changed.
    /// Keys outside `0..=0xF` return [Error::InvalidKey].
    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<bool> {
        if pressed {
            self.press(key)
        } else {
            self.release(key)
        }
    }

    /// Presses a key, and reports whether the key's state changed.
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut cpu = Cpu::new();
    /// assert!(cpu.press(0x7).unwrap());
    /// // already held, so nothing changed
    /// assert!(!cpu.press(0x7).unwrap());
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        if let Some(keyref) = self.keys.get_mut(key) {
            if !*keyref {
                *keyref = true;
                return Ok(true);
            }
            Ok(false)
        } else {
            Err(Error::InvalidKey { key })
        }
    }

    /// Releases a key, and reports whether the key's state changed.
    ///
    /// If the machine was blocked on `fx0a`, the released key is recorded
    /// and the wait ends.
    pub fn release(&mut self, key: usize) -> Result<bool> {
        if let Some(keyref) = self.keys.get_mut(key) {
            if *keyref {
                *keyref = false;
                if self.flags.keypause {
                    self.flags.lastkey = Some(key);
                    self.flags.keypause = false;
                }
                return Ok(true);
            }
            Ok(false)
        } else {
            Err(Error::InvalidKey { key })
        }
    }

    /// Pauses or unpauses the machine. While paused, [Cpu::step] is a no-op
    /// returning [Step::Idle]. Distinct from failure states.
    pub fn set_paused(&mut self, paused: bool) {
        self.flags.pause = paused;
    }

    /// True if the host paused the machine
    pub fn is_paused(&self) -> bool {
        self.flags.pause
    }

    /// Sets a general purpose register.
    /// Nonexistent registers return [Error::InvalidRegister].
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the index register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the delay timer
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the sound timer; a host rendering audio cues beeps while nonzero
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the number of instructions executed since the last reset
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Read-only view of the display buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// True if the display buffer changed since the host last cleared the
    /// redraw flag
    pub fn draw_pending(&self) -> bool {
        self.flags.draw
    }

    /// Clears the redraw flag; the host calls this after rendering
    pub fn clear_draw(&mut self) {
        self.flags.draw = false;
    }

    /// Dumps the current state of all registers and the cycle count
    /// # Examples
    /// ```text
    /// PC: 0200, SP: 00, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        println!(
            "PC: {:04x}, SP: {:02x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

impl Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("flags", &self.flags)
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("keys", &self.keys)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            stack: Vec::with_capacity(STACK_DEPTH),
            pc: mem::PROGRAM_BASE,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            keys: [false; 16],
            cycle: 0,
        }
    }
}
