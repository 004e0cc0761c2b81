//! Contains implementations for each Chip-8 [Insn]

use super::*;
use rand::random;

impl Cpu {
    /// Executes a single [Insn]
    #[rustfmt::skip]
    #[inline(always)]
    pub(super) fn execute(&mut self, instruction: Insn) -> Result<()> {
        match instruction {
            Insn::cls               => self.clear_screen(),
            Insn::ret               => self.ret()?,
            Insn::jmp   {       A } => self.jump(A),
            Insn::call  {       A } => self.call(A)?,
            Insn::seb   {    x, B } => self.skip_equals_immediate(x, B),
            Insn::sneb  {    x, B } => self.skip_not_equals_immediate(x, B),
            Insn::se    { y, x    } => self.skip_equals(x, y),
            Insn::movb  {    x, B } => self.load_immediate(x, B),
            Insn::addb  {    x, B } => self.add_immediate(x, B),
            Insn::mov   { y, x    } => self.load(x, y),
            Insn::or    { y, x    } => self.or(x, y),
            Insn::and   { y, x    } => self.and(x, y),
            Insn::xor   { y, x    } => self.xor(x, y),
            Insn::add   { y, x    } => self.add(x, y),
            Insn::sub   { y, x    } => self.sub(x, y),
            Insn::shr   { y, x    } => self.shift_right(x, y),
            Insn::bsub  { y, x    } => self.backwards_sub(x, y),
            Insn::shl   { y, x    } => self.shift_left(x, y),
            Insn::sne   { y, x    } => self.skip_not_equals(x, y),
            Insn::movI  {       A } => self.load_i_immediate(A),
            Insn::jmpr  {       A } => self.jump_indexed(A),
            Insn::rand  {    x, B } => self.rand(x, B),
            Insn::draw  { y, x, n } => self.draw(x, y, n),
            Insn::sek   {    x    } => self.skip_key_equals(x),
            Insn::snek  {    x    } => self.skip_key_not_equals(x),
            Insn::getdt {    x    } => self.load_delay_timer(x),
            Insn::waitk {    x    } => self.wait_for_key(x),
            Insn::setdt {    x    } => self.store_delay_timer(x),
            Insn::setst {    x    } => self.store_sound_timer(x),
            Insn::addI  {    x    } => self.add_i(x),
            Insn::font  {    x    } => self.load_sprite(x),
            Insn::bcd   {    x    } => self.bcd_convert(x),
            Insn::dmao  {    x    } => self.store_dma(x),
            Insn::dmai  {    x    } => self.load_dma(x),
        }
        Ok(())
    }
}

/// |`00e0`| Clear screen, |`00ee`| Return from subroutine
impl Cpu {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) {
        self.screen.clear();
        self.flags.draw = true;
    }
    /// |`00ee`| Returns from subroutine.
    ///
    /// Popping an empty stack is fatal for the session, since the machine
    /// would otherwise mis-decode from a garbage address.
    #[inline(always)]
    pub(super) fn ret(&mut self) -> Result<()> {
        self.pc = self.stack.pop().ok_or(Error::StackUnderflow)?;
        Ok(())
    }
}

/// |`1aaa`| Sets pc to an absolute address
impl Cpu {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl Cpu {
    /// |`2aaa`| Pushes pc onto the stack, then jumps to a.
    ///
    /// The seventeenth nested call overflows the stack, which is fatal for
    /// the session.
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) -> Result<()> {
        if self.stack.len() >= STACK_DEPTH {
            return Err(Error::StackOverflow {
                depth: self.stack.len(),
            });
        }
        self.stack.push(self.pc);
        self.pc = a;
        Ok(())
    }
}

/// |`3xbb`| |`4xbb`| |`5xy0`| |`9xy0`| Conditional skips
impl Cpu {
    /// |`3xbb`| Skips the next instruction if vX == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        if self.v[x] == b {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`4xbb`| Skips the next instruction if vX != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        if self.v[x] != b {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`5xy0`| Skips the next instruction if vX == vY
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] == self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`9xy0`| Skips the next instruction if vX != vY
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] != self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl Cpu {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl Cpu {
    /// |`7xbb`| Adds immediate byte b to register vX, without touching vF
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X \| Y                         |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; vF = carry              |
/// |`8xy5`| X = X - Y; vF = !borrow            |
/// |`8xy6`| X = X >> 1; vF = bit shifted out   |
/// |`8xy7`| X = Y - X; vF = !borrow            |
/// |`8xyE`| X = X << 1; vF = bit shifted out   |
impl Cpu {
    /// |`8xy0`| Loads the value of vY into vX
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }
    /// |`8xy1`| Bitwise or of vX and vY into vX
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
    }
    /// |`8xy2`| Bitwise and of vX and vY into vX
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
    }
    /// |`8xy3`| Bitwise xor of vX and vY into vX
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
    }
    /// |`8xy4`| Adds vY to vX; vF reports the carry out
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let carry;
        (self.v[x], carry) = self.v[x].overflowing_add(self.v[y]);
        self.v[0xf] = carry.into();
    }
    /// |`8xy5`| Subtracts vY from vX; vF clears on borrow
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let borrow;
        (self.v[x], borrow) = self.v[x].overflowing_sub(self.v[y]);
        self.v[0xf] = (!borrow).into();
    }
    /// |`8xy6`| Shifts vX right by one; vF captures the bit shifted out
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, _y: Reg) {
        let shift_out = self.v[x] & 1;
        self.v[x] >>= 1;
        self.v[0xf] = shift_out;
    }
    /// |`8xy7`| Subtracts vX from vY into vX; vF clears on borrow
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let borrow;
        (self.v[x], borrow) = self.v[y].overflowing_sub(self.v[x]);
        self.v[0xf] = (!borrow).into();
    }
    /// |`8xyE`| Shifts vX left by one; vF captures the bit shifted out
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, _y: Reg) {
        let shift_out = self.v[x] >> 7;
        self.v[x] <<= 1;
        self.v[0xf] = shift_out;
    }
}

/// |`Aaaa`| Load address a into register I
impl Cpu {
    /// |`Aaaa`| Loads address a into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
    }
}

/// |`Baaa`| Jump to a + v0
impl Cpu {
    /// |`Baaa`| Jumps to a + v0
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        self.pc = a.wrapping_add(self.v[0] as Adr);
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl Cpu {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = random::<u8>() & b;
    }
}

/// |`Dxyn`| Draws an n-byte sprite to the screen at coordinates (vX, vY)
impl Cpu {
    /// |`Dxyn`| Draws an n-byte sprite to the screen at coordinates (vX, vY).
    ///
    /// Sprite rows are read from memory starting at I; both axes wrap. vF is
    /// cleared first and latches to 1 if any draw unsets a set pixel. The
    /// redraw flag is always raised, even when no pixel changed value.
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib) {
        let (x, y) = (
            self.v[x] as usize % screen::WIDTH,
            self.v[y] as usize % screen::HEIGHT,
        );
        self.v[0xf] = 0;
        for line in 0..n as usize {
            let bits = self.mem.read(self.i.wrapping_add(line as Adr));
            if self.screen.blit_row(x, y + line, bits) {
                self.v[0xf] = 1;
            }
        }
        self.flags.draw = true;
    }
}

/// |`Ex9e`| |`Exa1`| Skips on the state of a keypad latch
impl Cpu {
    /// |`Ex9e`| Skips the next instruction if key vX is pressed
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        if self.keys[self.v[x] as usize & 0xf] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`Exa1`| Skips the next instruction if key vX is not pressed
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        if !self.keys[self.v[x] as usize & 0xf] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`Fxbb`| Timers, key wait, index arithmetic and block transfer
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`Fx07`| vX = DT                            |
/// |`Fx0a`| Wait for key release, vX = key     |
/// |`Fx15`| DT = vX                            |
/// |`Fx18`| ST = vX                            |
/// |`Fx1e`| I += vX; vF on 12-bit overflow     |
/// |`Fx29`| I = glyph address for vX           |
/// |`Fx33`| BCD of vX at I, I+1, I+2           |
/// |`Fx55`| Store v0..=vX at I                 |
/// |`Fx65`| Load v0..=vX from I                |
impl Cpu {
    /// |`Fx07`| Gets the current delay timer and puts it in vX
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.delay;
    }
    /// |`Fx0a`| Waits for a key release, then stores the key in vX.
    ///
    /// Until a key is released the pc rewinds onto this instruction, so the
    /// machine spins here; [Cpu::release] records the key that ends the wait.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        if let Some(key) = self.flags.lastkey.take() {
            self.v[x] = key as u8;
        } else {
            self.pc = self.pc.wrapping_sub(2);
            self.flags.keypause = true;
        }
    }
    /// |`Fx15`| Loads vX into the delay timer
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.delay = self.v[x];
    }
    /// |`Fx18`| Loads vX into the sound timer
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.sound = self.v[x];
    }
    /// |`Fx1e`| Adds vX to I. Unlike the 8-bit adds, overflow is measured
    /// against the 12-bit address space: vF reports it, and I wraps.
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        let i = self.i + self.v[x] as Adr;
        self.v[0xf] = (i > 0xfff).into();
        self.i = i & 0xfff;
    }
    /// |`Fx29`| Loads the address of the glyph for the low nibble of vX into I
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = self.mem.glyph(self.v[x]);
    }
    /// |`Fx33`| Writes the three decimal digits of vX at I, I+1, I+2
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) {
        let x = self.v[x];
        self.mem.write(self.i, x / 100 % 10);
        self.mem.write(self.i.wrapping_add(1), x / 10 % 10);
        self.mem.write(self.i.wrapping_add(2), x % 10);
    }
    /// |`Fx55`| Stores v0..=vX to memory starting at I. I is left unchanged.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.mem.write(self.i.wrapping_add(reg as Adr), self.v[reg]);
        }
    }
    /// |`Fx65`| Loads v0..=vX from memory starting at I. I is left unchanged.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.v[reg] = self.mem.read(self.i.wrapping_add(reg as Adr));
        }
    }
}
