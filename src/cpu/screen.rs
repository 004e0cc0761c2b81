//! The 64x32 1-bpp display buffer
//!
//! Each row is one `u64` with the most significant bit at column 0, so a
//! sprite row is an 8-bit mask rotated into place. Rotation gives horizontal
//! wraparound for free; vertical wraparound is a row-index modulo.

use std::fmt::{Display, Formatter};

/// Display width in pixels
pub const WIDTH: usize = 64;
/// Display height in pixels
pub const HEIGHT: usize = 32;

/// The display buffer. Pixels are toggled by XOR only; the interpreter clears
/// it on `cls` and on reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    rows: [u64; HEIGHT],
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen::default()
    }

    /// Clears every pixel
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT];
    }

    /// Gets the pixel at (x, y), wrapping both coordinates
    /// # Examples
    /// ```rust
    /// # use ocho::prelude::*;
    /// let mut screen = screen::Screen::new();
    /// screen.blit_row(0, 0, 0x80);
    /// assert!(screen.get(0, 0));
    /// assert!(screen.get(64, 32)); // same pixel, wrapped
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows[y % HEIGHT] & 1 << (WIDTH - 1 - x % WIDTH) != 0
    }

    /// The raw rows, one `u64` per scanline, MSB = column 0
    pub fn rows(&self) -> &[u64; HEIGHT] {
        &self.rows
    }

    /// True if no pixel is set
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| *row == 0)
    }

    /// XORs one 8-pixel sprite row into the buffer at (x, y), wrapping both
    /// axes. Returns true if any previously-set pixel was unset.
    pub fn blit_row(&mut self, x: usize, y: usize, bits: u8) -> bool {
        let row = &mut self.rows[y % HEIGHT];
        let mask = ((bits as u64) << (WIDTH - 8)).rotate_right((x % WIDTH) as u32);
        let collision = *row & mask != 0;
        *row ^= mask;
        collision
    }

    /// Draws the buffer to stdout as a braille-dot canvas
    #[cfg(feature = "drawille")]
    pub fn print_screen(&self) {
        use drawille::Canvas;
        let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if self.get(x, y) {
                    canvas.set(x as u32, y as u32);
                }
            }
        }
        println!("{}", canvas.frame());
    }

    /// Draws the buffer to stdout with block characters
    #[cfg(not(feature = "drawille"))]
    pub fn print_screen(&self) {
        println!("{self}");
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows {
            for col in 0..WIDTH {
                f.write_str(if row & 1 << (WIDTH - 1 - col) != 0 {
                    "█"
                } else {
                    " "
                })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
