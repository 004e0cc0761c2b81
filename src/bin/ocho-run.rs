//! Headless runner: loads a ROM, runs it for a fixed number of frames at a
//! fixed instructions-per-frame rate, then dumps the screen and registers.
//!
//! This is deliberately the thinnest possible host: no window, no input
//! events, no frame pacing. It exists to smoke-run ROMs and to show the
//! host-side handshake (`frame`, `draw_pending`/`clear_draw`, `dump`).

use gumdrop::Options;
use ocho::prelude::*;
use std::path::PathBuf;

#[derive(Clone, Debug, Options)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Number of frames to run.", default = "60", meta = "N")]
    frames: usize,
    #[options(help = "Set the instructions-per-frame rate.", default = "10", meta = "IPF")]
    speed: usize,
    #[options(help = "Print live disassembly while running.")]
    trace: bool,
    #[options(help = "Skip the final screen and register dump.")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Arguments::parse_args_default_or_exit();
    let mut cpu = Cpu::new();
    cpu.flags.debug = args.trace;
    cpu.load_rom(&args.file)?;
    for _ in 0..args.frames {
        cpu.frame(args.speed)?;
        // a real host would render here
        cpu.clear_draw();
    }
    if !args.quiet {
        cpu.screen().print_screen();
        cpu.dump();
    }
    Ok(())
}
