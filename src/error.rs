//! Error type for ocho

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ocho.
///
/// Unrecognized opcodes are deliberately *not* represented here: the machine
/// skips them and reports [crate::cpu::Step::Unknown], per the forward-progress
/// rule. Everything below either rejects a host request outright or ends the
/// current execution session.
#[derive(Debug, Error)]
pub enum Error {
    /// The program image does not fit in program space
    #[error("program is {len} bytes, but program space holds {cap}")]
    OversizeProgram {
        /// Length of the rejected image
        len: usize,
        /// Capacity of program space
        cap: usize,
    },
    /// A subroutine call was issued with the return stack at capacity
    #[error("call stack overflow at depth {depth}")]
    StackOverflow {
        /// Depth of the stack when the call was attempted
        depth: usize,
    },
    /// A return was issued with the return stack empty
    #[error("return with an empty call stack")]
    StackUnderflow,
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
