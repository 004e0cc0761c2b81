//! Host-visible execution flags that sit outside the machine's register file

/// Flags that control stepping and surface the display/input handshakes to
/// the host. None of these are part of the machine's own state; the host may
/// read and (for `pause`/`debug`) set them freely between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when live disassembly tracing is enabled
    pub debug: bool,
    /// Set when the host paused the machine; [crate::Cpu::step] is a no-op
    /// while it holds
    pub pause: bool,
    /// Set while the machine is blocked on `fx0a`, waiting for a key release
    pub keypause: bool,
    /// Set whenever the display buffer changes; the host clears it after
    /// rendering
    pub draw: bool,
    /// The key most recently released while in keypause
    pub lastkey: Option<usize>,
}
