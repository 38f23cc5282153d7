//! # ESC/POS Job Commands
//!
//! This module implements the job-level ESC/POS commands: printer
//! initialization and paper cutting. Per-line styling lives in
//! [`super::line`].
//!
//! ## Escape Sequence Structure
//!
//! ESC/POS commands are byte sequences built from a one-byte prefix
//! (ESC or GS) followed by an op-code byte and fixed argument bytes:
//!
//! - Two bytes: `ESC @`
//! - Three bytes: `ESC E n`, `ESC a n`, `GS V n`
//!
//! The printer consumes commands in strict arrival order; a control
//! sequence takes effect for all text that follows it on the stream.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for cutter and graphics commands:
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by the current
/// line spacing amount. Every logical line ends with exactly one LF.
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Sent once at the
/// start of each print job so no formatting from a previous (possibly
/// aborted) job leaks into this one.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Emphasis (bold) disabled
/// - Alignment reset to left
/// - Line spacing reset to default
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// # Full Paper Cut (GS V 0)
///
/// Performs a full cut, separating the finished receipt from the roll.
/// Sent once at the end of each print job.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
///
/// ## Behavior
///
/// - Prints any pending data in the line buffer
/// - Cuts the paper completely (no hinge)
/// - Printers without an auto-cutter ignore this command
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_cut_full() {
        assert_eq!(cut_full(), vec![0x1D, 0x56, 0x00]);
    }
}
