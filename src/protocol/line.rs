//! # ESC/POS Text Styling and Line Encoding
//!
//! This module implements per-line text formatting for generic ESC/POS
//! printers, and the encoder that turns one logical line into one wire
//! buffer.
//!
//! ## Line Discipline
//!
//! A receipt is a sequence of logical lines. Each line is encoded as a
//! single self-contained buffer:
//!
//! ```text
//! [bold on?] [alignment?] <text bytes> LF [bold off] [align left]
//! ```
//!
//! The leading controls are emitted only when the style asks for them; the
//! trailing resets are emitted unconditionally, so formatting can never
//! leak from one line into the next no matter how the previous line ended.
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use super::commands::{ESC, LF};
use super::cp437;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Sets the alignment for subsequent text lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Example
///
/// ```
/// use recibo::protocol::line::{align, Alignment};
///
/// let center = align(Alignment::Center);
/// assert_eq!(center, vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Convenience function for left alignment
#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

/// Convenience function for center alignment
#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

/// Convenience function for right alignment
#[inline]
pub fn align_right() -> Vec<u8> {
    align(Alignment::Right)
}

// ============================================================================
// TEXT EMPHASIS (BOLD)
// ============================================================================

/// # Enable Bold/Emphasis (ESC E 1)
///
/// Turns on emphasized (bold) printing for subsequent text.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC E 1  |
/// | Hex     | 1B 45 01 |
/// | Decimal | 27 69 1  |
///
/// ## Effect
///
/// Text is printed with double-strike, appearing bolder/darker. On
/// thermal printers this typically means more heat applied.
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// # Disable Bold/Emphasis (ESC E 0)
///
/// Turns off emphasized (bold) printing.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC E 0  |
/// | Hex     | 1B 45 00 |
/// | Decimal | 27 69 0  |
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}

// ============================================================================
// LINE STYLE
// ============================================================================

/// Formatting attributes for one logical line.
///
/// ## Example
///
/// ```
/// use recibo::protocol::line::LineStyle;
///
/// let header = LineStyle::new().bold().center();
/// let total = LineStyle::new().bold().right();
/// let body = LineStyle::new();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineStyle {
    pub bold: bool,
    pub align: Alignment,
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn center(mut self) -> Self {
        self.align = Alignment::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Alignment::Right;
        self
    }
}

// ============================================================================
// LINE ENCODER
// ============================================================================

/// Encode one logical line as a single wire buffer.
///
/// Emits, in order:
///
/// 1. Bold-on, only if `style.bold`
/// 2. Alignment, only if not the left default
/// 3. The text in CP437 encoding, terminated by LF
/// 4. Bold-off and align-left, unconditionally
///
/// The resets ride in the same buffer as the text, so a line that reaches
/// the printer always restores the default state behind itself. Callers
/// send the returned buffer as exactly one write; splitting or merging
/// line buffers would reorder controls relative to the text they modify.
///
/// ## Example
///
/// ```
/// use recibo::protocol::line::{encode_line, LineStyle};
///
/// let bytes = encode_line("TOTAL", &LineStyle::new().bold());
/// assert_eq!(
///     bytes,
///     vec![
///         0x1B, 0x45, 0x01,             // bold on
///         b'T', b'O', b'T', b'A', b'L', // text
///         0x0A,                         // line feed
///         0x1B, 0x45, 0x00,             // bold off
///         0x1B, 0x61, 0x00,             // align left
///     ]
/// );
/// ```
pub fn encode_line(text: &str, style: &LineStyle) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 12);

    if style.bold {
        out.extend(bold_on());
    }
    if style.align != Alignment::Left {
        out.extend(align(style.align));
    }

    out.extend(cp437::encode(text));
    out.push(LF);

    out.extend(bold_off());
    out.extend(align_left());

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold_on(), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold_off(), vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_plain_line() {
        let bytes = encode_line("hi", &LineStyle::new());
        // No leading controls, text + LF, then both resets
        assert_eq!(
            bytes,
            vec![b'h', b'i', 0x0A, 0x1B, 0x45, 0x00, 0x1B, 0x61, 0x00]
        );
    }

    #[test]
    fn test_bold_wraps_text_tightly() {
        let bytes = encode_line("X", &LineStyle::new().bold());
        // Bold-on immediately before the text byte, bold-off immediately
        // after the terminator
        assert_eq!(&bytes[0..3], &[0x1B, 0x45, 0x01]);
        assert_eq!(bytes[3], b'X');
        assert_eq!(bytes[4], 0x0A);
        assert_eq!(&bytes[5..8], &[0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_centered_line() {
        let bytes = encode_line("mid", &LineStyle::new().center());
        assert_eq!(&bytes[0..3], &[0x1B, 0x61, 0x01]);
        // Trailing align-left reset present
        assert_eq!(&bytes[bytes.len() - 3..], &[0x1B, 0x61, 0x00]);
    }

    #[test]
    fn test_bold_centered_order() {
        let bytes = encode_line("A", &LineStyle::new().bold().center());
        // Bold control precedes alignment, both precede the text
        assert_eq!(
            bytes,
            vec![
                0x1B, 0x45, 0x01, // bold on
                0x1B, 0x61, 0x01, // center
                b'A',
                0x0A,
                0x1B, 0x45, 0x00, // bold off
                0x1B, 0x61, 0x00, // align left
            ]
        );
    }

    #[test]
    fn test_empty_line_still_resets() {
        let bytes = encode_line("", &LineStyle::new());
        assert_eq!(bytes, vec![0x0A, 0x1B, 0x45, 0x00, 0x1B, 0x61, 0x00]);
    }

    #[test]
    fn test_no_leak_across_lines() {
        // Concatenating a bold line and a plain line: the plain line's text
        // must be preceded (anywhere earlier) by a bold-off with no
        // intervening bold-on.
        let mut stream = encode_line("first", &LineStyle::new().bold());
        stream.extend(encode_line("second", &LineStyle::new()));

        let text_pos = stream
            .windows(6)
            .position(|w| w == b"second")
            .expect("second line text present");
        let before = &stream[..text_pos];
        let last_bold_on = before.windows(3).rposition(|w| w == [0x1B, 0x45, 0x01]);
        let last_bold_off = before.windows(3).rposition(|w| w == [0x1B, 0x45, 0x00]);
        assert!(last_bold_off > last_bold_on);
    }
}
