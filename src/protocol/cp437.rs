//! # Code Page 437 Encoding
//!
//! Converts Unicode strings to CP437 single-byte encoding, the power-on
//! default code page of generic ESC/POS printers.
//!
//! ASCII (U+0000–U+007F) passes through unchanged. The upper half is a
//! positional lookup against the standard CP437 table. Characters outside
//! the code page are replaced with `?` and a warning is printed, because a
//! multi-byte or unmapped character would desynchronize the printer's
//! single-byte text stream.

/// The 128 Unicode code points occupying CP437 bytes 0x80–0xFF, in order.
///
/// Reference: IBM Code Page 437 character set.
const CP437_HIGH: [char; 128] = [
    // 0x80–0x8F
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    // 0x90–0x9F
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0–0xAF
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0–0xBF
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0–0xCF
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0–0xDF
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0–0xEF
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0–0xFF
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];

/// Encode a Unicode string as CP437 bytes.
///
/// - ASCII (U+0000–U+007F): passed through as-is
/// - CP437 upper half: single byte in 0x80–0xFF
/// - Unmapped characters: replaced with `?`, warning printed to stderr
pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        if (ch as u32) < 0x80 {
            out.push(ch as u8);
        } else if let Some(byte) = unicode_to_cp437(ch) {
            out.push(byte);
        } else {
            eprintln!(
                "cp437: unmapped character '{}' (U+{:04X}), replacing with '?'",
                ch, ch as u32
            );
            out.push(b'?');
        }
    }
    out
}

/// Map a Unicode code point to its CP437 byte value (0x80–0xFF).
///
/// Returns `None` if the character has no CP437 representation.
fn unicode_to_cp437(ch: char) -> Option<u8> {
    CP437_HIGH
        .iter()
        .position(|&c| c == ch)
        .map(|i| 0x80 + i as u8)
}
