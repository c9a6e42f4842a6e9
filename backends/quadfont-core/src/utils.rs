// this_file: backends/quadfont-core/src/utils.rs

//! Utility functions for the quadfont engine.

/// Decode one codepoint from the start of `bytes`.
///
/// Returns the decoded character and the number of bytes consumed, or
/// `None` for empty input. Malformed sequences (bad lead byte, truncated
/// or invalid continuation, overlong forms, surrogates) decode to
/// U+FFFD and consume exactly one byte so the scan can resynchronize.
pub fn decode_utf8(bytes: &[u8]) -> Option<(char, usize)> {
    let &lead = bytes.first()?;
    let len = match lead {
        0x00..=0x7F => return Some((lead as char, 1)),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Some((char::REPLACEMENT_CHARACTER, 1)),
    };
    if bytes.len() < len {
        return Some((char::REPLACEMENT_CHARACTER, 1));
    }
    match std::str::from_utf8(&bytes[..len]) {
        Ok(text) => text.chars().next().map(|ch| (ch, len)),
        Err(_) => Some((char::REPLACEMENT_CHARACTER, 1)),
    }
}

/// Decode a whole byte span into `(byte offset, char)` pairs.
pub fn decode_all(bytes: &[u8]) -> Vec<(usize, char)> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    while let Some((ch, len)) = decode_utf8(&bytes[pos..]) {
        out.push((pos, ch));
        pos += len;
    }
    out
}

/// Largest pixel size a glyph key can carry.
pub const MAX_PIXEL_SIZE: u32 = 4096;

/// Quantize a font size to the integer pixel size used in glyph keys.
///
/// Sizes are clamped to `1..=MAX_PIXEL_SIZE`.
pub fn quantize_size(size: f32) -> u32 {
    if size.is_finite() {
        size.round().clamp(1.0, MAX_PIXEL_SIZE as f32) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_sequences() {
        assert_eq!(decode_utf8(b"A"), Some(('A', 1)));
        assert_eq!(decode_utf8("é".as_bytes()), Some(('é', 2)));
        assert_eq!(decode_utf8("€x".as_bytes()), Some(('€', 3)));
        assert_eq!(decode_utf8("😀".as_bytes()), Some(('😀', 4)));
        assert_eq!(decode_utf8(b""), None);
    }

    #[test]
    fn test_decode_malformed_advances_one_byte() {
        assert_eq!(decode_utf8(&[0x80, b'A']), Some(('\u{FFFD}', 1)));
        assert_eq!(decode_utf8(&[0xC0, 0x80]), Some(('\u{FFFD}', 1)));
        assert_eq!(decode_utf8(&[0xE2, 0x82]), Some(('\u{FFFD}', 1)));
        assert_eq!(decode_utf8(&[0xED, 0xA0, 0x80]), Some(('\u{FFFD}', 1)));
        assert_eq!(decode_utf8(&[0xE2, b'A', b'B']), Some(('\u{FFFD}', 1)));
    }

    #[test]
    fn test_decode_all_resynchronizes() {
        let decoded = decode_all(&[b'a', 0xFF, 0xC3, 0xA9, b'b']);
        assert_eq!(
            decoded,
            vec![(0, 'a'), (1, '\u{FFFD}'), (2, 'é'), (4, 'b')]
        );
    }

    #[test]
    fn test_quantize_size() {
        assert_eq!(quantize_size(12.4), 12);
        assert_eq!(quantize_size(12.5), 13);
        assert_eq!(quantize_size(0.2), 1);
        assert_eq!(quantize_size(f32::NAN), 1);
        assert_eq!(quantize_size(1e12), MAX_PIXEL_SIZE);
        assert_eq!(quantize_size(f32::INFINITY), 1);
    }
}
