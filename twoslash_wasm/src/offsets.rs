/// JS/editor boundary uses UTF-16 code units (Monaco offsets and columns).
/// Ranges are half-open `[start, end)`; `end` is exclusive.
pub fn utf16_offset_to_byte(source: &str, utf16: usize) -> usize {
    if utf16 == 0 {
        return 0;
    }

    let mut u16_count = 0usize;
    for (byte_idx, ch) in source.char_indices() {
        if u16_count >= utf16 {
            return byte_idx;
        }
        u16_count += ch.len_utf16();
    }

    source.len()
}

/// Counts the UTF-16 code units in front of `byte`. Offsets past the end clamp to the end and
/// offsets inside a character count that character as not yet reached.
pub fn byte_offset_to_utf16_offset(source: &str, byte: usize) -> u32 {
    let mut u16_count = 0usize;
    for (byte_idx, ch) in source.char_indices() {
        if byte_idx >= byte {
            break;
        }
        u16_count += ch.len_utf16();
    }
    u32::try_from(u16_count).unwrap_or(u32::MAX)
}
