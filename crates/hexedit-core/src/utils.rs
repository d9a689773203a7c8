use crate::error::{EditorError, Result};

/// Parses a user-entered offset or sector number.
///
/// Hexadecimal unless a prefix says otherwise: `0x`/`$` hex, `0o` octal,
/// `#` decimal.
pub fn parse_number(text: &str) -> Option<u64> {
    let text = text.trim();
    let (digits, radix) = if let Some(rest) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
    {
        (rest, 16)
    } else if let Some(rest) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        (rest, 8)
    } else if let Some(rest) = text.strip_prefix('#') {
        (rest, 10)
    } else {
        (text, 16)
    };
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Turns a string of hex digit pairs into bytes. Whitespace is ignored.
pub fn parse_hex_string(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if let Some(bad) = digits.iter().find(|b| !b.is_ascii_hexdigit()) {
        return Err(EditorError::MalformedInput(format!(
            "Invalid hex digit '{}'",
            *bad as char
        )));
    }
    if digits.len() % 2 != 0 {
        return Err(EditorError::MalformedInput(
            "Hex string needs an even number of digits".to_string(),
        ));
    }
    Ok(digits
        .chunks(2)
        .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1]))
        .collect())
}

/// Value of one ASCII hex digit; callers check `is_ascii_hexdigit` first.
pub fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Character shown in the ascii column for `byte`.
pub fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}
