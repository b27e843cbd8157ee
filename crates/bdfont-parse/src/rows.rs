//! Bitmap rows: hex text to bytes, bytes to bits

use bdfont_core::error::MalformedFontError;

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Decode one `BITMAP` row into exactly `expected` bytes
///
/// Digits may be either case. Rows carrying more bytes than needed keep the
/// leading ones; rows carrying fewer are malformed.
pub fn decode_hex_row(
    row: &str,
    expected: usize,
    line: usize,
) -> Result<Vec<u8>, MalformedFontError> {
    let digits = row.as_bytes();
    let invalid = || MalformedFontError::InvalidHex {
        line,
        value: row.to_string(),
    };

    if digits.len() % 2 != 0 {
        return Err(invalid());
    }

    let bytes = digits
        .chunks(2)
        .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;

    if bytes.len() < expected {
        return Err(MalformedFontError::ShortBitmapRow {
            line,
            expected,
            found: bytes.len(),
        });
    }

    Ok(bytes[..expected].to_vec())
}

/// Unpack bytes MSB-first, keeping only the first `width` bits
pub fn unpack_bits(bytes: &[u8], width: usize) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .take(width)
        .collect()
}
