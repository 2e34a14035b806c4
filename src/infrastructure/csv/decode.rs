// ============================================================
// TEXT DECODING
// ============================================================

use encoding_rs::{UTF_8, WINDOWS_1252};

/// Decode raw file bytes into a string, trying UTF-8 (with BOM handling)
/// first and falling back to Windows-1252 for legacy spreadsheet exports.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    // Windows-1252 maps every byte, so this path always produces text.
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8_passes_through() {
        assert_eq!(decode_bytes("name,age".as_bytes()), "name,age");
        assert_eq!(decode_bytes("café".as_bytes()), "café");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"phone");
        assert_eq!(decode_bytes(&bytes), "phone");
    }

    #[test]
    fn test_windows_1252_fallback() {
        // 0xE9 is "é" in Windows-1252 but invalid UTF-8 on its own.
        let bytes = [b'c', b'a', b'f', 0xE9];
        assert_eq!(decode_bytes(&bytes), "café");
    }
}
