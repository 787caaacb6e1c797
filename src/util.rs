//! Utility functions.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// Tries UTF-8 first (BOM handled automatically via encoding_rs), then the
/// encoding named in a `<meta charset="...">` declaration, then falls back
/// to Windows-1252 (a superset of ISO-8859-1, common in legacy documents).
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = extract_meta_charset(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the encoding name from a `<meta charset="...">` declaration.
///
/// Only the first 1024 bytes are checked, matching the prescan window
/// browsers use.
fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(1024);
    let prefix = &bytes[..check_len];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after = &prefix[pos + 8..];

    if after.is_empty() {
        return None;
    }

    // Value may be quoted or bare
    let (value_start, terminator): (usize, &[u8]) = match after[0] {
        b'"' => (1, b"\""),
        b'\'' => (1, b"'"),
        _ => (0, b" >\"'"),
    };

    let rest = &after[value_start..];
    let value_end = rest
        .iter()
        .position(|b| terminator.contains(b))
        .unwrap_or(rest.len());

    std::str::from_utf8(&rest[..value_end]).ok()
}
