use std::borrow::Cow;

/// Decodes `data` as text.
///
/// UTF-16 input is only recognized through its byte order mark (BOM).
/// Everything else is treated as UTF-8, replacing invalid sequences with `�`.
pub(crate) fn to_utf8_str(data: &[u8]) -> Cow<'_, str> {
    match get_utf16_data(data) {
        Some(converted) => Cow::Owned(converted),
        None => {
            let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
            String::from_utf8_lossy(data)
        }
    }
}

fn get_utf16_data(data: &[u8]) -> Option<String> {
    // Check if an utf-16 byte order mark (bom) exists
    if !(data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")) {
        return None;
    }
    // Determine byte order for little endian (le) and big endian (be)
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    // A trailing odd byte cannot form a code unit and is dropped
    let utf16 = data[2..]
        .chunks_exact(2)
        .map(|chunk| endian([chunk[0], chunk[1]]))
        .collect::<Vec<_>>();

    Some(String::from_utf16_lossy(&utf16))
}
