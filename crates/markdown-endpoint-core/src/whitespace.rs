//! Final whitespace pass over a converted body.

/// Collapse every run of three or more newlines to exactly two, then trim
/// leading and trailing whitespace.
pub fn collapse_and_trim(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut newline_count = 0;

    for &b in bytes {
        if b == b'\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(b);
            }
        } else {
            newline_count = 0;
            result.push(b);
        }
    }

    // Only ASCII newlines were dropped, so the bytes are still valid UTF-8
    let collapsed = String::from_utf8(result).unwrap_or_default();
    collapsed.trim().to_string()
}
