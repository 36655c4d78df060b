/// Render raw bytes as the canonical hex listing: rows of 16 bytes, each
/// prefixed with its offset as four uppercase hex digits, an extra "- "
/// separator after the 8th byte, and a trailing newline after the last row.
///
/// The exact layout is parsed by downstream tooling, so it must not change.
pub fn hexdump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3 + (data.len() / 16 + 1) * 8);
    for (i, byte) in data.iter().enumerate() {
        if i != 0 && i % 16 == 0 {
            out.push('\n');
        }
        if i % 16 == 0 {
            out.push_str(&format!("{:04X}: ", i));
        }
        if i % 16 == 8 {
            out.push_str("- ");
        }
        out.push_str(&format!("{:02X} ", byte));
    }
    out.push('\n');
    out
}
