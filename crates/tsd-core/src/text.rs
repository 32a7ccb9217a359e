//! Sanitizing of externally originated text before it is embedded in messages.

/// Replacement for non-printable characters.
pub const PLACEHOLDER: char = '?';

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Replaces control characters (except newline and tab) with [`PLACEHOLDER`]
/// and truncates the result to `max_len` characters.
pub fn sanitize(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_len + ELLIPSIS.len()));
    for (count, ch) in input.chars().enumerate() {
        if count == max_len {
            out.push_str(ELLIPSIS);
            break;
        }
        if ch.is_control() && ch != '\n' && ch != '\t' {
            out.push(PLACEHOLDER);
        } else {
            out.push(ch);
        }
    }
    out
}
