use std::cmp::min;

/// First character must be an ASCII letter, the rest ASCII letters, digits or underscores.
pub fn is_valid_statement_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Label used in logs and error messages, the empty name is the anonymous statement.
pub fn statement_label(name: &str) -> &str {
    if name.is_empty() { "<anonymous>" } else { name }
}

/// Highest `$n` placeholder referenced by the query (0 when there are none).
///
/// Placeholders inside single quoted literals, double quoted identifiers, dollar quoted
/// bodies and comments are ignored.
pub fn max_placeholder(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut result = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            delimiter @ (b'\'' | b'"') => {
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == delimiter {
                        if bytes.get(i + 1) == Some(&delimiter) {
                            i += 1;
                        } else {
                            break;
                        }
                    }
                    i += 1;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i += 1;
            }
            b'$' => {
                let after_word =
                    i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_');
                if !after_word && let Some(tag) = dollar_quote_tag(&bytes[i..]) {
                    i += tag.len();
                    while i < bytes.len() && !bytes[i..].starts_with(tag) {
                        i += 1;
                    }
                    i += tag.len();
                    continue;
                }
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start
                    && let Ok(n) = sql[start..end].parse::<usize>()
                {
                    result = result.max(n);
                }
                i = end.max(i + 1);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    result
}

/// Opening delimiter of a dollar quoted string (`$$` or `$tag$`) at the start of `bytes`.
fn dollar_quote_tag(bytes: &[u8]) -> Option<&[u8]> {
    let first = *bytes.get(1)?;
    if first.is_ascii_digit() {
        return None;
    }
    let end = bytes[1..]
        .iter()
        .position(|&c| !(c.is_ascii_alphanumeric() || c == b'_'))?
        + 1;
    (bytes[end] == b'$').then(|| &bytes[..=end])
}

/// Cut a long query or value so that it can be embedded in a log line.
pub fn truncate_long(value: &str) -> &str {
    let mut end = min(value.len(), 497);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_long(&$query).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
