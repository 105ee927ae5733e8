//! Small string helpers for line-oriented protocol text.

/// Separators between request-line tokens.
pub const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// Splits off the next token delimited by any of `delims`.
///
/// Leading delimiters are skipped. Returns the token and whatever follows
/// the single delimiter that ended it, or `None` if only delimiters remain.
///
/// ```
/// # use spindle::http::text::{next_token, WHITESPACE};
/// assert_eq!(next_token("  GET / HTTP/1.1", WHITESPACE), Some(("GET", "/ HTTP/1.1")));
/// assert_eq!(next_token("/a?b?c", &['?']), Some(("/a", "b?c")));
/// assert_eq!(next_token(" \r\n", WHITESPACE), None);
/// ```
pub fn next_token<'a>(s: &'a str, delims: &[char]) -> Option<(&'a str, &'a str)> {
    let s = s.trim_start_matches(delims);
    if s.is_empty() {
        return None;
    }

    match s.char_indices().find(|(_, c)| delims.contains(c)) {
        Some((end, c)) => Some((&s[..end], &s[end + c.len_utf8()..])),
        None => Some((s, "")),
    }
}

pub fn skip_whitespace(s: &str) -> &str {
    s.trim_start_matches(WHITESPACE)
}

/// Strips the trailing line terminator.
pub fn chomp(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_token_without_trailing_delimiter() {
        assert_eq!(next_token("token", WHITESPACE), Some(("token", "")));
    }

    #[test]
    fn next_token_consumes_one_delimiter() {
        assert_eq!(next_token("a  b", WHITESPACE), Some(("a", " b")));
    }

    #[test]
    fn next_token_empty_input() {
        assert_eq!(next_token("", WHITESPACE), None);
        assert_eq!(next_token("???", &['?']), None);
    }

    #[test]
    fn skip_whitespace_leaves_inner_spaces() {
        assert_eq!(skip_whitespace(" \t text/html; q=1"), "text/html; q=1");
    }

    #[test]
    fn chomp_strips_crlf_and_lf() {
        assert_eq!(chomp("Host: a\r\n"), "Host: a");
        assert_eq!(chomp("Host: a\n"), "Host: a");
        assert_eq!(chomp("Host: a"), "Host: a");
    }
}
