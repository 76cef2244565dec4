//! Quote- and escape-aware scanning.

/// If the character at `index` begins an opaque lexical run (a `\` escape or
/// a double-quoted span), return the index just past the run; otherwise
/// return `index` unchanged.
///
/// Inside a quoted span a doubled `""` is an escaped quote, not a closing
/// one. An unterminated escape or span runs to the end of the text.
pub fn opaque_run_end(text: &str, index: usize) -> usize {
    let bytes = text.as_bytes();
    match bytes.get(index) {
        Some(b'\\') => match text[index + 1..].chars().next() {
            Some(c) => index + 1 + c.len_utf8(),
            None => text.len(),
        },
        Some(b'"') => {
            let mut i = index + 1;
            while i < bytes.len() {
                if bytes[i] == b'"' {
                    if bytes.get(i + 1) == Some(&b'"') {
                        i += 2;
                        continue;
                    }
                    return i + 1;
                }
                i += 1;
            }
            text.len()
        }
        _ => index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_characters_are_significant() {
        assert_eq!(opaque_run_end("abc", 0), 0);
        assert_eq!(opaque_run_end("a,b", 1), 1);
    }

    #[test]
    fn escapes_cover_the_next_character() {
        assert_eq!(opaque_run_end(r"\,x", 0), 2);
        assert_eq!(opaque_run_end(r"a\é", 1), 4);
        // Trailing backslash runs to the end.
        assert_eq!(opaque_run_end(r"ab\", 2), 3);
    }

    #[test]
    fn quoted_spans_are_opaque() {
        let text = r#""a, b" and"#;
        assert_eq!(opaque_run_end(text, 0), 6);
        assert_eq!(&text[0..6], "\"a, b\"");
    }

    #[test]
    fn doubled_quotes_stay_inside_the_span() {
        let text = r#""say ""hi""" x"#;
        assert_eq!(opaque_run_end(text, 0), 12);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(opaque_run_end("\"oops", 0), 5);
    }
}
