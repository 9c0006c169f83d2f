//! Comment pre-pass run before lexing.
//!
//! `#` starts a comment that runs to the end of the line, except inside a
//! quoted string. Comment bytes are overwritten with spaces, so the result
//! has the same length as the input and token offsets still index the
//! original text.

use std::borrow::Cow;

/// Blank out `#` comments. Borrows the input when it has none.
pub fn strip_comments(input: &str) -> Cow<'_, str> {
    if !input.contains('#') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut in_comment = false;
    let mut escaped = false;
    for c in input.chars() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                out.push(c);
            } else {
                // Keep byte length so offsets do not shift
                out.extend(std::iter::repeat_n(' ', c.len_utf8()));
            }
            continue;
        }
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }
        match c {
            '#' => {
                in_comment = true;
                out.push(' ');
            }
            '"' => {
                in_string = true;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
