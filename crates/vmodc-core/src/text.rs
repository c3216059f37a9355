//! Small text helpers shared by the parser and the generators.

/// Whether `text` is a non-empty string literal wrapped in matching quotes.
///
/// # Examples
/// ```
/// use vmodc_core::text::is_quoted;
/// assert!(is_quoted("\"abc\""));
/// assert!(is_quoted("'abc'"));
/// assert!(!is_quoted("\"\""));
/// assert!(!is_quoted("\"abc'"));
/// ```
pub fn is_quoted(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 2 && bytes[0] == bytes[bytes.len() - 1] && matches!(bytes[0], b'"' | b'\'')
}

/// Strip the quotes from a literal accepted by [`is_quoted`]; other text is returned as is.
pub fn unquote(text: &str) -> &str {
    if is_quoted(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Plain native identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Wrap a native prototype into lines of at most `width` characters.
///
/// Breaks after the last `,` (or failing that `(`) that fits, and indents
/// continuation lines by four spaces. The result always ends with a newline.
///
/// # Examples
/// ```
/// use vmodc_core::text::wrap_prototype;
/// assert_eq!(wrap_prototype("VCL_INT f(VRT_CTX);", 64), "VCL_INT f(VRT_CTX);\n");
/// assert_eq!(wrap_prototype("aaaa(bbbb, cccc);", 10), "aaaa(bbbb,\n    cccc);\n");
/// ```
pub fn wrap_prototype(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut rest = text;
    let mut indent = "";

    while rest.chars().count() > width {
        let head = &rest[..byte_offset(rest, width)];
        let Some(cut) = head.rfind(',').or_else(|| head.rfind('(')) else {
            break;
        };
        lines.push(format!("{indent}{}", &rest[..=cut]));
        rest = rest[cut + 1..].trim_start();
        indent = "    ";
    }
    if !rest.is_empty() {
        lines.push(format!("{indent}{rest}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Width of `text` once tabs are expanded to 8-column stops.
///
/// Newlines reset the column but still count as one character, so a
/// multi-line string reports its total expanded length.
pub fn expanded_len(text: &str) -> usize {
    let mut total = 0;
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                column += pad;
                total += pad;
            }
            '\n' | '\r' => {
                column = 0;
                total += 1;
            }
            _ => {
                column += 1;
                total += 1;
            }
        }
    }
    total
}

/// reStructuredText section title, preceded by a blank line.
///
/// # Examples
/// ```
/// use vmodc_core::text::rst_header;
/// assert_eq!(rst_header("Title", '-', None), "\nTitle\n-----\n");
/// assert_eq!(rst_header("T", '=', Some('=')), "\n=\nT\n=\n");
/// ```
pub fn rst_header(title: &str, below: char, above: Option<char>) -> String {
    let width = title.chars().count();
    let mut out = String::from("\n");
    if let Some(c) = above {
        out.extend(std::iter::repeat_n(c, width));
        out.push('\n');
    }
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat_n(below, width));
    out.push('\n');
    out
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
