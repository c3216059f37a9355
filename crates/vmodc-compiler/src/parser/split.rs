//! Splits an interface description into its preamble and declarations.

use crate::diagnostics::Span;

/// One `$`-introduced declaration, before tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'s> {
    /// Header text after the `$`, including indented continuation lines.
    pub header: &'s str,
    /// Byte offset of `header` in the input.
    pub header_offset: usize,
    /// Span of the header including the `$`, for diagnostics.
    pub span: Span,
    /// Everything after the header up to the next declaration.
    pub doc: &'s str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'s> {
    /// Free-form text before the first declaration, trimmed.
    pub preamble: &'s str,
    pub declarations: Vec<Declaration<'s>>,
}

/// A declaration starts at a `$` at the start of the input or right after a newline.
pub fn split(source: &str) -> Document<'_> {
    let mut starts: Vec<usize> = Vec::new();
    if source.starts_with('$') {
        starts.push(0);
    }
    starts.extend(source.match_indices("\n$").map(|(i, _)| i + 1));

    let preamble_end = starts.first().copied().unwrap_or(source.len());
    let mut declarations = Vec::with_capacity(starts.len());

    for (n, &start) in starts.iter().enumerate() {
        // The newline in front of the next `$` belongs to neither chunk.
        let end = starts.get(n + 1).map_or(source.len(), |&next| next - 1);
        let body_start = start + 1;
        let chunk = &source[body_start..end];

        let (header, doc) = match header_end(chunk) {
            Some(newline) => (&chunk[..newline], &chunk[newline + 1..]),
            None => (chunk, ""),
        };

        declarations.push(Declaration {
            header,
            header_offset: body_start,
            span: start..body_start + header.trim_end().len(),
            doc,
        });
    }

    Document {
        preamble: source[..preamble_end].trim(),
        declarations,
    }
}

/// Position of the first newline not followed by a space or tab.
fn header_end(chunk: &str) -> Option<usize> {
    let bytes = chunk.as_bytes();
    bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b'\n' && bytes.get(i + 1).is_none_or(|&c| c != b' ' && c != b'\t'))
        .map(|(i, _)| i)
}

/// Documentation lines with leading and trailing blank lines removed.
pub fn trim_doc(doc: &str) -> Vec<String> {
    let lines: Vec<&str> = doc.split('\n').collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].iter().map(|l| l.to_string()).collect(),
        _ => Vec::new(),
    }
}
