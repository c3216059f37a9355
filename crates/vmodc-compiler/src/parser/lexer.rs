//! Tokenizer for declaration headers.
//!
//! Separators are single-character tokens, quoted runs are copied verbatim
//! (quotes included) and everything else accumulates into words. There is no
//! escape mechanism inside quotes.
//!
//! ## Error handling
//!
//! A quote that is never closed becomes a single `Unterminated` token running
//! to the end of the header. The lexer itself never fails; the parser rejects
//! such tokens.

use logos::Logos;

use crate::diagnostics::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Quoted,

    #[regex(r#""[^"]*"#)]
    #[regex(r"'[^']*")]
    Unterminated,

    #[regex(r#"[^\s\[\](){},="']+"#)]
    Word,
}

impl TokenKind {
    pub fn is_separator(self) -> bool {
        matches!(
            self,
            Self::LBracket
                | Self::RBracket
                | Self::LParen
                | Self::RParen
                | Self::LBrace
                | Self::RBrace
                | Self::Comma
                | Self::Equals
        )
    }
}

/// Token with its text and its byte span in the whole input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    pub span: Span,
}

impl<'s> Token<'s> {
    #[inline]
    pub fn new(kind: TokenKind, text: &'s str, span: Span) -> Self {
        Self { kind, text, span }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Tokenizes `source`, a slice starting at byte `offset` of the full input.
pub fn lex(source: &str, offset: usize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        // Every non-space character belongs to some pattern, so errors only
        // appear on inputs logos cannot classify; keep them as plain words.
        let kind = result.unwrap_or(TokenKind::Word);
        tokens.push(Token::new(
            kind,
            &source[range.clone()],
            range.start + offset..range.end + offset,
        ));
    }

    tokens
}

/// Canonical one-line form of a declaration: `$` followed by its tokens joined by spaces.
pub fn canonical_line(tokens: &[Token<'_>]) -> String {
    let mut line = String::from("$");
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(token.text);
    }
    line
}
