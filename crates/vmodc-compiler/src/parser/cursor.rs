//! Token cursor and the shared state threaded through declaration parsing.

use std::collections::BTreeSet;

use super::lexer::{Token, TokenKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity, Span};

/// Marker for a defect that stops the run. The diagnostic is already recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fatal;

pub type PResult<T> = Result<T, Fatal>;

/// Forward-only view over the tokens of one declaration.
#[derive(Debug, Clone)]
pub struct Cursor<'t, 's> {
    tokens: &'t [Token<'s>],
    pos: usize,
}

impl<'t, 's> Cursor<'t, 's> {
    pub fn new(tokens: &'t [Token<'s>]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'t Token<'s>> {
        self.tokens.get(self.pos)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.is(kind))
    }

    pub fn bump(&mut self) -> Option<&'t Token<'s>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes the next token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    pub fn skip_rest(&mut self) {
        self.pos = self.tokens.len();
    }

    pub fn remaining(&self) -> &'t [Token<'s>] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }
}

/// Records `kind` at `span` and converts its final severity into control flow.
pub fn report(
    diagnostics: &mut Diagnostics,
    kind: DiagnosticKind,
    span: Span,
    detail: Option<&str>,
) -> PResult<()> {
    let mut builder = diagnostics.report(kind, span);
    if let Some(detail) = detail {
        builder = builder.message(detail);
    }
    match builder.emit() {
        Severity::Error => Err(Fatal),
        Severity::Warning => Ok(()),
    }
}

/// Diagnostics sink and ENUM registry for one declaration.
pub struct ParseCtx<'a> {
    diagnostics: &'a mut Diagnostics,
    enums: &'a mut BTreeSet<String>,
    span: Span,
}

impl<'a> ParseCtx<'a> {
    pub fn new(
        diagnostics: &'a mut Diagnostics,
        enums: &'a mut BTreeSet<String>,
        span: Span,
    ) -> Self {
        Self {
            diagnostics,
            enums,
            span,
        }
    }

    /// Records an error-class defect and returns the marker to propagate.
    pub fn fail(&mut self, kind: DiagnosticKind, detail: impl AsRef<str>) -> Fatal {
        let _ = report(self.diagnostics, kind, self.span.clone(), Some(detail.as_ref()));
        Fatal
    }

    /// Like [`ParseCtx::fail`] with the kind's default message.
    pub fn fail_plain(&mut self, kind: DiagnosticKind) -> Fatal {
        let _ = report(self.diagnostics, kind, self.span.clone(), None);
        Fatal
    }

    /// Records a possibly recoverable defect; errors only when promoted.
    pub fn warn(&mut self, kind: DiagnosticKind, detail: &str) -> PResult<()> {
        report(self.diagnostics, kind, self.span.clone(), Some(detail))
    }

    pub fn register_enum(&mut self, literal: &str) {
        if !self.enums.contains(literal) {
            self.enums.insert(literal.to_string());
        }
    }

    /// Next token, or an `UnexpectedEnd` failure naming what was wanted.
    pub fn take<'t, 's>(&mut self, cursor: &mut Cursor<'t, 's>, wanted: &str) -> PResult<&'t Token<'s>> {
        match cursor.bump() {
            Some(token) => Ok(token),
            None => Err(self.fail(DiagnosticKind::UnexpectedEnd, format!("expected {wanted}"))),
        }
    }

    /// Consumes a separator of the given kind or fails with `ExpectedToken`.
    pub fn expect(&mut self, cursor: &mut Cursor<'_, '_>, kind: TokenKind, text: &str) -> PResult<()> {
        match cursor.bump() {
            Some(token) if token.is(kind) => Ok(()),
            Some(token) => Err(self.fail(
                DiagnosticKind::ExpectedToken,
                format!("expected `{text}`, got `{}`", token.text),
            )),
            None => Err(self.fail(DiagnosticKind::UnexpectedEnd, format!("expected `{text}`"))),
        }
    }
}
