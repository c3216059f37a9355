//! Argument and return types, and the argument-list parser.

use std::collections::HashSet;

use serde_json::{Value, json};
use vmodc_core::ValueKind;
use vmodc_core::text::{is_identifier, unquote};

use crate::diagnostics::DiagnosticKind;
use crate::parser::{Cursor, PResult, ParseCtx, TokenKind};

/// A value kind, plus the literal set for `ENUM {...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub kind: ValueKind,
    pub enum_values: Option<Vec<String>>,
}

impl TypeSpec {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            enum_values: None,
        }
    }

    pub fn void() -> Self {
        Self::new(ValueKind::Void)
    }

    pub fn c_type(&self) -> &'static str {
        self.kind.c_type()
    }

    /// Documentation spelling. Terse form omits the literal set.
    pub fn vcl(&self, terse: bool) -> String {
        match &self.enum_values {
            Some(values) if !terse => {
                format!("{} {{{}}}", self.kind.doc_name(), values.join(", "))
            }
            _ => self.kind.doc_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub ty: TypeSpec,
    pub name: Option<String>,
    pub default: Option<String>,
    pub optional: bool,
    /// Field name in the argument struct: the declared name or `arg<N>`.
    pub slot: String,
}

impl Argument {
    /// `[KIND, name, default, literals, true]`, trailing nulls dropped.
    pub fn to_json(&self) -> Value {
        let mut fields = vec![
            json!(self.ty.kind),
            json!(self.name),
            json!(self.default),
            json!(self.ty.enum_values),
        ];
        if self.optional {
            fields.push(Value::Bool(true));
        }
        while fields.last().is_some_and(Value::is_null) {
            fields.pop();
        }
        Value::Array(fields)
    }

    /// Documentation rendering; private-state arguments have none.
    pub fn vcl(&self, terse: bool) -> Option<String> {
        if self.ty.kind.is_priv() {
            return None;
        }
        let mut out = self.ty.vcl(terse);
        if let Some(name) = &self.name {
            out.push(' ');
            out.push_str(name);
        }
        if let Some(default) = self.default.as_ref().filter(|_| !terse) {
            out.push('=');
            out.push_str(default);
        }
        if self.optional {
            out = format!("[{out}]");
        }
        Some(out)
    }
}

pub(crate) fn parse_type(ctx: &mut ParseCtx<'_>, cursor: &mut Cursor<'_, '_>) -> PResult<TypeSpec> {
    let token = ctx.take(cursor, "a type")?;
    let Some(kind) = ValueKind::from_token(token.text) else {
        return Err(ctx.fail(DiagnosticKind::ExpectedType, token.text));
    };

    let mut ty = TypeSpec::new(kind);
    if cursor.peek_is(TokenKind::LBrace) {
        if kind != ValueKind::Enum {
            return Err(ctx.fail_plain(DiagnosticKind::EnumSpecNotAllowed));
        }
        ty.enum_values = Some(parse_enum_spec(ctx, cursor)?);
    }
    Ok(ty)
}

fn parse_enum_spec(ctx: &mut ParseCtx<'_>, cursor: &mut Cursor<'_, '_>) -> PResult<Vec<String>> {
    ctx.expect(cursor, TokenKind::LBrace, "{")?;

    let mut values: Vec<String> = Vec::new();
    loop {
        let token = ctx.take(cursor, "an ENUM value")?;
        if token.kind.is_separator() {
            return Err(ctx.fail(
                DiagnosticKind::ExpectedToken,
                format!("expected an ENUM value, got `{}`", token.text),
            ));
        }

        let value = unquote(token.text);
        ctx.register_enum(value);
        if values.iter().any(|v| v == value) {
            ctx.warn(DiagnosticKind::DuplicateEnumValue, value)?;
        } else {
            values.push(value.to_string());
        }

        let separator = ctx.take(cursor, "`}`")?;
        match separator.kind {
            TokenKind::RBrace => break,
            TokenKind::Comma => continue,
            _ => {
                return Err(ctx.fail(
                    DiagnosticKind::ExpectedToken,
                    format!("expected `,` or `}}`, got `{}`", separator.text),
                ));
            }
        }
    }
    Ok(values)
}

/// Parses `()` or `( item, [item], ... )` up to the end of the cursor.
///
/// Returns the arguments and whether any of them is optional.
pub(crate) fn parse_arguments(
    ctx: &mut ParseCtx<'_>,
    cursor: &mut Cursor<'_, '_>,
) -> PResult<(Vec<Argument>, bool)> {
    let rest = cursor.remaining();
    if let [open, close] = rest
        && open.is(TokenKind::LParen)
        && close.is(TokenKind::RParen)
    {
        cursor.bump();
        cursor.bump();
        return Ok((Vec::new(), false));
    }

    ctx.expect(cursor, TokenKind::LParen, "(")?;
    let close = &rest[rest.len() - 1];
    if rest.len() < 2 || !close.is(TokenKind::RParen) {
        return Err(ctx.fail(
            DiagnosticKind::ExpectedToken,
            format!("expected `)`, got `{}`", close.text),
        ));
    }

    let mut inner = Cursor::new(&rest[1..rest.len() - 1]);
    let mut args = Vec::new();
    let mut names = HashSet::new();
    let mut argstruct = false;

    for position in 1.. {
        let arg = if inner.eat(TokenKind::LBracket) {
            let mut arg = parse_argument(ctx, &mut inner, &mut names, TokenKind::RBracket, position)?;
            if arg.name.is_none() {
                return Err(ctx.fail_plain(DiagnosticKind::UnnamedOptional));
            }
            arg.optional = true;
            ctx.expect(&mut inner, TokenKind::RBracket, "]")?;
            argstruct = true;
            arg
        } else {
            parse_argument(ctx, &mut inner, &mut names, TokenKind::Comma, position)?
        };

        if arg.ty.kind == ValueKind::Void {
            return Err(ctx.fail_plain(DiagnosticKind::VoidArgument));
        }
        args.push(arg);

        match inner.bump() {
            None => break,
            Some(t) if t.is(TokenKind::Comma) => continue,
            Some(t) => {
                return Err(ctx.fail(
                    DiagnosticKind::ExpectedToken,
                    format!("expected `,`, got `{}`", t.text),
                ));
            }
        }
    }

    cursor.skip_rest();
    Ok((args, argstruct))
}

fn parse_argument(
    ctx: &mut ParseCtx<'_>,
    cursor: &mut Cursor<'_, '_>,
    names: &mut HashSet<String>,
    end: TokenKind,
    position: usize,
) -> PResult<Argument> {
    let ty = parse_type(ctx, cursor)?;
    let mut arg = Argument {
        ty,
        name: None,
        default: None,
        optional: false,
        slot: format!("arg{position}"),
    };

    if at_end(cursor, end) {
        return Ok(arg);
    }

    let name = ctx.take(cursor, "an argument name")?;
    if !is_identifier(name.text) {
        return Err(ctx.fail(
            DiagnosticKind::ExpectedToken,
            format!("expected an argument name, got `{}`", name.text),
        ));
    }
    if !names.insert(name.text.to_string()) {
        return Err(ctx.fail(DiagnosticKind::DuplicateArgument, name.text));
    }
    arg.name = Some(name.text.to_string());
    arg.slot = name.text.to_string();

    if at_end(cursor, end) {
        return Ok(arg);
    }

    ctx.expect(cursor, TokenKind::Equals, "=")?;
    let default = ctx.take(cursor, "a default value")?;
    if default.kind.is_separator() {
        return Err(ctx.fail(
            DiagnosticKind::ExpectedToken,
            format!("expected a default value, got `{}`", default.text),
        ));
    }
    arg.default = Some(if arg.ty.kind == ValueKind::Enum {
        unquote(default.text).to_string()
    } else {
        default.text.to_string()
    });

    Ok(arg)
}

/// A plain item ends at `,` or at the closing parenthesis; an optional one at `]`.
fn at_end(cursor: &Cursor<'_, '_>, end: TokenKind) -> bool {
    match cursor.peek() {
        None => end == TokenKind::Comma,
        Some(token) => token.is(end),
    }
}
