//! Resolution of `$Alias` declarations against the symbols seen so far.

use indexmap::IndexMap;
use vmodc_core::text::is_identifier;

use super::{Alias, Stanza, StanzaBody};
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Fatal, PResult, ParseCtx};

/// Resolves `alias` to `target`.
///
/// A plain alias names a function or object. A dotted alias (`.old`) names
/// a method and its target must be spelled `obj.method`.
pub(crate) fn resolve(
    ctx: &mut ParseCtx<'_>,
    stanzas: &[Stanza],
    symbols: &IndexMap<String, usize>,
    alias: &str,
    target: &str,
) -> PResult<Alias> {
    let dotted = alias.strip_prefix('.');
    if !is_identifier(dotted.unwrap_or(alias)) {
        return Err(ctx.fail(DiagnosticKind::IllegalNativeName, alias));
    }

    if dotted.is_none() {
        if !symbols.contains_key(target) {
            return Err(ctx.fail(DiagnosticKind::UnresolvedSymbol, target));
        }
        return Ok(Alias {
            alias: alias.to_string(),
            target: target.to_string(),
            doc_alias: alias.to_string(),
            doc_target: target.to_string(),
        });
    }

    let Some((object_name, method_name)) = target.split_once('.') else {
        return Err(method_target_syntax(ctx));
    };
    if !is_identifier(object_name) || !is_identifier(method_name) {
        return Err(method_target_syntax(ctx));
    }

    let object = symbols
        .get(object_name)
        .and_then(|&i| match &stanzas[i].body {
            StanzaBody::Object(object) => Some(object),
            _ => None,
        });
    let Some(object) = object else {
        return Err(ctx.fail(DiagnosticKind::UnresolvedSymbol, object_name));
    };
    if object.method(target).is_none() {
        return Err(ctx.fail(DiagnosticKind::UnresolvedSymbol, target));
    }

    let alias = format!("{object_name}{alias}");
    Ok(Alias {
        doc_alias: format!("x{alias}"),
        alias,
        target: target.to_string(),
        doc_target: format!("x{target}"),
    })
}

fn method_target_syntax(ctx: &mut ParseCtx<'_>) -> Fatal {
    ctx.fail(
        DiagnosticKind::StanzaSyntax,
        "expected `$Alias <.alias> <obj.method>`",
    )
}
