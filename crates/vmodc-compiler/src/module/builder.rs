//! Declaration-by-declaration construction of a [`Module`].
//!
//! The builder owns all mutable parse state: the diagnostics sink, the ENUM
//! registry, the open-object cursor that `$Method` attaches to and the
//! running fingerprint. Parsing stops at the first error; warnings are
//! collected and returned with the frozen module.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use vmodc_core::text::{is_identifier, is_quoted, unquote};

use super::alias;
use super::fingerprint::FingerprintBuilder;
use super::{
    AbiMode, Event, Method, Module, Object, Stanza, StanzaBody, StanzaKind, SynopsisMode,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::parser::{
    Cursor, Declaration, Fatal, PResult, ParseCtx, Token, TokenKind, canonical_line, lex, report,
    split, trim_doc,
};
use crate::proto::{parse_base_name, parse_prototype};
use crate::types::{TypeSpec, parse_type};
use crate::{Error, PassResult};

const DEFAULT_SYMBOL_PREFIX: &str = "vmod_";

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    strict: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report warning-class defects as errors.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// Parses a whole interface description.
pub fn parse(source: &str, options: &ParseOptions) -> PassResult<Module> {
    ModuleBuilder::new(options).parse(source)
}

struct ModuleHeader {
    name: String,
    man_section: String,
    description: String,
}

pub struct ModuleBuilder {
    diagnostics: Diagnostics,
    enums: BTreeSet<String>,
    stanzas: Vec<Stanza>,
    /// Functions and objects by name, pointing into `stanzas`.
    symbols: IndexMap<String, usize>,
    /// Object the next `$Method` attaches to.
    open_object: Option<usize>,
    header: Option<ModuleHeader>,
    symbol_prefix: Option<String>,
    abi: Option<AbiMode>,
    synopsis: SynopsisMode,
    /// Set once a declaration appeared that `$Prefix`/`$ABI` must precede.
    settings_closed: bool,
    fingerprint: FingerprintBuilder,
    preamble: String,
}

impl ModuleBuilder {
    pub fn new(options: &ParseOptions) -> Self {
        let diagnostics = if options.is_strict() {
            Diagnostics::strict()
        } else {
            Diagnostics::new()
        };
        Self {
            diagnostics,
            enums: BTreeSet::new(),
            stanzas: Vec::new(),
            symbols: IndexMap::new(),
            open_object: None,
            header: None,
            symbol_prefix: None,
            abi: None,
            synopsis: SynopsisMode::default(),
            settings_closed: false,
            fingerprint: FingerprintBuilder::default(),
            preamble: String::new(),
        }
    }

    /// Parses every declaration in `source` and freezes the result.
    pub fn parse(mut self, source: &str) -> PassResult<Module> {
        let document = split(source);
        self.preamble = document.preamble.to_string();

        for declaration in &document.declarations {
            if self.declaration(declaration).is_err() {
                return Err(Error::Rejected(self.diagnostics));
            }
        }
        self.finish()
    }

    fn finish(self) -> PassResult<Module> {
        let Some(header) = self.header else {
            let mut diagnostics = self.diagnostics;
            diagnostics.report(DiagnosticKind::MissingModule, 0..0).emit();
            return Err(Error::Rejected(diagnostics));
        };

        tracing::debug!(
            module = %header.name,
            stanzas = self.stanzas.len(),
            enums = self.enums.len(),
            "module frozen"
        );

        let module = Module {
            name: header.name,
            man_section: header.man_section,
            description: header.description,
            symbol_prefix: self
                .symbol_prefix
                .unwrap_or_else(|| DEFAULT_SYMBOL_PREFIX.to_string()),
            abi: self.abi.unwrap_or_default(),
            synopsis: self.synopsis,
            stanzas: self.stanzas,
            symbols: self.symbols,
            enums: self.enums,
            fingerprint: self.fingerprint.finish(),
            preamble: self.preamble,
        };
        Ok((module, self.diagnostics))
    }

    fn declaration(&mut self, declaration: &Declaration<'_>) -> PResult<()> {
        let span = declaration.span.clone();
        let tokens = lex(declaration.header, declaration.header_offset);

        if tokens.iter().any(|t| t.is(TokenKind::Unterminated)) {
            return Err(self.fail(DiagnosticKind::UnterminatedString, span, None));
        }
        let Some(keyword) = tokens.first() else {
            return Err(self.fail(DiagnosticKind::ExpectedKeyword, span, None));
        };

        let line = canonical_line(&tokens);
        self.fingerprint.update(&line);

        let Some(kind) = StanzaKind::from_keyword(keyword.text) else {
            return Err(self.fail(DiagnosticKind::UnknownStanza, span, Some(keyword.text)));
        };
        if self.header.is_none() && kind != StanzaKind::Module {
            return Err(self.fail(DiagnosticKind::MissingModule, span, None));
        }

        tracing::debug!(keyword = kind.keyword(), line = %line, "declaration");

        if kind != StanzaKind::Method {
            self.open_object = None;
        }

        let doc = trim_doc(declaration.doc);
        let args = &tokens[1..];
        let decl = Decl {
            kind,
            args,
            line: &line,
            doc,
            span,
        };

        match kind {
            StanzaKind::Module => self.module(decl),
            StanzaKind::Prefix => self.prefix(decl),
            StanzaKind::Abi => self.abi(decl),
            StanzaKind::Synopsis => self.synopsis(decl),
            StanzaKind::Event => self.event(decl),
            StanzaKind::Function => self.function(decl),
            StanzaKind::Object => self.object(decl),
            StanzaKind::Method => self.method(decl),
            StanzaKind::Alias => self.alias(decl),
        }?;

        if kind.closes_settings() {
            self.settings_closed = true;
        }
        Ok(())
    }

    fn module(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        if decl.args.len() < 3 {
            return Err(self.syntax(&decl));
        }
        if self.header.is_some() {
            return report(
                &mut self.diagnostics,
                DiagnosticKind::DuplicateModule,
                decl.span,
                None,
            );
        }

        let name = decl.args[0].text;
        if !is_identifier(name) {
            return Err(self.fail(
                DiagnosticKind::StanzaSyntax,
                decl.span,
                Some(&format!("module name `{name}` is not an identifier")),
            ));
        }

        let rest = &decl.args[2..];
        let description = match rest {
            [only] if is_quoted(only.text) => unquote(only.text).to_string(),
            _ => {
                self.diagnostics.notice(
                    "module-description",
                    "Please put $Module description in quotes.",
                );
                join_tokens(rest)
            }
        };

        self.header = Some(ModuleHeader {
            name: name.to_string(),
            man_section: decl.args[1].text.to_string(),
            description,
        });
        self.push(StanzaBody::Module, decl);
        Ok(())
    }

    fn prefix(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let [symbol] = decl.args else {
            return Err(self.syntax(&decl));
        };
        self.check_setting(&decl, self.symbol_prefix.is_some(), DiagnosticKind::DuplicatePrefix)?;
        if !is_identifier(symbol.text) {
            return Err(self.fail(
                DiagnosticKind::StanzaSyntax,
                decl.span,
                Some(&format!("prefix `{}` is not an identifier", symbol.text)),
            ));
        }

        let prefix = format!("{}_", symbol.text);
        self.symbol_prefix = Some(prefix.clone());
        self.push(StanzaBody::Prefix(prefix), decl);
        Ok(())
    }

    fn abi(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let [mode] = decl.args else {
            return Err(self.syntax(&decl));
        };
        let Some(abi) = AbiMode::from_token(mode.text) else {
            return Err(self.fail(DiagnosticKind::InvalidAbi, decl.span, Some(mode.text)));
        };
        self.check_setting(&decl, self.abi.is_some(), DiagnosticKind::DuplicateAbi)?;

        self.abi = Some(abi);
        self.push(StanzaBody::Abi(abi), decl);
        Ok(())
    }

    fn synopsis(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let [mode] = decl.args else {
            return Err(self.syntax(&decl));
        };
        let Some(synopsis) = SynopsisMode::from_token(mode.text) else {
            return Err(self.fail(DiagnosticKind::InvalidSynopsis, decl.span, Some(mode.text)));
        };

        self.synopsis = synopsis;
        self.push(StanzaBody::Synopsis(synopsis), decl);
        Ok(())
    }

    fn event(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let [function] = decl.args else {
            return Err(self.syntax(&decl));
        };
        if !is_identifier(function.text) {
            return Err(self.fail(DiagnosticKind::IllegalNativeName, decl.span, Some(function.text)));
        }
        if !decl.doc.is_empty() {
            report(
                &mut self.diagnostics,
                DiagnosticKind::EventDocumentation,
                decl.span.clone(),
                Some(function.text),
            )?;
        }

        let event = Event {
            function: function.text.to_string(),
        };
        self.push(StanzaBody::Event(event), decl);
        Ok(())
    }

    fn function(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let mut ctx = ParseCtx::new(&mut self.diagnostics, &mut self.enums, decl.span.clone());
        let mut cursor = Cursor::new(decl.args);

        let ret = parse_type(&mut ctx, &mut cursor)?;
        let base_name = parse_base_name(&mut ctx, &mut cursor)?;
        let proto = parse_prototype(&mut ctx, &mut cursor, ret, base_name, "")?;

        self.define(&proto.name, &decl.span)?;
        self.push(StanzaBody::Function(proto), decl);
        Ok(())
    }

    fn object(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let module_name = self.module_name();
        let mut ctx = ParseCtx::new(&mut self.diagnostics, &mut self.enums, decl.span.clone());
        let mut cursor = Cursor::new(decl.args);

        let null_ok = cursor.peek().is_some_and(|t| t.text == "NULL_OK");
        if null_ok {
            cursor.bump();
        }

        let base_name = parse_base_name(&mut ctx, &mut cursor)?;
        // `foo.new(...)` spells the constructor of object `foo`.
        let base_name = base_name.strip_suffix(".new").unwrap_or(base_name);
        let constructor = parse_prototype(&mut ctx, &mut cursor, TypeSpec::void(), base_name, "")?;

        let handle = object_handle(&module_name, &constructor.name);
        let init = constructor.derive(
            format!("{}__init", constructor.name),
            true,
            vec![format!("{handle} **"), "const char *".to_string()],
        );
        let mut fini = constructor.derive(
            format!("{}__fini", constructor.name),
            false,
            vec![format!("{handle} **")],
        );
        fini.args.clear();
        fini.argstruct = false;

        self.define(&constructor.name, &decl.span)?;
        let object = Object {
            constructor,
            init,
            fini,
            null_ok,
            methods: Vec::new(),
        };
        self.open_object = Some(self.stanzas.len());
        self.push(StanzaBody::Object(object), decl);
        Ok(())
    }

    fn method(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let Some(index) = self.open_object else {
            return Err(self.fail(DiagnosticKind::MethodOutsideObject, decl.span, None));
        };
        let Some(object_name) = self.stanzas[index].prototype().map(|p| p.name.clone()) else {
            return Err(self.fail(DiagnosticKind::MethodOutsideObject, decl.span, None));
        };
        let handle = object_handle(&self.module_name(), &object_name);

        let mut ctx = ParseCtx::new(&mut self.diagnostics, &mut self.enums, decl.span.clone());
        let mut cursor = Cursor::new(decl.args);

        let ret = parse_type(&mut ctx, &mut cursor)?;
        let base_name = parse_base_name(&mut ctx, &mut cursor)?;
        // `obj.method` is accepted for the open object and read as `.method`.
        let base_name = match base_name.strip_prefix(object_name.as_str()) {
            Some(rest) if rest.starts_with('.') => rest,
            _ => base_name,
        };
        let mut proto = parse_prototype(&mut ctx, &mut cursor, ret, base_name, &object_name)?;
        if !proto.base_name.starts_with('.') {
            return Err(ctx.fail(DiagnosticKind::MethodName, &proto.base_name));
        }
        proto.implicit = vec![format!("{handle} *")];

        let StanzaBody::Object(object) = &mut self.stanzas[index].body else {
            return Err(self.fail(DiagnosticKind::MethodOutsideObject, decl.span, None));
        };
        if object.method(&proto.name).is_some() {
            let name = proto.name;
            return Err(self.fail(DiagnosticKind::DuplicateSymbol, decl.span, Some(&name)));
        }
        object.methods.push(Method {
            proto,
            doc: decl.doc,
            span: decl.span,
        });
        Ok(())
    }

    fn alias(&mut self, decl: Decl<'_, '_>) -> PResult<()> {
        let [name, target] = decl.args else {
            return Err(self.fail(
                DiagnosticKind::StanzaSyntax,
                decl.span,
                Some("expected `$Alias <alias> <symbol>`"),
            ));
        };

        let mut ctx = ParseCtx::new(&mut self.diagnostics, &mut self.enums, decl.span.clone());
        let resolved = alias::resolve(&mut ctx, &self.stanzas, &self.symbols, name.text, target.text)?;

        self.push(StanzaBody::Alias(resolved), decl);
        Ok(())
    }

    fn push(&mut self, body: StanzaBody, decl: Decl<'_, '_>) {
        self.stanzas.push(Stanza {
            body,
            doc: decl.doc,
            span: decl.span,
        });
    }

    /// Registers a function or object name for the stanza about to be pushed.
    fn define(&mut self, name: &str, span: &Span) -> PResult<()> {
        if self.symbols.contains_key(name) {
            return Err(self.fail(DiagnosticKind::DuplicateSymbol, span.clone(), Some(name)));
        }
        self.symbols.insert(name.to_string(), self.stanzas.len());
        Ok(())
    }

    fn check_setting(&mut self, decl: &Decl<'_, '_>, seen: bool, duplicate: DiagnosticKind) -> PResult<()> {
        if seen {
            return Err(self.fail(duplicate, decl.span.clone(), None));
        }
        if self.settings_closed {
            return Err(self.fail(
                DiagnosticKind::LateSetting,
                decl.span.clone(),
                Some(&format!("`${}` is too late", decl.kind.keyword())),
            ));
        }
        Ok(())
    }

    fn module_name(&self) -> String {
        self.header.as_ref().map(|h| h.name.clone()).unwrap_or_default()
    }

    fn syntax(&mut self, decl: &Decl<'_, '_>) -> Fatal {
        let detail = format!("should be `{}`, is `{}`", decl.kind.usage(), decl.line);
        self.fail(DiagnosticKind::StanzaSyntax, decl.span.clone(), Some(&detail))
    }

    fn fail(&mut self, kind: DiagnosticKind, span: Span, detail: Option<&str>) -> Fatal {
        let _ = report(&mut self.diagnostics, kind, span, detail);
        Fatal
    }
}

/// One declaration on its way to a handler.
struct Decl<'t, 's> {
    kind: StanzaKind,
    args: &'t [Token<'s>],
    line: &'t str,
    doc: Vec<String>,
    span: Span,
}

/// Native struct type of an object instance.
fn object_handle(module: &str, object: &str) -> String {
    format!("struct VPFX({module}_{object})")
}

fn join_tokens(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect::<Vec<_>>().join(" ")
}
