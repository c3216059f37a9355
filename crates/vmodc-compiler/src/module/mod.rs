//! Symbol table: the ordered declarations of one interface description.
//!
//! A [`ModuleBuilder`] consumes declarations one at a time and is frozen
//! into an immutable [`Module`] that the generators read.

mod alias;
mod builder;
mod fingerprint;

#[cfg(test)]
mod alias_tests;

use std::collections::BTreeSet;

use indexmap::IndexMap;

pub use builder::{ModuleBuilder, ParseOptions, parse};
pub use fingerprint::Fingerprint;

use crate::diagnostics::Span;
use crate::proto::Prototype;

/// Declaration keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StanzaKind {
    Module,
    Prefix,
    Abi,
    Synopsis,
    Event,
    Function,
    Object,
    Method,
    Alias,
}

impl StanzaKind {
    pub const ALL: [StanzaKind; 9] = [
        Self::Module,
        Self::Prefix,
        Self::Abi,
        Self::Synopsis,
        Self::Event,
        Self::Function,
        Self::Object,
        Self::Method,
        Self::Alias,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::Prefix => "Prefix",
            Self::Abi => "ABI",
            Self::Synopsis => "Synopsis",
            Self::Event => "Event",
            Self::Function => "Function",
            Self::Object => "Object",
            Self::Method => "Method",
            Self::Alias => "Alias",
        }
    }

    /// Expected shape, shown with syntax errors.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Module => "$Module modname man_section description ...",
            Self::Prefix => "$Prefix symbol",
            Self::Abi => "$ABI [strict|vrt]",
            Self::Synopsis => "$Synopsis [auto|manual]",
            Self::Event => "$Event function_name",
            Self::Function => "$Function TYPE name ( ARGUMENTS )",
            Self::Object => "$Object [NULL_OK] class ( ARGUMENTS )",
            Self::Method => "$Method TYPE .method ( ARGUMENTS )",
            Self::Alias => "$Alias <alias> <symbol>",
        }
    }

    /// Declarations after which module settings are frozen.
    pub fn closes_settings(self) -> bool {
        matches!(
            self,
            Self::Event | Self::Function | Self::Object | Self::Method | Self::Alias
        )
    }
}

/// How the module descriptor advertises the runtime ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbiMode {
    /// Bound to the exact ABI of the build; version fields are literal zeros.
    #[default]
    Strict,
    /// Bound to the VRT API; version fields come from the runtime headers.
    Vrt,
}

impl AbiMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "strict" => Some(Self::Strict),
            "vrt" => Some(Self::Vrt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynopsisMode {
    #[default]
    Auto,
    Manual,
}

impl SynopsisMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "auto" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub function: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub proto: Prototype,
    pub doc: Vec<String>,
    pub span: Span,
}

impl Method {
    /// Name without the object prefix or leading dot.
    pub fn short_name(&self) -> &str {
        self.proto.base_name.trim_start_matches('.')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    /// Constructor as declared; its name is the object name.
    pub constructor: Prototype,
    pub init: Prototype,
    pub fini: Prototype,
    pub null_ok: bool,
    pub methods: Vec<Method>,
}

impl Object {
    pub fn name(&self) -> &str {
        &self.constructor.name
    }

    /// VCL variable the documentation binds instances to.
    pub fn instance_var(&self) -> String {
        format!("x{}", self.name())
    }

    /// Method by qualified name, `obj.method`.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.proto.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Alias as registered, `obj.old` for method aliases.
    pub alias: String,
    /// Canonical symbol it stands for.
    pub target: String,
    /// Documentation spelling of the alias.
    pub doc_alias: String,
    /// Documentation spelling of the target.
    pub doc_target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StanzaBody {
    Module,
    Prefix(String),
    Abi(AbiMode),
    Synopsis(SynopsisMode),
    Event(Event),
    Function(Prototype),
    Object(Object),
    Alias(Alias),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    pub body: StanzaBody,
    pub doc: Vec<String>,
    pub span: Span,
}

impl Stanza {
    pub fn kind(&self) -> StanzaKind {
        match self.body {
            StanzaBody::Module => StanzaKind::Module,
            StanzaBody::Prefix(_) => StanzaKind::Prefix,
            StanzaBody::Abi(_) => StanzaKind::Abi,
            StanzaBody::Synopsis(_) => StanzaKind::Synopsis,
            StanzaBody::Event(_) => StanzaKind::Event,
            StanzaBody::Function(_) => StanzaKind::Function,
            StanzaBody::Object(_) => StanzaKind::Object,
            StanzaBody::Alias(_) => StanzaKind::Alias,
        }
    }

    /// Top-level prototype: the function, or the object constructor.
    pub fn prototype(&self) -> Option<&Prototype> {
        match &self.body {
            StanzaBody::Function(proto) => Some(proto),
            StanzaBody::Object(object) => Some(&object.constructor),
            _ => None,
        }
    }
}

/// Frozen result of parsing one interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub(crate) name: String,
    pub(crate) man_section: String,
    pub(crate) description: String,
    pub(crate) symbol_prefix: String,
    pub(crate) abi: AbiMode,
    pub(crate) synopsis: SynopsisMode,
    pub(crate) stanzas: Vec<Stanza>,
    pub(crate) symbols: IndexMap<String, usize>,
    pub(crate) enums: BTreeSet<String>,
    pub(crate) fingerprint: Fingerprint,
    pub(crate) preamble: String,
}

impl Module {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn man_section(&self) -> &str {
        &self.man_section
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Native symbol prefix, `vmod_` unless overridden.
    pub fn symbol_prefix(&self) -> &str {
        &self.symbol_prefix
    }

    pub fn abi(&self) -> AbiMode {
        self.abi
    }

    pub fn synopsis(&self) -> SynopsisMode {
        self.synopsis
    }

    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    /// Every ENUM literal used anywhere, sorted.
    pub fn enums(&self) -> &BTreeSet<String> {
        &self.enums
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Text before the first declaration, usually the copyright block.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Name of the native function table, `Vmod_<prefix><name>_Func`.
    pub fn table_name(&self) -> String {
        format!("Vmod_{}{}_Func", self.symbol_prefix, self.name)
    }

    /// Name of the exported module descriptor, `Vmod_<name>_Data`.
    pub fn descriptor_name(&self) -> String {
        format!("Vmod_{}_Data", self.name)
    }

    /// Function or object by name.
    pub fn symbol(&self, name: &str) -> Option<&Stanza> {
        self.symbols.get(name).map(|&i| &self.stanzas[i])
    }

    /// Names of functions and objects in declaration order.
    pub fn symbol_names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Prototype> {
        self.stanzas.iter().filter_map(|s| match &s.body {
            StanzaBody::Function(proto) => Some(proto),
            _ => None,
        })
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.stanzas.iter().filter_map(|s| match &s.body {
            StanzaBody::Object(object) => Some(object),
            _ => None,
        })
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.stanzas.iter().filter_map(|s| match &s.body {
            StanzaBody::Alias(alias) => Some(alias),
            _ => None,
        })
    }
}
