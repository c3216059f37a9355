//! JSON description of a module, as read by the VCL compiler.
//!
//! The document is an array of entries. The first two describe the module
//! itself and the native prototypes; the rest follow declaration order.
//!
//! ```text
//! [["$VMOD", "1.0", name, table, fingerprint],
//!  ["$CPROTO", line, ..., "static struct <table> <table>;"],
//!  ["$EVENT", "<table>._event"],
//!  ["$FUNC", name, proto],
//!  ["$OBJ", name, {"NULL_OK": b}, "struct ...", ["$INIT", proto], ["$FINI", proto], ["$METHOD", name, proto]...],
//!  ["$ALIAS", alias, target]]
//! ```
//!
//! Three fields of the `$VMOD` entry are only known when the native code is
//! compiled: the ABI version string and the VRT major/minor version. They are
//! kept out of the JSON value as a [`LateBound`] slot.

use std::fmt;

use serde_json::{Value, json};

use super::native;
use crate::module::{AbiMode, Module, StanzaBody};
use crate::proto::Prototype;

/// Version of the entry layout.
pub const FORMAT_VERSION: &str = "1.0";

/// Native symbol holding the ABI version string.
pub const ABI_SYMBOL: &str = "VMOD_ABI_Version";

/// A VRT version component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionField {
    Literal(u32),
    /// Native macro resolved by the C compiler.
    Symbolic(&'static str),
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(n) => write!(f, "{n}"),
            Self::Symbolic(name) => f.write_str(name),
        }
    }
}

/// Fields appended to the `$VMOD` entry at native compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LateBound {
    pub abi_symbol: &'static str,
    pub major: VersionField,
    pub minor: VersionField,
}

impl LateBound {
    pub fn for_mode(abi: AbiMode) -> Self {
        let (major, minor) = match abi {
            AbiMode::Strict => (VersionField::Literal(0), VersionField::Literal(0)),
            AbiMode::Vrt => (
                VersionField::Symbolic("VRT_MAJOR_VERSION"),
                VersionField::Symbolic("VRT_MINOR_VERSION"),
            ),
        };
        Self {
            abi_symbol: ABI_SYMBOL,
            major,
            minor,
        }
    }
}

/// Concrete values for the late-bound fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiBinding {
    pub abi: String,
    pub major: u32,
    pub minor: u32,
}

impl AbiBinding {
    pub fn new(abi: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            abi: abi.into(),
            major,
            minor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    header: Vec<Value>,
    prototypes: Vec<String>,
    entries: Vec<Value>,
    late: LateBound,
}

impl Protocol {
    pub fn build(module: &Module) -> Self {
        let table = module.table_name();
        let header = vec![
            json!("$VMOD"),
            json!(FORMAT_VERSION),
            json!(module.name()),
            json!(table),
            json!(module.fingerprint().as_str()),
        ];

        let mut prototypes = native::protocol_prototypes(module);
        prototypes.push(format!("static struct {table} {table};"));

        let mut entries = Vec::new();
        for stanza in module.stanzas() {
            match &stanza.body {
                StanzaBody::Event(_) => {
                    entries.push(json!(["$EVENT", format!("{table}._event")]));
                }
                StanzaBody::Function(proto) => {
                    entries.push(json!([
                        "$FUNC",
                        proto.name,
                        prototype(module, proto, &proto.native_name())
                    ]));
                }
                StanzaBody::Object(object) => {
                    let mut entry = vec![
                        json!("$OBJ"),
                        json!(object.name()),
                        json!({ "NULL_OK": object.null_ok }),
                        json!(format!(
                            "struct {}{}_{}",
                            module.symbol_prefix(),
                            module.name(),
                            object.name()
                        )),
                        json!(["$INIT", prototype(module, &object.init, &object.init.name)]),
                        json!(["$FINI", prototype(module, &object.fini, &object.fini.name)]),
                    ];
                    for method in &object.methods {
                        entry.push(json!([
                            "$METHOD",
                            method.short_name(),
                            prototype(module, &method.proto, &method.proto.native_name())
                        ]));
                    }
                    entries.push(Value::Array(entry));
                }
                StanzaBody::Alias(alias) => {
                    entries.push(json!(["$ALIAS", alias.alias, alias.target]));
                }
                StanzaBody::Module
                | StanzaBody::Prefix(_)
                | StanzaBody::Abi(_)
                | StanzaBody::Synopsis(_) => {}
            }
        }

        Self {
            header,
            prototypes,
            entries,
            late: LateBound::for_mode(module.abi()),
        }
    }

    pub fn late_bound(&self) -> &LateBound {
        &self.late
    }

    /// Declaration entries, after `$VMOD` and `$CPROTO`.
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Lines of the `$CPROTO` entry.
    pub fn prototypes(&self) -> &[String] {
        &self.prototypes
    }

    /// The document without the late-bound fields.
    pub fn to_value(&self) -> Value {
        self.document(self.header.clone())
    }

    /// The document with the late-bound fields filled in from `binding`.
    ///
    /// Literal version fields keep their value; symbolic ones take the binding's.
    pub fn resolve(&self, binding: &AbiBinding) -> Value {
        let pick = |field: &VersionField, bound: u32| match field {
            VersionField::Literal(n) => *n,
            VersionField::Symbolic(_) => bound,
        };
        let mut header = self.header.clone();
        header.push(json!(binding.abi));
        header.push(json!(pick(&self.late.major, binding.major).to_string()));
        header.push(json!(pick(&self.late.minor, binding.minor).to_string()));
        self.document(header)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> String {
        to_pretty(&self.to_value())
    }

    /// Line of [`Protocol::to_json`] holding the last `$VMOD` field; the
    /// late-bound fields are spliced in right after it.
    pub fn splice_line(&self) -> usize {
        1 + self.header.len()
    }

    fn document(&self, header: Vec<Value>) -> Value {
        let mut cproto = vec![json!("$CPROTO")];
        cproto.extend(self.prototypes.iter().map(|line| json!(line)));

        let mut document = vec![Value::Array(header), Value::Array(cproto)];
        document.extend(self.entries.iter().cloned());
        Value::Array(document)
    }
}

pub(crate) fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("JSON values always serialize")
}

/// `[[RET], "<table>.<cfunc>", argstruct, args...]`
fn prototype(module: &Module, proto: &Prototype, cfunc: &str) -> Value {
    let argstruct = if proto.argstruct {
        format!(
            "struct arg_{}{}_{}",
            module.symbol_prefix(),
            module.name(),
            proto.native_name()
        )
    } else {
        String::new()
    };

    let mut out = vec![
        json!([proto.ret.kind]),
        json!(format!("{}.{}", module.table_name(), cfunc)),
        json!(argstruct),
    ];
    out.extend(proto.args.iter().map(|arg| arg.to_json()));
    Value::Array(out)
}
