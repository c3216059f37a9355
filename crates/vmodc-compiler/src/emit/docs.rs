//! reStructuredText documentation, in reference and man-page flavors.
//!
//! Both flavors walk the declarations in order. They differ in the module
//! heading and in the synopsis: the man page spells out every signature,
//! the reference links to the per-entity sections instead.

use vmodc_core::text::rst_header;

use super::native;
use super::{Artifact, EmitConfig};
use crate::module::{Module, Object, Stanza, StanzaBody, SynopsisMode};
use crate::proto::Prototype;

/// Signatures longer than this get a terse title plus a literal block.
const TITLE_WIDTH: usize = 60;

/// Signatures longer than this put one argument per line.
const SIGNATURE_WIDTH: usize = 68;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocFlavor {
    /// Cross-referenced page for the HTML manual.
    Reference,
    /// Standalone man page.
    Manual,
}

impl DocFlavor {
    /// Inserted between the module name and `.rst`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Reference => "",
            Self::Manual => ".man",
        }
    }

    pub fn is_manual(self) -> bool {
        self == Self::Manual
    }
}

pub fn emit_docs(module: &Module, config: &EmitConfig, flavor: DocFlavor) -> Artifact {
    Artifact::new(
        config.doc_path(module, flavor),
        DocsEmitter::new(module, config, flavor).emit(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Function,
    Constructor,
    Method,
}

/// VCL-facing signature of one callable.
struct Signature<'a> {
    module: &'a Module,
    proto: &'a Prototype,
    role: Role,
}

impl<'a> Signature<'a> {
    fn new(module: &'a Module, proto: &'a Prototype, role: Role) -> Self {
        Self {
            module,
            proto,
            role,
        }
    }

    /// Section label, also the target of `:ref:` links.
    fn label(&self) -> String {
        match self.role {
            Role::Method => format!("x{}()", self.proto.name),
            Role::Function | Role::Constructor => {
                format!("{}.{}()", self.module.name(), self.proto.name)
            }
        }
    }

    /// VCL spelling. Terse drops defaults and ENUM literal sets; `indent`
    /// is doubled for methods.
    fn vcl(&self, terse: bool, indent: &str) -> String {
        let indent = match self.role {
            Role::Method => indent.repeat(2),
            Role::Function | Role::Constructor => indent.to_string(),
        };
        let proto = self.proto;

        let mut out = indent.clone();
        match self.role {
            Role::Function => {
                out.push_str(&format!(
                    "{} {}.{}(",
                    proto.ret.vcl(false),
                    self.module.name(),
                    proto.name
                ));
            }
            Role::Constructor => {
                out.push_str(&format!(
                    "new x{} = {}.{}(",
                    proto.name,
                    self.module.name(),
                    proto.name
                ));
            }
            Role::Method => {
                let object = &proto.name[..proto.name.len() - proto.base_name.len()];
                out.push_str(&format!(
                    "{} x{object}{}(",
                    proto.ret.vcl(false),
                    proto.base_name
                ));
            }
        }

        let args: Vec<String> = proto.args.iter().filter_map(|a| a.vcl(terse)).collect();
        let width = out.chars().count()
            + args.iter().map(|a| a.chars().count()).sum::<usize>()
            + 2 * args.len().saturating_sub(1);
        if !terse && width > SIGNATURE_WIDTH {
            let step = indent.repeat(2);
            out.push('\n');
            out.push_str(&step);
            out.push_str(&args.join(&format!(",\n{step}")));
            out.push('\n');
            out.push_str(&indent);
            out.push(')');
        } else {
            out.push_str(&args.join(", "));
            out.push(')');
        }
        out
    }

    /// Section title, with the full signature as a literal block when too wide.
    fn rst(&self) -> String {
        let full = self.vcl(false, "");
        if full.chars().count() < TITLE_WIDTH {
            return rst_header(&full, '-', None);
        }
        let mut out = rst_header(&self.vcl(true, ""), '-', None);
        out.push_str("\n::\n\n");
        out.push_str(&self.vcl(false, "   "));
        out.push('\n');
        out
    }
}

struct DocsEmitter<'a> {
    module: &'a Module,
    config: &'a EmitConfig,
    flavor: DocFlavor,
    output: String,
}

impl<'a> DocsEmitter<'a> {
    fn new(module: &'a Module, config: &'a EmitConfig, flavor: DocFlavor) -> Self {
        Self {
            module,
            config,
            flavor,
            output: String::new(),
        }
    }

    fn emit(mut self) -> String {
        self.output.push_str(&native::rst_banner(self.config.input()));
        if self.flavor.is_manual() {
            self.output.push_str(".. role:: ref(emphasis)\n");
        } else {
            self.output.push_str("\n:tocdepth: 1\n");
        }

        for stanza in self.module.stanzas() {
            self.emit_stanza(stanza);
        }

        self.emit_copyright();
        self.output
    }

    fn emit_stanza(&mut self, stanza: &Stanza) {
        match &stanza.body {
            StanzaBody::Module => {
                self.emit_module_head();
                self.emit_doc(&stanza.doc);
            }
            StanzaBody::Event(_) => {}
            StanzaBody::Function(proto) => {
                self.emit_section(&Signature::new(self.module, proto, Role::Function));
                self.output.push('\n');
                self.emit_doc(&stanza.doc);
            }
            StanzaBody::Object(object) => self.emit_object(object, &stanza.doc),
            StanzaBody::Alias(alias) => {
                self.output.push_str(&rst_header(
                    &format!("ALIAS {}()", alias.doc_alias),
                    '-',
                    None,
                ));
                self.output.push_str(&format!(
                    "\nDeprecated alias for ``{}()``.",
                    alias.doc_target
                ));
                if !stanza.doc.is_empty() {
                    self.output.push_str("\n\n");
                }
                self.emit_doc(&stanza.doc);
            }
            StanzaBody::Prefix(_) | StanzaBody::Abi(_) | StanzaBody::Synopsis(_) => {
                self.emit_doc(&stanza.doc);
            }
        }
    }

    fn emit_module_head(&mut self) {
        let name = self.module.name();
        let description = self.module.description();

        if self.flavor.is_manual() {
            self.output
                .push_str(&rst_header(&format!("vmod_{name}"), '=', Some('=')));
            self.output.push_str(&rst_header(description, '-', Some('-')));
            self.output.push('\n');
            self.output.push_str(&format!(
                ":Manual section: {}\n",
                self.module.man_section()
            ));
        } else {
            self.emit_label(&format!("vmod_{name}(3)"));
            self.output.push_str(&rst_header(
                &format!("VMOD {name} - {description}"),
                '=',
                Some('='),
            ));
        }

        if self.module.synopsis() == SynopsisMode::Auto {
            self.emit_synopsis();
        }
    }

    fn emit_synopsis(&mut self) {
        self.output.push_str(&rst_header("SYNOPSIS", '=', None));
        self.output.push('\n');
        self.output.push_str(".. parsed-literal::\n\n");
        self.output.push_str(&format!(
            "  import {} [as name] [from \"path\"]\n",
            self.module.name()
        ));
        self.output.push_str("  \n");

        let manual = self.flavor.is_manual();
        for stanza in self.module.stanzas() {
            match &stanza.body {
                StanzaBody::Function(proto) => {
                    let sig = Signature::new(self.module, proto, Role::Function);
                    if manual {
                        self.output.push_str(&format!("{}\n  \n", sig.vcl(true, "  ")));
                    } else {
                        self.output
                            .push_str(&format!("  :ref:`{}`\n   \n", sig.label()));
                    }
                }
                StanzaBody::Object(object) => {
                    let sig = Signature::new(self.module, &object.constructor, Role::Constructor);
                    if manual {
                        self.output.push_str(&format!("{}\n  \n", sig.vcl(true, "  ")));
                    } else {
                        self.output
                            .push_str(&format!("  :ref:`{}`\n  \n", sig.label()));
                    }
                    for method in &object.methods {
                        let sig = Signature::new(self.module, &method.proto, Role::Method);
                        if manual {
                            self.output
                                .push_str(&format!("{}\n   \n", sig.vcl(true, "   ")));
                        } else {
                            self.output
                                .push_str(&format!("      :ref:`{}`\n  \n", sig.label()));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn emit_object(&mut self, object: &Object, doc: &[String]) {
        self.emit_section(&Signature::new(
            self.module,
            &object.constructor,
            Role::Constructor,
        ));
        self.output.push('\n');
        self.emit_doc(doc);

        for method in &object.methods {
            self.emit_section(&Signature::new(self.module, &method.proto, Role::Method));
            self.output.push('\n');
            self.emit_doc(&method.doc);
        }
    }

    fn emit_section(&mut self, sig: &Signature<'_>) {
        self.emit_label(&sig.label());
        self.output.push_str(&sig.rst());
    }

    fn emit_label(&mut self, label: &str) {
        self.output.push_str(&format!("\n.. _{label}:\n"));
    }

    fn emit_doc(&mut self, doc: &[String]) {
        self.output.push_str(&doc.join("\n"));
        self.output.push('\n');
    }

    fn emit_copyright(&mut self) {
        let preamble = self.module.preamble();
        if preamble.is_empty() {
            return;
        }
        self.output.push_str(&rst_header("COPYRIGHT", '=', None));
        self.output.push_str("\n::\n\n");

        let text = preamble.replace("\n#", "\n ");
        let text = text.strip_prefix("#\n").unwrap_or(&text);
        let text = text.strip_prefix("#-\n").unwrap_or(text);
        self.output.push_str(text);
        self.output.push('\n');
    }
}
