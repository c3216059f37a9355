//! Native text shared by the header, the source and the protocol blob.

use vmodc_core::text::{expanded_len, wrap_prototype};

use crate::module::{Module, Object, Stanza, StanzaBody};
use crate::proto::Prototype;

/// Column width native prototypes are wrapped at.
pub(crate) const PROTOTYPE_WIDTH: usize = 64;

/// Column the second cell of a struct line is aligned to.
const STRUCT_COLUMN: usize = 40;

/// Which rendering of the prototypes a caller needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// Argument structs and real prototypes, for the public header.
    Header,
    /// Function-pointer typedefs only, for the source file.
    Typedef,
    /// Argument structs and typedefs, for the prototypes embedded in the protocol.
    Protocol,
}

/// "Generated file" banner in the comment syntax of the target language.
pub(crate) fn banner(input: &str, open: &str, middle: &str, close: &str) -> String {
    format!(
        "{open}\n{middle} NB:  This file is machine generated, DO NOT EDIT!\n{middle}\n{middle} Edit {input} and run make instead\n{close}\n\n"
    )
}

pub(crate) fn c_banner(input: &str) -> String {
    banner(input, "/*", " *", " */")
}

pub(crate) fn rst_banner(input: &str) -> String {
    banner(input, "..", "..", "..")
}

/// `VPFX`/`VARGS`/`VENUM` helper macros and their lint suppressions.
pub(crate) fn macro_definitions(module: &Module) -> String {
    let prefix = module.symbol_prefix();
    let name = module.name();

    let mut out = format!("#define VPFX(a) {prefix}##a\n");
    out.push_str(&format!("#define VARGS(a) arg_{prefix}{name}_##a\n"));
    out.push_str(&format!("#define VENUM(a) enum_{prefix}{name}_##a\n"));
    for macro_name in ["VPFX", "VARGS", "VENUM"] {
        for code in [755, 767] {
            out.push_str(&format!("//lint -esym({code}, {macro_name})\n"));
        }
    }
    out.push_str("//lint -esym(755, VARGS)\n");
    out.push_str("//lint -esym(755, VENUM)\n");
    out.push('\n');
    out
}

/// One tab-aligned line of a struct body or initializer.
pub(crate) fn struct_line(left: &str, right: &str) -> String {
    let mut line = format!("\t{left}");
    if expanded_len(&line) > STRUCT_COLUMN {
        line.push_str("\n\t\t\t\t\t");
    } else {
        line.push('\t');
    }
    while expanded_len(&line) < STRUCT_COLUMN {
        line.push('\t');
    }
    line.push_str(right);
    line.push('\n');
    line
}

/// Argument struct of a prototype with optional arguments.
///
/// Validity flags for the optional arguments come first, then every argument
/// in declaration order.
pub(crate) fn argument_struct(proto: &Prototype) -> String {
    let mut out = format!("\n{} {{\n", proto.argstruct_name());
    for arg in proto.args.iter().filter(|a| a.optional) {
        out.push_str(&format!("\tchar\t\t\tvalid_{};\n", arg.slot));
    }
    for arg in &proto.args {
        let c_type = arg.ty.c_type();
        out.push('\t');
        out.push_str(c_type);
        if c_type.len() < 8 {
            out.push('\t');
        }
        if c_type.len() < 16 {
            out.push('\t');
        }
        out.push_str(&format!("\t{};\n", arg.slot));
    }
    out.push_str("};\n");
    out
}

/// Exported native symbol of a prototype: symbol prefix plus native name.
pub(crate) fn symbol(module: &Module, proto: &Prototype) -> String {
    format!("{}{}", module.symbol_prefix(), proto.native_name())
}

pub(crate) fn typedef_name(module: &Module, proto: &Prototype) -> String {
    format!(
        "td_{}{}_{}",
        module.symbol_prefix(),
        module.name(),
        proto.native_name()
    )
}

/// Name of the native struct behind an object's handle.
pub(crate) fn object_struct(module: &Module, object: &Object) -> String {
    format!("VPFX({}_{})", module.name(), object.name())
}

pub(crate) fn prototype(module: &Module, proto: &Prototype, flavor: Flavor) -> String {
    let mut out = String::new();
    if proto.argstruct && flavor != Flavor::Typedef {
        out.push_str(&argument_struct(proto));
    }
    let declaration = match flavor {
        Flavor::Header => proto.declaration(&symbol(module, proto)),
        Flavor::Typedef | Flavor::Protocol => {
            format!("typedef {}", proto.declaration(&typedef_name(module, proto)))
        }
    };
    out.push_str(&wrap_prototype(&declaration, PROTOTYPE_WIDTH));
    out
}

/// Native declarations contributed by one stanza.
pub(crate) fn stanza_prototypes(module: &Module, stanza: &Stanza, flavor: Flavor) -> String {
    match &stanza.body {
        StanzaBody::Event(event) if flavor == Flavor::Header => {
            format!("vmod_event_f VPFX({});\n", event.function)
        }
        StanzaBody::Function(proto) => prototype(module, proto, flavor),
        StanzaBody::Object(object) => {
            let mut out = format!("struct {};\n", object_struct(module, object));
            out.push_str(&prototype(module, &object.init, flavor));
            out.push_str(&prototype(module, &object.fini, flavor));
            for method in &object.methods {
                out.push_str(&prototype(module, &method.proto, flavor));
            }
            out.push('\n');
            out
        }
        _ => String::new(),
    }
}

/// Function table: either the struct definition or its initializer.
fn table_fields(module: &Module, define: bool) -> String {
    let field = |proto: &Prototype| {
        if define {
            struct_line(
                &typedef_name(module, proto),
                &format!("*{};", proto.native_name()),
            )
        } else {
            struct_line(
                &format!(".{} =", proto.native_name()),
                &format!("{},", symbol(module, proto)),
            )
        }
    };

    let mut out = String::new();
    for stanza in module.stanzas() {
        match &stanza.body {
            StanzaBody::Function(proto) => out.push_str(&field(proto)),
            StanzaBody::Object(object) => {
                out.push_str(&field(&object.init));
                out.push_str(&field(&object.fini));
                for method in &object.methods {
                    out.push_str(&field(&method.proto));
                }
                out.push('\n');
            }
            StanzaBody::Event(event) => {
                if define {
                    out.push_str(&struct_line("vmod_event_f", "*_event;"));
                } else {
                    out.push_str(&struct_line(
                        "._event =",
                        &format!("{}{},", module.symbol_prefix(), event.function),
                    ));
                }
            }
            _ => {}
        }
    }
    out
}

pub(crate) fn table_definition(module: &Module) -> String {
    let mut out = format!("\nstruct {} {{\n", module.table_name());
    out.push_str(&table_fields(module, true));
    for value in module.enums() {
        out.push_str(&struct_line("VCL_ENUM", &format!("*enum_{value};")));
    }
    out.push_str("};\n");
    out
}

pub(crate) fn table_initializer(module: &Module) -> String {
    let table = module.table_name();
    let mut out = format!("\nstatic const struct {table} {table} = {{\n");
    out.push_str(&table_fields(module, false));
    out.push('\n');
    for value in module.enums() {
        out.push_str(&struct_line(
            &format!(".enum_{value} ="),
            &format!("&VENUM({value}),"),
        ));
    }
    out.push_str("};\n");
    out
}

/// Prototype text embedded in the protocol blob, one entry per line.
pub(crate) fn protocol_prototypes(module: &Module) -> Vec<String> {
    let mut text = macro_definitions(module);
    for stanza in module.stanzas() {
        if matches!(stanza.body, StanzaBody::Object(_)) {
            text.push_str(&stanza_prototypes(module, stanza, Flavor::Protocol));
        }
    }
    text.push_str("/* Functions */\n");
    for stanza in module.stanzas() {
        if matches!(stanza.body, StanzaBody::Function(_)) {
            text.push_str(&stanza_prototypes(module, stanza, Flavor::Protocol));
        }
    }
    text.push_str(&table_definition(module));
    text.push_str("#undef VPFX\n#undef VARGS\n#undef VENUM\n");

    text.lines().map(|line| line.trim_end().to_string()).collect()
}
