//! Native source: ENUM definitions, the function table, the embedded
//! protocol blob and the exported module descriptor.

use super::native::{self, Flavor};
use super::protocol::Protocol;
use super::{Artifact, EmitConfig};
use crate::module::{Module, StanzaBody};

pub fn emit_source(module: &Module, config: &EmitConfig, protocol: &Protocol) -> Artifact {
    Artifact::new(
        config.source_path(),
        SourceEmitter::new(module, config, protocol).emit(),
    )
}

struct SourceEmitter<'a> {
    module: &'a Module,
    config: &'a EmitConfig,
    protocol: &'a Protocol,
    output: String,
}

impl<'a> SourceEmitter<'a> {
    fn new(module: &'a Module, config: &'a EmitConfig, protocol: &'a Protocol) -> Self {
        Self {
            module,
            config,
            protocol,
            output: String::new(),
        }
    }

    fn emit(mut self) -> String {
        self.output.push_str(&native::c_banner(self.config.input()));
        self.output.push_str("#include \"config.h\"\n");
        for include in ["vdef", "vrt", self.config.prefix(), "vmod_abi"] {
            self.output.push_str(&format!("#include \"{include}.h\"\n"));
        }
        self.output.push('\n');

        for value in self.module.enums() {
            self.output
                .push_str(&format!("VCL_ENUM VENUM({value}) = \"{value}\";\n"));
        }
        self.output.push('\n');

        self.emit_typedefs();

        self.output.push_str(&native::table_definition(self.module));
        self.output.push_str(&format!(
            "\n/*lint -esym(754, {}::*) */\n",
            self.module.table_name()
        ));
        self.output.push_str(&native::table_initializer(self.module));

        self.emit_protocol();
        self.emit_descriptor();
        self.output
    }

    /// Objects first, then functions.
    fn emit_typedefs(&mut self) {
        let stanzas = self.module.stanzas();
        let objects = stanzas
            .iter()
            .filter(|s| matches!(s.body, StanzaBody::Object(_)));
        let functions = stanzas
            .iter()
            .filter(|s| matches!(s.body, StanzaBody::Function(_)));
        for stanza in objects.chain(functions) {
            self.output
                .push_str(&native::stanza_prototypes(self.module, stanza, Flavor::Typedef));
        }
    }

    /// Protocol JSON as a C string with the late-bound fields spliced in.
    fn emit_protocol(&mut self) {
        let late = self.protocol.late_bound();
        let splice = self.protocol.splice_line();

        self.output.push_str("#define STRINGIFY3(arg) #arg\n");
        self.output.push_str("#define STRINGIFY2(arg) STRINGIFY3(#arg)\n");
        self.output.push_str("#define STRINGIFY1(arg) STRINGIFY2(arg)\n");
        self.output.push_str("\nstatic const char Vmod_Json[] = {\n");
        self.output.push_str("\t\"VMOD_JSON_SPEC\x02\"\n");

        for (n, line) in self.protocol.to_json().lines().enumerate() {
            self.output.push_str("\t\"");
            for c in line.chars().chain(std::iter::once(' ')) {
                if c == '"' || c == '\\' {
                    self.output.push('\\');
                }
                self.output.push(c);
            }
            if n == splice {
                self.output.push_str(&format!(
                    ",\"\n\t\"    \\\"\" {} \"\\\", \"\n",
                    late.abi_symbol
                ));
                self.output
                    .push_str(&format!("\t    STRINGIFY1({}) \", \"\n", late.major));
                self.output
                    .push_str(&format!("\t    STRINGIFY1({})\n", late.minor));
            } else {
                self.output.push_str("\"\n");
            }
        }
        self.output.push_str("\t\"\\n\\x03\"\n};\n");
        self.output.push_str("#undef STRINGIFY\n");
    }

    fn emit_descriptor(&mut self) {
        let late = self.protocol.late_bound();
        let descriptor = self.module.descriptor_name();
        let table = self.module.table_name();

        self.output.push('\n');
        for code in [714, 759, 765] {
            self.output
                .push_str(&format!("/*lint -esym({code}, {descriptor}) */\n"));
        }
        self.output
            .push_str(&format!("\nextern const struct vmod_data {descriptor};\n"));
        self.output
            .push_str(&format!("\nconst struct vmod_data {descriptor} = {{\n"));
        self.output
            .push_str(&format!("\t.vrt_major =\t{},\n", late.major));
        self.output
            .push_str(&format!("\t.vrt_minor =\t{},\n", late.minor));
        self.output
            .push_str(&format!("\t.name =\t\t\"{}\",\n", self.module.name()));
        self.output.push_str(&format!("\t.func =\t\t&{table},\n"));
        self.output
            .push_str(&format!("\t.func_len =\tsizeof({table}),\n"));
        self.output
            .push_str(&format!("\t.func_name =\t\"{table}\",\n"));
        self.output.push_str("\t.json =\t\tVmod_Json,\n");
        self.output
            .push_str(&format!("\t.abi =\t\t{},\n", late.abi_symbol));
        self.output.push_str(&format!(
            "\t.file_id =\t\"{}\",\n",
            self.module.fingerprint()
        ));
        self.output.push_str("};\n");
    }
}
