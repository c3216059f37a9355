//! Native header: macros, ENUM declarations and one prototype per entity.

use super::native::{self, Flavor};
use super::{Artifact, EmitConfig};
use crate::module::Module;

pub fn emit_header(module: &Module, config: &EmitConfig) -> Artifact {
    Artifact::new(config.header_path(), HeaderEmitter::new(module, config).emit())
}

struct HeaderEmitter<'a> {
    module: &'a Module,
    config: &'a EmitConfig,
    output: String,
}

impl<'a> HeaderEmitter<'a> {
    fn new(module: &'a Module, config: &'a EmitConfig) -> Self {
        Self {
            module,
            config,
            output: String::new(),
        }
    }

    fn emit(mut self) -> String {
        self.output.push_str(&native::c_banner(self.config.input()));
        for (guard, header) in [("VDEF_H_INCLUDED", "vdef.h"), ("VRT_H_INCLUDED", "vrt.h")] {
            self.output.push_str(&format!(
                "#ifndef {guard}\n#  error \"Include {header} first\"\n#endif\n"
            ));
        }
        self.output.push('\n');

        self.output.push_str(&native::macro_definitions(self.module));
        self.emit_enums();

        for stanza in self.module.stanzas() {
            self.output
                .push_str(&native::stanza_prototypes(self.module, stanza, Flavor::Header));
        }
        self.output
    }

    fn emit_enums(&mut self) {
        let enums = self.module.enums();
        for value in enums {
            self.output
                .push_str(&format!("extern VCL_ENUM VENUM({value});\n"));
        }
        self.output.push('\n');

        let prefix = self.module.symbol_prefix();
        let name = self.module.name();
        for value in enums {
            for code in [14, 759, 765] {
                self.output.push_str(&format!(
                    "//lint -esym({code}, enum_{prefix}{name}_{value})\n"
                ));
            }
        }
        self.output.push('\n');
    }
}
