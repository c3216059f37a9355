//! Automake fragment that builds and cleans one module.

use std::fs;
use std::io;
use std::path::Path;

use super::{Artifact, EmitConfig};
use crate::module::Module;

/// Placeholders: `XXX` module name, `VCC` input file name, `PFX` output
/// prefix, `SRC` hand-written sources.
const TEMPLATE: &str = "\
# Generated by vmodc generate --boilerplate.

vmod_LTLIBRARIES += libvmod_XXX.la

libvmod_XXX_la_SOURCES = \\
\tSRC

libvmod_XXX_la_CFLAGS =

vmodcargs_XXX ?= --strict --boilerplate -o PFX
vmod_XXX_symbols_regex ?= Vmod_XXX_Data

libvmod_XXX_la_LDFLAGS = \\
\t-export-symbols-regex $(vmod_XXX_symbols_regex) \\
\t$(AM_LDFLAGS) \\
\t$(VMOD_LDFLAGS)

nodist_libvmod_XXX_la_SOURCES = PFX.c PFX.h

EXTRA_libvmod_XXX_la_DEPENDENCIES = $(nodist_libvmod_XXX_la_SOURCES)

EXTRA_DIST += $(srcdir)/VCC automake_boilerplate_XXX.am

$(libvmod_XXX_la_OBJECTS): PFX.h

PFX.h vmod_XXX.rst vmod_XXX.man.rst: PFX.c

PFX.c: $(VMODC) $(srcdir)/VCC
\t$(VMODC) generate $(vmodcargs_XXX) $(srcdir)/VCC

clean-local: clean-vmod-XXX

clean-vmod-XXX:
\trm -f $(nodist_libvmod_XXX_la_SOURCES)
\trm -f vmod_XXX.rst vmod_XXX.man.rst
";

/// Hand-written sources of `module` in `dir`: `vmod_<name>*.c` and `.h`, sorted.
pub fn discover_sources(dir: &Path, module: &Module) -> io::Result<Vec<String>> {
    let stem = format!("vmod_{}", module.name());
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(&stem) && (name.ends_with(".c") || name.ends_with(".h")) {
            sources.push(name.to_string());
        }
    }
    sources.sort();
    Ok(sources)
}

pub fn emit_boilerplate(module: &Module, config: &EmitConfig, sources: &[String]) -> Artifact {
    let input = Path::new(config.input())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.input().to_string());

    let contents = TEMPLATE
        .replace("XXX", module.name())
        .replace("VCC", &input)
        .replace("PFX", config.prefix())
        .replace("SRC", &sources.join(" \\\n\t"));

    Artifact::new(
        format!("automake_boilerplate_{}.am", module.name()),
        contents,
    )
}
