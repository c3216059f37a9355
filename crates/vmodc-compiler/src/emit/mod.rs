//! Generators for every artifact derived from a [`Module`].
//!
//! - `header` - native prototypes (`<prefix>.h`)
//! - `source` - dispatch table, protocol blob, module descriptor (`<prefix>.c`)
//! - `protocol` - JSON description of the module
//! - `docs` - reference and man-page reStructuredText
//! - `boilerplate` - automake fragment
//!
//! Generators only read the module; writing files is the job of [`crate::commit`].

mod boilerplate;
mod docs;
mod header;
mod native;
mod protocol;
mod source;

#[cfg(test)]
mod boilerplate_tests;
#[cfg(test)]
mod native_tests;
#[cfg(test)]
mod protocol_tests;

use std::path::{Path, PathBuf};

pub use boilerplate::{discover_sources, emit_boilerplate};
pub use docs::{DocFlavor, emit_docs};
pub use header::emit_header;
pub use protocol::{ABI_SYMBOL, AbiBinding, FORMAT_VERSION, LateBound, Protocol, VersionField};
pub use source::emit_source;

use crate::module::Module;

/// Where generated files go and how they refer to their input.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    output_prefix: String,
    doc_dir: PathBuf,
    input_name: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            output_prefix: "vcc_if".to_string(),
            doc_dir: PathBuf::from("."),
            input_name: "vmod.vcc".to_string(),
        }
    }
}

impl EmitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix of the native header and source, `vcc_if` by default.
    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Directory the documentation files are written to.
    pub fn doc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.doc_dir = dir.into();
        self
    }

    /// Input path as named in generated-file banners.
    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.output_prefix
    }

    pub fn docs(&self) -> &Path {
        &self.doc_dir
    }

    pub fn input(&self) -> &str {
        &self.input_name
    }

    pub fn header_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.h", self.output_prefix))
    }

    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.c", self.output_prefix))
    }

    pub fn doc_path(&self, module: &Module, flavor: DocFlavor) -> PathBuf {
        self.doc_dir
            .join(format!("vmod_{}{}.rst", module.name(), flavor.suffix()))
    }
}

/// One generated file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// The four artifacts every run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub reference: Artifact,
    pub manual: Artifact,
    pub header: Artifact,
    pub source: Artifact,
}

impl Artifacts {
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        [&self.reference, &self.manual, &self.header, &self.source].into_iter()
    }

    pub fn into_vec(self) -> Vec<Artifact> {
        vec![self.reference, self.manual, self.header, self.source]
    }
}

/// Runs every generator over `module`.
pub fn emit(module: &Module, config: &EmitConfig) -> Artifacts {
    let protocol = Protocol::build(module);
    let artifacts = Artifacts {
        reference: emit_docs(module, config, DocFlavor::Reference),
        manual: emit_docs(module, config, DocFlavor::Manual),
        header: emit_header(module, config),
        source: emit_source(module, config, &protocol),
    };
    tracing::debug!(
        module = module.name(),
        files = ?artifacts.iter().map(|a| a.path.display().to_string()).collect::<Vec<_>>(),
        "generated"
    );
    artifacts
}
