//! vmodc compiler: parser, symbol table and generators for VMOD interface descriptions.
//!
//! This crate provides the compilation pipeline for `vmod.vcc` files:
//! - `parser` - declaration splitting and tokenization
//! - `types` - argument and return type parsing
//! - `proto` - function, method and constructor prototypes
//! - `module` - stanza model, symbol table and alias resolution
//! - `emit` - native header/source, protocol blob, documentation
//! - `commit` - staged, all-or-nothing output
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod commit;
pub mod diagnostics;
pub mod emit;
pub mod module;
pub mod parser;
pub mod proto;
pub mod types;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod commit_tests;
#[cfg(test)]
mod proto_tests;
#[cfg(test)]
mod types_tests;

use std::path::PathBuf;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any warnings it collected.
/// Rejected input uses the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use commit::Staging;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity, Span};
pub use emit::{Artifact, Artifacts, EmitConfig};
pub use module::{Module, ParseOptions};

/// Errors that can occur while compiling an interface description.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("interface description rejected with {} errors", .0.error_count())]
    Rejected(Diagnostics),

    #[error("cannot stage {}: {source}", .path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot commit {}: {source}", .path.display())]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Diagnostics carried by a rejection, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Rejected(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
