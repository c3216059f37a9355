pub mod check;
pub mod dump;
pub mod generate;
pub mod input;
pub mod report;

#[cfg(test)]
mod dump_tests;

use std::path::PathBuf;

/// Failures of a command, rendered by [`report::fail`].
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no vmod.vcc file supplied or found")]
    NoInput,

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list module sources in {}: {source}", .path.display())]
    Sources {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Compile(#[from] vmodc_compiler::Error),

    #[error("cannot serialize protocol: {0}")]
    Json(#[from] serde_json::Error),
}
