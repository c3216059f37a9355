//! Locating and loading the interface description.

use std::fs;
use std::path::PathBuf;

use vmodc_compiler::module::{Module, ParseOptions, parse};
use vmodc_compiler::Diagnostics;

use super::CommandError;

/// Input used when no candidate on the command line exists.
pub const DEFAULT_INPUT: &str = "vmod.vcc";

pub struct Input {
    pub path: PathBuf,
    pub source: String,
}

impl Input {
    /// Reads the first existing candidate, falling back to [`DEFAULT_INPUT`].
    pub fn load(files: &[PathBuf]) -> Result<Self, CommandError> {
        let default = PathBuf::from(DEFAULT_INPUT);
        let path = first_existing(files.iter().chain([&default])).ok_or(CommandError::NoInput)?;
        Self::read(path)
    }

    pub fn read(path: PathBuf) -> Result<Self, CommandError> {
        match fs::read_to_string(&path) {
            Ok(source) => Ok(Self { path, source }),
            Err(source) => Err(CommandError::Read { path, source }),
        }
    }

    /// Path as given, used in banners and diagnostics.
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }

    pub fn parse(&self, strict: bool) -> Result<(Module, Diagnostics), CommandError> {
        let options = ParseOptions::new().strict(strict);
        let (module, diagnostics) = parse(&self.source, &options)?;
        tracing::debug!(
            input = %self.path.display(),
            module = module.name(),
            warnings = diagnostics.len(),
            "parsed"
        );
        Ok((module, diagnostics))
    }
}

pub fn first_existing<'a>(candidates: impl IntoIterator<Item = &'a PathBuf>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .find(|path| path.exists())
        .cloned()
}
