//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap
//! - `from_matches()` extractors
//! - `From<*Params>` impls bridging dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use vmodc_compiler::emit::AbiBinding;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub files: Vec<PathBuf>,
    pub output: String,
    pub rst_dir: PathBuf,
    pub strict: bool,
    pub boilerplate: bool,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            output: m
                .get_one::<String>("output")
                .cloned()
                .unwrap_or_else(|| "vcc_if".to_string()),
            rst_dir: m
                .get_one::<PathBuf>("rstdir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            strict: m.get_flag("strict"),
            boilerplate: m.get_flag("boilerplate"),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            files: p.files,
            output: p.output,
            rst_dir: p.rst_dir,
            strict: p.strict,
            boilerplate: p.boilerplate,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            files: p.files,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub abi: Option<String>,
    pub vrt: Option<(u32, u32)>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            strict: m.get_flag("strict"),
            abi: m.get_one::<String>("abi").cloned(),
            vrt: m.get_one::<(u32, u32)>("vrt").copied(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        // `--abi` and `--vrt` require each other.
        let binding = match (p.abi, p.vrt) {
            (Some(abi), Some((major, minor))) => Some(AbiBinding::new(abi, major, minor)),
            _ => None,
        };
        Self {
            files: p.files,
            strict: p.strict,
            binding,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_files(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
