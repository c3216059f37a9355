//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Candidate interface descriptions (positional, any number).
pub fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILES")
        .num_args(0..)
        .value_parser(value_parser!(PathBuf))
        .help("Interface descriptions; the first existing one is used (default: vmod.vcc)")
}

/// Prefix of the native header and source (-o/--output).
pub fn output_prefix_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("PREFIX")
        .default_value("vcc_if")
        .help("Output file prefix")
}

/// Documentation directory (-w/--rstdir).
pub fn rst_dir_arg() -> Arg {
    Arg::new("rstdir")
        .short('w')
        .long("rstdir")
        .value_name("DIR")
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Where to save the generated RST files")
}

/// Treat warnings as errors (-N/--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .short('N')
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Also write the automake fragment (-b/--boilerplate).
pub fn boilerplate_arg() -> Arg {
    Arg::new("boilerplate")
        .short('b')
        .long("boilerplate")
        .action(ArgAction::SetTrue)
        .help("Create automake_boilerplate_<name>.am")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// ABI version string for resolved protocol output (--abi).
pub fn abi_arg() -> Arg {
    Arg::new("abi")
        .long("abi")
        .value_name("STRING")
        .requires("vrt")
        .help("ABI version string to fill in")
}

/// VRT version for resolved protocol output (--vrt).
pub fn vrt_arg() -> Arg {
    Arg::new("vrt")
        .long("vrt")
        .value_name("MAJOR.MINOR")
        .requires("abi")
        .value_parser(parse_vrt)
        .help("VRT version to fill in")
}

/// `MAJOR.MINOR` as a pair of integers.
pub fn parse_vrt(value: &str) -> Result<(u32, u32), String> {
    let invalid = || format!("expected MAJOR.MINOR, got `{value}`");
    let (major, minor) = value.split_once('.').ok_or_else(invalid)?;
    let major = major.parse().map_err(|_| invalid())?;
    let minor = minor.parse().map_err(|_| invalid())?;
    Ok((major, minor))
}
