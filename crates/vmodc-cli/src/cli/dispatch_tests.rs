//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Defaults: prefix, documentation directory and color
//! 2. Params extraction: correct fields are extracted from ArgMatches
//! 3. Validation: `--abi` and `--vrt` travel together

use std::path::PathBuf;

use super::*;
use crate::cli::args::parse_vrt;
use crate::cli::commands::{check_command, dump_command, generate_command};
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;

#[test]
fn generate_defaults() {
    let m = generate_command().try_get_matches_from(["generate"]).unwrap();
    let params = GenerateParams::from_matches(&m);

    assert!(params.files.is_empty());
    assert_eq!(params.output, "vcc_if");
    assert_eq!(params.rst_dir, PathBuf::from("."));
    assert!(!params.strict);
    assert!(!params.boilerplate);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn generate_all_flags() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "missing.vcc",
            "src/vmod.vcc",
            "-o",
            "vcc_std_if",
            "-w",
            "doc",
            "--strict",
            "--boilerplate",
            "--color",
            "never",
        ])
        .unwrap();
    let args: GenerateArgs = GenerateParams::from_matches(&m).into();

    assert_eq!(
        args.files,
        [PathBuf::from("missing.vcc"), PathBuf::from("src/vmod.vcc")]
    );
    assert_eq!(args.output, "vcc_std_if");
    assert_eq!(args.rst_dir, PathBuf::from("doc"));
    assert!(args.strict);
    assert!(args.boilerplate);
    assert!(!args.color);
}

#[test]
fn generate_short_flags() {
    let m = generate_command()
        .try_get_matches_from(["generate", "-N", "-b", "-o", "out"])
        .unwrap();
    let params = GenerateParams::from_matches(&m);

    assert!(params.strict);
    assert!(params.boilerplate);
    assert_eq!(params.output, "out");
}

#[test]
fn check_extracts_files_and_strict() {
    let m = check_command()
        .try_get_matches_from(["check", "vmod.vcc", "--strict", "--color", "always"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.files, [PathBuf::from("vmod.vcc")]);
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn check_rejects_generate_flags() {
    let result = check_command().try_get_matches_from(["check", "--boilerplate"]);
    assert!(result.is_err());
}

#[test]
fn dump_without_binding() {
    let m = dump_command().try_get_matches_from(["dump"]).unwrap();
    let args: DumpArgs = DumpParams::from_matches(&m).into();
    assert!(args.binding.is_none());
}

#[test]
fn dump_with_binding() {
    let m = dump_command()
        .try_get_matches_from(["dump", "--abi", "Varnish trunk", "--vrt", "19.1"])
        .unwrap();
    let args: DumpArgs = DumpParams::from_matches(&m).into();
    let binding = args.binding.unwrap();

    assert_eq!(binding.abi, "Varnish trunk");
    assert_eq!((binding.major, binding.minor), (19, 1));
}

#[test]
fn dump_binding_needs_both_halves() {
    assert!(dump_command().try_get_matches_from(["dump", "--abi", "x"]).is_err());
    assert!(dump_command().try_get_matches_from(["dump", "--vrt", "1.0"]).is_err());
    assert!(
        dump_command()
            .try_get_matches_from(["dump", "--abi", "x", "--vrt", "1"])
            .is_err()
    );
}

#[test]
fn vrt_version_parsing() {
    assert_eq!(parse_vrt("19.1"), Ok((19, 1)));
    assert_eq!(parse_vrt("0.0"), Ok((0, 0)));
    assert_eq!(parse_vrt("19"), Err("expected MAJOR.MINOR, got `19`".to_string()));
    assert!(parse_vrt("a.b").is_err());
    assert!(parse_vrt("1.2.3").is_err());
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(build_cli().try_get_matches_from(["vmodc"]).is_err());
    assert!(
        build_cli()
            .try_get_matches_from(["vmodc", "generate", "vmod.vcc"])
            .is_ok()
    );
}

#[test]
fn command_definitions_are_valid() {
    build_cli().debug_assert();
}
