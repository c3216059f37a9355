//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vmodc")
        .about("Compiler for VMOD interface descriptions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(generate_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Generate native code and documentation.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate header, source and documentation")
        .after_help(
            r#"EXAMPLES:
  vmodc generate                          # ./vmod.vcc
  vmodc generate src/vmod.vcc -o vcc_std_if
  vmodc generate --strict --boilerplate -w doc"#,
        )
        .arg(files_arg())
        .arg(output_prefix_arg())
        .arg(rst_dir_arg())
        .arg(strict_arg())
        .arg(boilerplate_arg())
        .arg(color_arg())
}

/// Validate an interface description.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate an interface description without writing output")
        .after_help(
            r#"EXAMPLES:
  vmodc check                             # ./vmod.vcc
  vmodc check src/vmod.vcc --strict"#,
        )
        .arg(files_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Print the protocol JSON.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print the JSON description embedded in the native source")
        .after_help(
            r#"EXAMPLES:
  vmodc dump src/vmod.vcc
  vmodc dump src/vmod.vcc --abi 'Varnish trunk' --vrt 19.1"#,
        )
        .arg(files_arg())
        .arg(strict_arg())
        .arg(abi_arg())
        .arg(vrt_arg())
        .arg(color_arg())
}
