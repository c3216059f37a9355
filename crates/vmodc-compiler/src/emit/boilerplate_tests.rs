use std::fs;
use std::path::Path;

use crate::emit::{EmitConfig, discover_sources, emit_boilerplate};
use crate::test_utils::parse_ok;

const SOURCE: &str = "$Module std 3 \"standard\"\n";

#[test]
fn discovers_module_sources() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "vmod_std_fileread.c",
        "vmod_std.c",
        "vmod_std.h",
        "vmod_std.vcc",
        "vmod_other.c",
        "std.c",
    ] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let module = parse_ok(SOURCE);
    let sources = discover_sources(dir.path(), &module).unwrap();

    assert_eq!(sources, ["vmod_std.c", "vmod_std.h", "vmod_std_fileread.c"]);
}

#[test]
fn missing_directory_is_an_error() {
    let module = parse_ok(SOURCE);
    assert!(discover_sources(Path::new("/nonexistent/vmodc"), &module).is_err());
}

#[test]
fn fragment_substitutes_names() {
    let module = parse_ok(SOURCE);
    let config = EmitConfig::new()
        .output_prefix("vcc_std_if")
        .input_name("lib/vmod_std/vmod.vcc");
    let sources = ["vmod_std.c".to_string(), "vmod_std.h".to_string()];
    let artifact = emit_boilerplate(&module, &config, &sources);

    assert_eq!(artifact.path, Path::new("automake_boilerplate_std.am"));
    let text = artifact.contents;
    assert!(text.starts_with(
        "# Generated by vmodc generate --boilerplate.\n\nvmod_LTLIBRARIES += libvmod_std.la\n"
    ));
    assert!(text.contains("libvmod_std_la_SOURCES = \\\n\tvmod_std.c \\\n\tvmod_std.h\n\n"));
    assert!(text.contains("vmodcargs_std ?= --strict --boilerplate -o vcc_std_if\n"));
    assert!(text.contains("nodist_libvmod_std_la_SOURCES = vcc_std_if.c vcc_std_if.h\n"));
    assert!(text.contains("EXTRA_DIST += $(srcdir)/vmod.vcc automake_boilerplate_std.am\n"));
    assert!(text.contains("\t$(VMODC) generate $(vmodcargs_std) $(srcdir)/vmod.vcc\n"));
    assert!(text.ends_with("\trm -f vmod_std.rst vmod_std.man.rst\n"));
    assert!(!text.contains("XXX"));
}

#[test]
fn fragment_without_sources() {
    let module = parse_ok(SOURCE);
    let artifact = emit_boilerplate(&module, &EmitConfig::new(), &[]);

    assert!(artifact.contents.contains("libvmod_std_la_SOURCES = \\\n\t\n"));
    assert!(artifact.contents.contains("$(srcdir)/vmod.vcc automake_boilerplate_std.am\n"));
}
