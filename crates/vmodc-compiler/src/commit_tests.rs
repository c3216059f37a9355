use std::fs;
use std::path::Path;

use indoc::indoc;

use crate::commit::Staging;
use crate::emit::{Artifact, EmitConfig, emit};
use crate::module::{ParseOptions, parse};

const WARNS: &str = indoc! {r#"
    $Module m 3 "test"
    $Module m 3 "again"
    $Function VOID f()
"#};

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn commit_renames_into_place() {
    let dir = tempfile::tempdir().unwrap();
    let mut staging = Staging::new(dir.path());
    staging
        .stage(&Artifact::new("a.h", "header\n".to_string()))
        .unwrap();
    staging
        .stage(&Artifact::new("b.c", "source\n".to_string()))
        .unwrap();

    assert_eq!(staging.len(), 2);
    assert!(!dir.path().join("a.h").exists());

    let written = staging.commit().unwrap();
    assert_eq!(written, [dir.path().join("a.h"), dir.path().join("b.c")]);
    assert_eq!(entries(dir.path()), ["a.h", "b.c"]);
    assert_eq!(fs::read_to_string(dir.path().join("b.c")).unwrap(), "source\n");
}

#[test]
fn dropped_staging_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut staging = Staging::new(dir.path());
        staging
            .stage(&Artifact::new("a.h", "header\n".to_string()))
            .unwrap();
        assert_eq!(entries(dir.path()).len(), 1);
    }
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn commit_replaces_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.h"), "old\n").unwrap();

    let mut staging = Staging::new(dir.path());
    staging
        .stage(&Artifact::new("a.h", "new\n".to_string()))
        .unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("a.h")).unwrap(), "old\n");

    staging.commit().unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("a.h")).unwrap(), "new\n");
}

#[test]
fn staging_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut staging = Staging::new(dir.path());
    let err = staging
        .stage(&Artifact::new("missing/a.h", String::new()))
        .unwrap_err();

    assert!(matches!(err, crate::Error::Stage { .. }));
    assert!(staging.is_empty());
}

#[test]
fn directory_in_place_of_a_target_is_rejected_while_staging() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("b.c")).unwrap();

    let mut staging = Staging::new(dir.path());
    staging
        .stage(&Artifact::new("a.h", "header\n".to_string()))
        .unwrap();
    let err = staging
        .stage(&Artifact::new("b.c", "source\n".to_string()))
        .unwrap_err();
    assert!(matches!(err, crate::Error::Stage { .. }));

    drop(staging);
    assert_eq!(entries(dir.path()), ["b.c"]);
}

#[test]
fn target_occupied_after_staging_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut staging = Staging::new(dir.path());
    staging
        .stage(&Artifact::new("a.h", "header\n".to_string()))
        .unwrap();
    staging
        .stage(&Artifact::new("b.c", "source\n".to_string()))
        .unwrap();
    fs::create_dir(dir.path().join("b.c")).unwrap();

    let err = staging.commit().unwrap_err();
    assert!(matches!(err, crate::Error::Commit { .. }));
    assert_eq!(entries(dir.path()), ["b.c"]);
}

#[cfg(unix)]
#[test]
fn committed_files_are_readable_by_others() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let mut staging = Staging::new(dir.path());
    staging
        .stage(&Artifact::new("a.h", "header\n".to_string()))
        .unwrap();
    staging.commit().unwrap();

    let mode = fs::metadata(dir.path().join("a.h")).unwrap().permissions().mode();
    assert_eq!(mode & 0o600, 0o600);
    assert_eq!(mode & 0o044, 0o044);
    assert_eq!(mode & 0o111, 0);
}

#[test]
fn warnings_commit_output_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    let (module, diagnostics) = parse(WARNS, &ParseOptions::new()).unwrap();
    assert!(diagnostics.has_warnings());

    let mut staging = Staging::new(dir.path());
    staging.stage_all(emit(&module, &EmitConfig::new()).iter()).unwrap();
    staging.commit().unwrap();
    assert_eq!(
        entries(dir.path()),
        ["vcc_if.c", "vcc_if.h", "vmod_m.man.rst", "vmod_m.rst"]
    );

    let strict = tempfile::tempdir().unwrap();
    let err = parse(WARNS, &ParseOptions::new().strict(true)).unwrap_err();
    assert!(err.diagnostics().is_some_and(|d| d.has_errors()));
    assert!(entries(strict.path()).is_empty());
}
