//! All-or-nothing output.
//!
//! Every artifact is first written to a temporary file next to its
//! destination. Only once all of them are staged does [`Staging::commit`]
//! rename them into place. Dropping an uncommitted [`Staging`] removes the
//! temporary files and leaves the destination untouched.
//!
//! A target occupied by anything but a regular file is rejected while
//! staging, before any rename. Should a rename still fail, the targets this
//! commit created are removed again.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::emit::Artifact;
use crate::{Error, Result};

/// Mode of committed files before the umask applies.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

struct Staged {
    file: NamedTempFile,
    target: PathBuf,
    existed: bool,
}

pub struct Staging {
    root: PathBuf,
    staged: Vec<Staged>,
}

impl Staging {
    /// Stage relative artifact paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staged: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn stage(&mut self, artifact: &Artifact) -> Result<()> {
        let target = self.root.join(&artifact.path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let stage_err = |source| Error::Stage {
            path: target.clone(),
            source,
        };

        let existed = check_target(&target).map_err(stage_err)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(".vmodc-").suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(OUTPUT_MODE));
        }
        let mut file = builder.tempfile_in(&dir).map_err(stage_err)?;
        file.write_all(artifact.contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(stage_err)?;

        tracing::debug!(
            target = %target.display(),
            temp = %file.path().display(),
            bytes = artifact.contents.len(),
            "staged"
        );
        self.staged.push(Staged {
            file,
            target,
            existed,
        });
        Ok(())
    }

    pub fn stage_all<'a>(&mut self, artifacts: impl IntoIterator<Item = &'a Artifact>) -> Result<()> {
        for artifact in artifacts {
            self.stage(artifact)?;
        }
        Ok(())
    }

    /// Renames every staged file into place, returning the written paths.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        for staged in &self.staged {
            check_target(&staged.target).map_err(|source| Error::Commit {
                path: staged.target.clone(),
                source,
            })?;
        }

        let mut written = Vec::with_capacity(self.staged.len());
        let mut created = Vec::new();
        for Staged {
            file,
            target,
            existed,
        } in self.staged
        {
            if let Err(e) = file.persist(&target) {
                remove_created(&created);
                return Err(Error::Commit {
                    path: target,
                    source: e.error,
                });
            }
            tracing::info!(path = %target.display(), "wrote");
            if !existed {
                created.push(target.clone());
            }
            written.push(target);
        }
        Ok(written)
    }
}

/// Whether `target` already holds a regular file. Anything else in its place
/// is an error.
fn check_target(target: &Path) -> io::Result<bool> {
    match fs::metadata(target) {
        Ok(meta) if meta.is_file() => Ok(true),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target exists and is not a regular file",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn remove_created(created: &[PathBuf]) {
    for path in created {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot remove partial output");
        }
    }
}
