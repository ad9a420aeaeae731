//! The resolved project being initialized: root directory, entrypoint name, and loaded manifest.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::InitError;
use crate::manifest::{Manifest, manifest_path};

/// State shared by every scaffolding step of one `clia init` run.
#[derive(Debug)]
pub struct ProjectContext {
    root: PathBuf,
    entrypoint_name: String,
    manifest: Manifest,
}

impl ProjectContext {
    pub fn new(root: PathBuf, entrypoint_name: String, manifest: Manifest) -> Self {
        Self {
            root,
            entrypoint_name,
            manifest,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entrypoint_name(&self) -> &str {
        &self.entrypoint_name
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Write `manifest` to disk and make it the current manifest.
    pub fn store_manifest(&mut self, manifest: Manifest) -> Result<()> {
        manifest.persist(&self.root)?;
        self.manifest = manifest;
        Ok(())
    }
}

/// Resolve the target directory to an absolute path, defaulting to the current directory.
pub fn resolve_root(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("failed to resolve {}", dir.display())),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Fail unless `root` is an already-initialized Node project.
pub fn precheck(root: &Path) -> Result<(), InitError> {
    if manifest_path(root).is_file() {
        Ok(())
    } else {
        Err(InitError::ManifestNotFound {
            dir: root.to_path_buf(),
        })
    }
}

/// Check that `name` can be used as a file name at the project root.
pub fn validate_cli_name(name: &str) -> Result<(), InitError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name == "." || name == ".." {
        Some("name cannot be a relative directory")
    } else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        Some("name cannot contain a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(InitError::InvalidCliName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
