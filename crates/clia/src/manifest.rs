//! Access to the project's `package.json`: loading, the reserved `clia` field, and atomic persistence.

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::InitError;

/// Manifest file name at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Top-level manifest field owned by clia.
pub const RESERVED_FIELD: &str = "clia";

const HELP_TEXT: &str = "For more info on setting values here, see https://github.com/rockholla/nodejs-clia#packagejson-cliarequirements";

/// A project manifest. Key order is preserved as loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

/// Path of the manifest file for a project root.
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

impl Manifest {
    /// Load the manifest at `root`.
    ///
    /// Fails with [`InitError::ManifestNotFound`] when there is no manifest file.
    pub fn load(root: &Path) -> Result<Self> {
        let path = manifest_path(root);
        if !path.is_file() {
            return Err(InitError::ManifestNotFound {
                dir: root.to_path_buf(),
            }
            .into());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(InitError::ManifestNotObject { path }.into()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has_reserved_field(&self) -> bool {
        self.fields.contains_key(RESERVED_FIELD)
    }

    /// Copy of this manifest with the reserved field set to clia's defaults.
    ///
    /// An existing reserved field keeps its position; otherwise it is appended.
    pub fn with_reserved_field_set(&self) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(RESERVED_FIELD.to_string(), default_reserved_field());
        Self { fields }
    }

    /// Two-space indented JSON, without a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.fields).context("failed to serialize package.json")
    }

    /// Overwrite the manifest at `root` by writing a temp file and renaming it into place.
    pub fn persist(&self, root: &Path) -> Result<()> {
        let path = manifest_path(root);
        let content = self.to_json_pretty()?;

        let mut tmp = tempfile::NamedTempFile::new_in(root)
            .with_context(|| format!("failed to create temp file in {}", root.display()))?;
        tmp.write_all(content.as_bytes())
            .with_context(|| format!("failed to write {}", tmp.path().display()))?;

        // Keep the manifest's existing mode instead of the temp file's 0600
        if let Ok(meta) = std::fs::metadata(&path) {
            std::fs::set_permissions(tmp.path(), meta.permissions())
                .with_context(|| format!("failed to set permissions on {}", tmp.path().display()))?;
        }

        tmp.persist(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

fn default_reserved_field() -> Value {
    json!({
        "help": HELP_TEXT,
        "requirements": {
            "enabled": true,
            "executables": [],
        },
    })
}
