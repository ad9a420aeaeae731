//! Typed failures raised before the scaffolding pipeline starts.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(
        "No package.json found in {}, are you trying to init in a directory that isn't a node project?",
        dir.display()
    )]
    ManifestNotFound { dir: PathBuf },

    #[error("{} does not contain a JSON object", path.display())]
    ManifestNotObject { path: PathBuf },

    #[error("invalid entrypoint name '{name}': {reason}")]
    InvalidCliName { name: String, reason: &'static str },
}
