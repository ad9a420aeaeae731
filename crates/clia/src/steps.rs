//! The scaffolding steps of `clia init`, each bound to one target under the project root.

use anyhow::{Context, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::assets;
use crate::context::ProjectContext;
use crate::gate::Conflict;
use crate::manifest::{MANIFEST_FILE, RESERVED_FIELD};

pub const CONFIG_DIR: &str = "config";
pub const COMMANDS_DIR: &str = "commands";
pub const SCRIPT_EXT: &str = "js";

/// Local override file that the config directory's `.gitignore` excludes.
const GITIGNORE_RULE: &str = "local.js";
const DEFAULT_CONFIG: &str = "module.exports = {};";
const ENTRYPOINT_MODE: u32 = 0o755;

const OVERWRITE_WITH_DEFAULT: &str = "Do you want to overwrite it with the clia default one?";

/// One unit of scaffolding work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Create `config/` and its `.gitignore`. Never prompts.
    EnsureConfigDir,
    /// Write `config/default.js`.
    DefaultConfigFile,
    /// Set the reserved field in `package.json`.
    ManifestMerge,
    /// Copy the entrypoint script to `<root>/<entrypoint name>` and make it executable.
    EntrypointFile,
    /// Create `commands/`. Never prompts.
    EnsureCommandsDir,
    /// Copy a starter command template to `commands/<name>.js`.
    CommandFile {
        name: &'static str,
        template: &'static [u8],
    },
}

/// The steps of `clia init`, in the order they must run.
pub fn init_steps() -> Vec<Step> {
    let mut steps = vec![
        Step::EnsureConfigDir,
        Step::DefaultConfigFile,
        Step::ManifestMerge,
        Step::EntrypointFile,
        Step::EnsureCommandsDir,
    ];
    steps.extend(
        assets::STARTER_COMMANDS
            .iter()
            .map(|&(name, template)| Step::CommandFile { name, template }),
    );
    steps
}

fn script_file(stem: &str) -> String {
    format!("{stem}.{SCRIPT_EXT}")
}

fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(script_file("default"))
}

impl Step {
    pub fn name(&self) -> String {
        match self {
            Step::EnsureConfigDir => "config-dir".into(),
            Step::DefaultConfigFile => "default-config".into(),
            Step::ManifestMerge => "manifest".into(),
            Step::EntrypointFile => "entrypoint".into(),
            Step::EnsureCommandsDir => "commands-dir".into(),
            Step::CommandFile { name, .. } => format!("command:{name}"),
        }
    }

    /// Absolute path this step writes to.
    pub fn target(&self, ctx: &ProjectContext) -> PathBuf {
        let root = ctx.root();
        match self {
            Step::EnsureConfigDir => root.join(CONFIG_DIR),
            Step::DefaultConfigFile => default_config_path(root),
            Step::ManifestMerge => root.join(MANIFEST_FILE),
            Step::EntrypointFile => root.join(ctx.entrypoint_name()),
            Step::EnsureCommandsDir => root.join(COMMANDS_DIR),
            Step::CommandFile { name, .. } => root.join(COMMANDS_DIR).join(script_file(name)),
        }
    }

    /// Line announcing the step before it runs.
    pub fn announcement(&self) -> String {
        match self {
            Step::EnsureConfigDir => format!("ensuring /{CONFIG_DIR} directory exists"),
            Step::DefaultConfigFile => format!(
                "adding default config at /{CONFIG_DIR}/{}",
                script_file("default")
            ),
            Step::ManifestMerge => format!(
                "Adding the {RESERVED_FIELD} property and related meta to your {MANIFEST_FILE}"
            ),
            Step::EntrypointFile => {
                "Copying cli entrypoint command to the root of your project".into()
            }
            Step::EnsureCommandsDir => "Ensuring commands directory exists".into(),
            Step::CommandFile { name, .. } => {
                format!("Adding /{COMMANDS_DIR}/{} command", script_file(name))
            }
        }
    }

    /// How to ask before overwriting, or `None` if the step never prompts.
    pub fn conflict(&self, ctx: &ProjectContext) -> Option<Conflict> {
        match self {
            Step::EnsureConfigDir | Step::EnsureCommandsDir => None,
            Step::DefaultConfigFile => {
                let shown = format!("/{CONFIG_DIR}/{}", script_file("default"));
                Some(Conflict {
                    warning: format!("{shown} already exists"),
                    question: "Do you want to overwrite it with the clia default?",
                    skip_notice: format!("OK, not overwriting {shown}"),
                })
            }
            Step::ManifestMerge => Some(Conflict {
                warning: format!(
                    "The {RESERVED_FIELD} property already exists in your {MANIFEST_FILE}"
                ),
                question: "Do you want to overwrite the property with clia defaults?",
                skip_notice: format!(
                    "OK, not overwriting {RESERVED_FIELD} property in {MANIFEST_FILE}"
                ),
            }),
            Step::EntrypointFile => Some(Conflict {
                warning: format!(
                    "The /{} entrypoint file already exists",
                    ctx.entrypoint_name()
                ),
                question: OVERWRITE_WITH_DEFAULT,
                skip_notice: "OK, not overwriting clia root entrypoint".into(),
            }),
            Step::CommandFile { name, .. } => {
                let shown = format!("/{COMMANDS_DIR}/{}", script_file(name));
                Some(Conflict {
                    warning: format!("The {shown} file already exists"),
                    question: OVERWRITE_WITH_DEFAULT,
                    skip_notice: format!("OK, not overwriting {shown}"),
                })
            }
        }
    }

    /// Whether the thing this step would write is already there.
    pub fn exists(&self, ctx: &ProjectContext) -> bool {
        match self {
            Step::ManifestMerge => ctx.manifest().has_reserved_field(),
            _ => self.target(ctx).exists(),
        }
    }

    /// Perform the step's write unconditionally.
    pub fn apply(&self, ctx: &mut ProjectContext) -> Result<()> {
        let target = self.target(ctx);
        match self {
            Step::EnsureConfigDir => {
                ensure_dir(&target)?;
                let gitignore = target.join(".gitignore");
                if !gitignore.exists() {
                    write_file(&gitignore, GITIGNORE_RULE.as_bytes())?;
                }
                Ok(())
            }
            Step::DefaultConfigFile => write_file(&target, DEFAULT_CONFIG.as_bytes()),
            Step::ManifestMerge => {
                let merged = ctx.manifest().with_reserved_field_set();
                ctx.store_manifest(merged)
            }
            Step::EntrypointFile => {
                write_file(&target, assets::ENTRYPOINT)?;
                std::fs::set_permissions(&target, std::fs::Permissions::from_mode(ENTRYPOINT_MODE))
                    .with_context(|| format!("failed to chmod {}", target.display()))
            }
            Step::EnsureCommandsDir => ensure_dir(&target),
            Step::CommandFile { template, .. } => write_file(&target, template),
        }
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use tempfile::TempDir;

    fn context(tmp: &TempDir, manifest: &str) -> ProjectContext {
        std::fs::write(tmp.path().join(MANIFEST_FILE), manifest).unwrap();
        let manifest = Manifest::load(tmp.path()).unwrap();
        ProjectContext::new(tmp.path().to_path_buf(), "mycli".into(), manifest)
    }

    #[test]
    fn init_steps_run_in_fixed_order() {
        let names: Vec<String> = init_steps().iter().map(Step::name).collect();
        assert_eq!(
            names,
            [
                "config-dir",
                "default-config",
                "manifest",
                "entrypoint",
                "commands-dir",
                "command:use",
                "command:add-requirement",
            ]
        );
    }

    #[test]
    fn targets_resolve_under_root() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp, "{}");
        let root = tmp.path();

        let targets: Vec<PathBuf> = init_steps().iter().map(|s| s.target(&ctx)).collect();
        assert_eq!(
            targets,
            [
                root.join("config"),
                root.join("config/default.js"),
                root.join("package.json"),
                root.join("mycli"),
                root.join("commands"),
                root.join("commands/use.js"),
                root.join("commands/add-requirement.js"),
            ]
        );
    }

    #[test]
    fn directory_steps_never_prompt() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp, "{}");
        assert!(Step::EnsureConfigDir.conflict(&ctx).is_none());
        assert!(Step::EnsureCommandsDir.conflict(&ctx).is_none());
        assert!(Step::DefaultConfigFile.conflict(&ctx).is_some());
    }

    #[test]
    fn config_dir_writes_gitignore_once() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = context(&tmp, "{}");
        let gitignore = tmp.path().join("config/.gitignore");

        Step::EnsureConfigDir.apply(&mut ctx).unwrap();
        assert_eq!(std::fs::read_to_string(&gitignore).unwrap(), "local.js");

        std::fs::write(&gitignore, "local.js\n*.secret").unwrap();
        Step::EnsureConfigDir.apply(&mut ctx).unwrap();
        assert_eq!(
            std::fs::read_to_string(&gitignore).unwrap(),
            "local.js\n*.secret"
        );
    }

    #[test]
    fn entrypoint_is_executable() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = context(&tmp, "{}");

        Step::EntrypointFile.apply(&mut ctx).unwrap();

        let path = tmp.path().join("mycli");
        assert_eq!(std::fs::read(&path).unwrap(), assets::ENTRYPOINT);
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn manifest_step_exists_checks_reserved_field() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = context(&tmp, r#"{"name": "x"}"#);
        assert!(!Step::ManifestMerge.exists(&ctx));

        Step::ManifestMerge.apply(&mut ctx).unwrap();
        assert!(Step::ManifestMerge.exists(&ctx));
        assert!(Manifest::load(tmp.path()).unwrap().has_reserved_field());
    }

    #[test]
    fn command_step_copies_template() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = context(&tmp, "{}");
        let step = init_steps()
            .into_iter()
            .find(|s| s.name() == "command:add-requirement")
            .unwrap();

        Step::EnsureCommandsDir.apply(&mut ctx).unwrap();
        step.apply(&mut ctx).unwrap();

        let written = std::fs::read(tmp.path().join("commands/add-requirement.js")).unwrap();
        assert_eq!(written, assets::STARTER_COMMANDS[1].1);
    }
}
