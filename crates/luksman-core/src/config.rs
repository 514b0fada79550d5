//! Configuration model and helpers used by luksman binaries.

use crate::error::{LuksmanError, LuksmanResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/luksman.toml";
const CONFIG_PATH_ENV: &str = "LUKSMAN_CONFIG";

/// Optional absolute-path overrides for the external tools.
///
/// When unset, the system provider walks its built-in candidate lists and then
/// `PATH`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(default)]
    pub cryptsetup: Option<String>,

    #[serde(default)]
    pub dmsetup: Option<String>,

    #[serde(default)]
    pub truncate: Option<String>,

    #[serde(default)]
    pub mkfs_ext4: Option<String>,

    #[serde(default)]
    pub mkdir: Option<String>,

    #[serde(default)]
    pub mount: Option<String>,

    #[serde(default)]
    pub umount: Option<String>,

    #[serde(default)]
    pub rm: Option<String>,
}

impl ToolPaths {
    fn entries(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("tools.cryptsetup", self.cryptsetup.as_deref()),
            ("tools.dmsetup", self.dmsetup.as_deref()),
            ("tools.truncate", self.truncate.as_deref()),
            ("tools.mkfs_ext4", self.mkfs_ext4.as_deref()),
            ("tools.mkdir", self.mkdir.as_deref()),
            ("tools.mount", self.mount.as_deref()),
            ("tools.umount", self.umount.as_deref()),
            ("tools.rm", self.rm.as_deref()),
        ]
    }
}

/// What to do with an activated mapping when the follow-up mount fails.
///
/// The historical behaviour left the mapping open for the operator to close by
/// hand; `deactivate` closes it best-effort instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountFailurePolicy {
    #[default]
    LeaveActive,
    Deactivate,
}

/// Top-level configuration snapshot loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LuksmanConfig {
    #[serde(default)]
    pub tools: ToolPaths,

    #[serde(default)]
    pub mount_failure_policy: MountFailurePolicy,

    #[serde(skip)]
    pub path: PathBuf,
}

impl LuksmanConfig {
    /// Resolve the config path from the environment override or the default.
    pub fn resolve_path() -> PathBuf {
        match env::var(CONFIG_PATH_ENV) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ => PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Load a configuration file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &Path) -> LuksmanResult<Self> {
        if path.exists() {
            return Self::load(path);
        }
        info!(
            "no configuration at {}; using built-in defaults",
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            ..Self::default()
        })
    }

    /// Read and parse a configuration file from disk.
    pub fn load(path: &Path) -> LuksmanResult<Self> {
        let contents = fs::read_to_string(path)?;
        let mut cfg: Self =
            toml::from_str(&contents).map_err(|source| LuksmanError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.path = path.to_path_buf();
        Ok(cfg)
    }

    /// Best-effort validation pass returning human-readable issues.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (key, value) in self.tools.entries() {
            let Some(raw) = value else { continue };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                issues.push(format!("{key} is set but empty"));
                continue;
            }
            let candidate = Path::new(trimmed);
            if !candidate.is_absolute() {
                issues.push(format!("{key} must be an absolute path (got `{trimmed}`)"));
            } else if !candidate.exists() {
                issues.push(format!("{key} points at a missing binary: {trimmed}"));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: impl Into<String>) -> Self {
            let prev = env::var(key).ok();
            env::set_var(key, value.into());
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(prev) = &self.prev {
                env::set_var(self.key, prev);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn defaults_leave_mapping_active_on_mount_failure() {
        let cfg = LuksmanConfig::default();
        assert_eq!(cfg.mount_failure_policy, MountFailurePolicy::LeaveActive);
        assert!(cfg.tools.cryptsetup.is_none());
    }

    #[test]
    fn config_path_respects_env_override() {
        let guard = EnvGuard::set(CONFIG_PATH_ENV, "/tmp/luksman-test.toml");
        assert_eq!(
            LuksmanConfig::resolve_path(),
            PathBuf::from("/tmp/luksman-test.toml")
        );
        drop(guard);
        assert_eq!(
            LuksmanConfig::resolve_path(),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cfg = LuksmanConfig::load_or_default(&path).unwrap();
        assert_eq!(cfg.path, path);
        assert_eq!(cfg.mount_failure_policy, MountFailurePolicy::LeaveActive);
    }

    #[test]
    fn parses_overrides_and_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luksman.toml");
        fs::write(
            &path,
            "mount_failure_policy = \"deactivate\"\n\n[tools]\ncryptsetup = \"/usr/sbin/cryptsetup\"\n",
        )
        .unwrap();

        let cfg = LuksmanConfig::load(&path).unwrap();
        assert_eq!(cfg.mount_failure_policy, MountFailurePolicy::Deactivate);
        assert_eq!(
            cfg.tools.cryptsetup.as_deref(),
            Some("/usr/sbin/cryptsetup")
        );
    }

    #[test]
    fn validate_flags_relative_and_missing_overrides() {
        let mut cfg = LuksmanConfig::default();
        cfg.tools.rm = Some("rm".into());
        cfg.tools.mount = Some("/definitely/not/here/mount".into());

        let issues = cfg.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|issue| issue.contains("tools.rm")));
        assert!(issues
            .iter()
            .any(|issue| issue.contains("missing binary")));
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "tools = 12").unwrap();
        let err = LuksmanConfig::load(&path).unwrap_err();
        match err {
            LuksmanError::ConfigParse { path: seen, .. } => assert_eq!(seen, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
