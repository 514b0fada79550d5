//! Execution wrapper for invoking external disk tools.
//!
//! Commands run with inherited stdio: cryptsetup collects passphrases on the
//! operator's terminal and status/listing output passes straight through.
//! Only the exit code is inspected.

use log::debug;
use luksman_core::error::{LuksmanError, LuksmanResult};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub(crate) struct ExternalTool {
    name: &'static str,
    binary: PathBuf,
}

impl ExternalTool {
    /// Resolve a tool binary: explicit override first, then the candidate
    /// list, then `PATH`.
    pub(crate) fn resolve(
        name: &'static str,
        override_path: Option<&str>,
        candidates: &[&str],
    ) -> LuksmanResult<Self> {
        if let Some(path) = override_path.map(str::trim).filter(|path| !path.is_empty()) {
            let candidate = Path::new(path);
            if !candidate.exists() {
                return Err(LuksmanError::InvalidConfig(format!(
                    "{name} binary not found at {}",
                    candidate.display()
                )));
            }
            return Ok(Self {
                name,
                binary: candidate.to_path_buf(),
            });
        }

        if let Some(found) = candidates
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.exists())
        {
            return Ok(Self {
                name,
                binary: found.to_path_buf(),
            });
        }

        find_in_path(name).map(|binary| Self { name, binary }).ok_or_else(|| {
            LuksmanError::InvalidConfig(format!(
                "unable to locate {name}; tried {candidates:?} and PATH"
            ))
        })
    }

    /// Run the tool with inherited stdio and map a non-zero exit code to an
    /// error. A signal-terminated child reports code -1.
    pub(crate) fn call<I, S>(&self, args: I) -> LuksmanResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!("running {}", self.binary.display());
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|err| {
                LuksmanError::Provider(format!(
                    "failed to spawn {}: {err}",
                    self.binary.display()
                ))
            })?;

        let code = status.code().unwrap_or(-1);
        if code == 0 {
            Ok(())
        } else {
            Err(LuksmanError::tool(self.name, code))
        }
    }
}

fn find_in_path(binary: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(binary);
        if candidate.exists() {
            Some(candidate)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn resolve_rejects_missing_override() {
        let err =
            ExternalTool::resolve("cryptsetup", Some("/definitely/not/here"), &[]).unwrap_err();
        match err {
            LuksmanError::InvalidConfig(message) => {
                assert!(message.contains("/definitely/not/here"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolve_prefers_the_override() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fake-tool");
        fs::write(&fake, "").unwrap();

        let tool = ExternalTool::resolve(
            "fake-tool",
            Some(fake.to_str().unwrap()),
            &["/usr/bin/env"],
        )
        .unwrap();
        assert_eq!(tool.binary, fake);
    }

    #[test]
    fn resolve_walks_candidates_when_no_override() {
        let tool = ExternalTool::resolve("sh", None, &["/bin/sh", "/usr/bin/sh"]).unwrap();
        assert!(tool.binary.exists());
    }

    #[test]
    fn call_maps_nonzero_exit_to_tool_error() {
        let tool = ExternalTool::resolve("sh", None, &["/bin/sh", "/usr/bin/sh"]).unwrap();
        let err = tool.call(["-c", "exit 3"]).unwrap_err();
        match err {
            LuksmanError::Tool { tool, code } => {
                assert_eq!(tool, "sh");
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn call_succeeds_on_zero_exit() {
        let tool = ExternalTool::resolve("sh", None, &["/bin/sh", "/usr/bin/sh"]).unwrap();
        tool.call(["-c", "exit 0"]).unwrap();
    }
}
