//! Error taxonomy shared across luksman crates.

use std::path::PathBuf;
use thiserror::Error;

pub type LuksmanResult<T> = Result<T, LuksmanError>;

#[derive(Debug, Error)]
pub enum LuksmanError {
    /// Operator input failed validation before any tool was invoked.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Configuration file problems and invalid tool overrides.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An external tool ran and reported a non-zero exit code.
    #[error("{tool} exited with code {code}")]
    Tool { tool: String, code: i32 },

    /// An external tool could not be located or spawned.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("failed to parse configuration at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LuksmanError {
    /// Construct the error used for every failed external step.
    pub fn tool(tool: impl Into<String>, code: i32) -> Self {
        LuksmanError::Tool {
            tool: tool.into(),
            code,
        }
    }
}
