//! Core building blocks shared by luksman binaries.
//!
//! Configuration, the container provider contract, and the lifecycle workflows
//! live here so the interactive surface can focus on prompting the operator
//! instead of reimplementing orchestration.

pub mod config;
pub mod error;
pub mod ident;
pub mod layout;
pub mod logging;
pub mod privilege;
pub mod provider;
pub mod workflow;

pub use config::{LuksmanConfig, MountFailurePolicy, ToolPaths, DEFAULT_CONFIG_PATH};
pub use error::{LuksmanError, LuksmanResult};
pub use ident::{NameFactory, RandomNames};
pub use layout::{Layout, MAPPER_PREFIX, MIN_CONTAINER_MIB, MOUNT_ROOT};
pub use provider::ContainerProvider;
