//! Lifecycle workflows for encrypted container files.
//!
//! Each operation is a short, fail-fast sequence of external tool invocations
//! behind the [`ContainerProvider`] seam. Workflows collect operator-facing
//! progress into a `WorkflowReport`; rendering is the caller's job.

mod cleanup;
mod close;
mod create;
mod open;
mod status;


use crate::error::LuksmanResult;

pub use cleanup::clean_mount_points;
pub use close::close;
pub use create::{create, CreateRequest};
pub use open::{open, OpenRequest};
pub use status::status;

/// Severity levels used when reporting workflow events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowLevel {
    Info,
    Success,
    Warn,
}

/// Single line of output produced by a workflow step.
#[derive(Debug, Clone)]
pub struct WorkflowEvent {
    pub level: WorkflowLevel,
    pub message: String,
}

/// Aggregated report returned by any workflow entry point.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub title: String,
    pub events: Vec<WorkflowEvent>,
}

/// Whether a failed step stops the sequence or is merely reported.
///
/// The close workflow unmounts best-effort (a container opened but never
/// mounted must still close) while the deactivation itself is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Required,
    BestEffort,
}

/// Convenience constructor that wraps the repeated boilerplate.
pub(crate) fn event(level: WorkflowLevel, message: impl Into<String>) -> WorkflowEvent {
    WorkflowEvent {
        level,
        message: message.into(),
    }
}

/// Run one external step under an explicit failure policy.
pub(crate) fn run_step(
    mode: StepMode,
    label: &str,
    events: &mut Vec<WorkflowEvent>,
    step: impl FnOnce() -> LuksmanResult<()>,
) -> LuksmanResult<()> {
    match step() {
        Ok(()) => Ok(()),
        Err(err) => match mode {
            StepMode::Required => Err(err),
            StepMode::BestEffort => {
                events.push(event(
                    WorkflowLevel::Warn,
                    format!("{label} failed: {err}; continuing"),
                ));
                Ok(())
            }
        },
    }
}
