//! Closing an active mapping: unmount, then deactivate.

use super::{event, run_step, StepMode, WorkflowLevel, WorkflowReport};
use crate::error::{LuksmanError, LuksmanResult};
use crate::layout::Layout;
use crate::provider::ContainerProvider;

/// Unmount and deactivate `mapping`.
///
/// The unmount is best-effort: the mapping may never have been mounted, or the
/// operator may have unmounted it already. Only the deactivation decides
/// success.
pub fn close<P>(provider: &P, layout: &Layout, mapping: &str) -> LuksmanResult<WorkflowReport>
where
    P: ContainerProvider<Error = LuksmanError>,
{
    let device = layout.mapper_path(mapping);
    let mut events = Vec::new();

    run_step(
        StepMode::BestEffort,
        &format!("unmount of {}", device.display()),
        &mut events,
        || provider.unmount(&device),
    )?;

    run_step(
        StepMode::Required,
        &format!("deactivation of {mapping}"),
        &mut events,
        || provider.deactivate(mapping),
    )?;

    events.push(event(
        WorkflowLevel::Success,
        format!("Mapping {mapping} closed"),
    ));

    Ok(WorkflowReport {
        title: format!("Closed mapping {mapping}"),
        events,
    })
}
