//! Status inspection for a single mapping name.

use super::{event, WorkflowLevel, WorkflowReport};
use crate::error::{LuksmanError, LuksmanResult};
use crate::provider::ContainerProvider;

/// Query the encryption subsystem for `mapping`.
///
/// The raw tool output reaches the operator directly; nothing is parsed.
pub fn status<P>(provider: &P, mapping: &str) -> LuksmanResult<WorkflowReport>
where
    P: ContainerProvider<Error = LuksmanError>,
{
    provider.show_status(mapping)?;
    Ok(WorkflowReport {
        title: format!("Status for mapping {mapping}"),
        events: vec![event(WorkflowLevel::Info, "See the output above")],
    })
}
