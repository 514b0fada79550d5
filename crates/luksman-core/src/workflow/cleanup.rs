//! Bulk removal of the mount-point root.

use super::{event, WorkflowLevel, WorkflowReport};
use crate::error::{LuksmanError, LuksmanResult};
use crate::layout::Layout;
use crate::provider::ContainerProvider;

/// Recursively delete everything under the mount root.
///
/// The only safeguard is the confirmation prompt in the caller; no check is
/// made for paths that are still mounted. A missing root is a no-op that still
/// reports success, and the root's parent is never touched.
pub fn clean_mount_points<P>(provider: &P, layout: &Layout) -> LuksmanResult<WorkflowReport>
where
    P: ContainerProvider<Error = LuksmanError>,
{
    let root = layout.mount_root();
    let title = format!("Cleaned mount points under {}", root.display());

    if !root.exists() {
        return Ok(WorkflowReport {
            title,
            events: vec![event(
                WorkflowLevel::Info,
                format!("{} does not exist; nothing to clean", root.display()),
            )],
        });
    }

    provider.remove_tree(root)?;
    Ok(WorkflowReport {
        title,
        events: vec![event(
            WorkflowLevel::Success,
            format!("Removed {} and everything beneath it", root.display()),
        )],
    })
}
