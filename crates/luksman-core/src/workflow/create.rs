//! Container creation: allocate, format, activate, build a filesystem, mount.

use super::{event, WorkflowLevel, WorkflowReport};
use crate::config::LuksmanConfig;
use crate::error::{LuksmanError, LuksmanResult};
use crate::ident::NameFactory;
use crate::layout::{Layout, MIN_CONTAINER_MIB};
use crate::provider::ContainerProvider;
use crate::workflow::open::mount_activated;
use std::path::PathBuf;

/// Operator inputs collected before the creation sequence starts.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub container: PathBuf,
    pub size_mib: u64,
}

/// Create a new encrypted container and leave it mounted.
///
/// Every step is gated on the previous one succeeding; nothing is rolled back
/// on failure. The mapping and mount-point identifiers in the final report are
/// the ones generated mid-sequence, never regenerated.
pub fn create<P, N>(
    config: &LuksmanConfig,
    provider: &P,
    names: &N,
    layout: &Layout,
    request: &CreateRequest,
) -> LuksmanResult<WorkflowReport>
where
    P: ContainerProvider<Error = LuksmanError>,
    N: NameFactory,
{
    if request.size_mib < MIN_CONTAINER_MIB {
        return Err(LuksmanError::Validation(format!(
            "container size must be at least {MIN_CONTAINER_MIB} MiB (got {})",
            request.size_mib
        )));
    }

    let mut events = Vec::new();

    provider.allocate_image(&request.container, request.size_mib)?;
    events.push(event(
        WorkflowLevel::Info,
        format!(
            "Allocated {} MiB sparse image at {}",
            request.size_mib,
            request.container.display()
        ),
    ));

    provider.format_volume(&request.container)?;
    events.push(event(
        WorkflowLevel::Info,
        "LUKS headers written; enter the passphrase you just set when prompted",
    ));

    let mapping = names.next_name();
    provider.activate(&request.container, &mapping)?;
    let device = layout.mapper_path(&mapping);

    provider.make_filesystem(&device)?;
    events.push(event(
        WorkflowLevel::Info,
        format!("ext4 filesystem built on {}", device.display()),
    ));

    let mountpoint = layout.mount_path(&names.next_name());
    provider.create_mount_dir(&mountpoint)?;
    mount_activated(config, provider, &device, &mountpoint, &mapping)?;

    events.push(event(
        WorkflowLevel::Success,
        format!("Container mount point: {}", mountpoint.display()),
    ));
    events.push(event(
        WorkflowLevel::Success,
        format!("LUKS mapper: {}", device.display()),
    ));

    Ok(WorkflowReport {
        title: format!("Created container {}", request.container.display()),
        events,
    })
}
