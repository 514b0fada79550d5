//! Opening an existing container under a fresh mapping name.

use super::{event, WorkflowLevel, WorkflowReport};
use crate::config::{LuksmanConfig, MountFailurePolicy};
use crate::error::{LuksmanError, LuksmanResult};
use crate::ident::NameFactory;
use crate::layout::Layout;
use crate::provider::ContainerProvider;
use log::warn;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub container: PathBuf,
}

/// Activate a container and mount it under a fresh mount point.
///
/// Any failure returns an error to the caller; the menu loop decides what the
/// operator sees. No step is retried.
pub fn open<P, N>(
    config: &LuksmanConfig,
    provider: &P,
    names: &N,
    layout: &Layout,
    request: &OpenRequest,
) -> LuksmanResult<WorkflowReport>
where
    P: ContainerProvider<Error = LuksmanError>,
    N: NameFactory,
{
    let mapping = names.next_name();
    provider.activate(&request.container, &mapping)?;
    let device = layout.mapper_path(&mapping);

    let mountpoint = layout.mount_path(&names.next_name());
    provider.create_mount_dir(&mountpoint)?;
    mount_activated(config, provider, &device, &mountpoint, &mapping)?;

    Ok(WorkflowReport {
        title: format!("Opened container {}", request.container.display()),
        events: vec![
            event(
                WorkflowLevel::Success,
                format!(
                    "{} is mounted at {}",
                    request.container.display(),
                    mountpoint.display()
                ),
            ),
            event(
                WorkflowLevel::Info,
                format!("LUKS mapper: {}", device.display()),
            ),
        ],
    })
}

/// Mount a freshly activated device, applying the configured policy when the
/// mount itself fails. Shared by the create and open sequences.
pub(crate) fn mount_activated<P>(
    config: &LuksmanConfig,
    provider: &P,
    device: &Path,
    mountpoint: &Path,
    mapping: &str,
) -> LuksmanResult<()>
where
    P: ContainerProvider<Error = LuksmanError>,
{
    let Err(err) = provider.mount(device, mountpoint) else {
        return Ok(());
    };

    match config.mount_failure_policy {
        MountFailurePolicy::LeaveActive => {
            warn!(
                "mount of {} failed; mapping {mapping} is still active, close it with `cryptsetup luksClose {mapping}`",
                device.display()
            );
        }
        MountFailurePolicy::Deactivate => match provider.deactivate(mapping) {
            Ok(()) => warn!("mount of {} failed; mapping {mapping} closed", device.display()),
            Err(close_err) => warn!(
                "mount of {} failed and closing mapping {mapping} also failed: {close_err}",
                device.display()
            ),
        },
    }

    Err(err)
}
