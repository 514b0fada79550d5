//! The system provider: one `ExternalTool` per collaborator, fixed cipher
//! parameters for formatting, and no interpretation of tool output.

use crate::command::ExternalTool;
use luksman_core::config::LuksmanConfig;
use luksman_core::error::{LuksmanError, LuksmanResult};
use luksman_core::provider::ContainerProvider;
use std::ffi::OsString;
use std::path::Path;

const CRYPTSETUP_PATHS: &[&str] = &[
    "/usr/sbin/cryptsetup",
    "/usr/bin/cryptsetup",
    "/sbin/cryptsetup",
    "/bin/cryptsetup",
    "/usr/local/sbin/cryptsetup",
];
const DMSETUP_PATHS: &[&str] = &[
    "/usr/sbin/dmsetup",
    "/sbin/dmsetup",
    "/usr/bin/dmsetup",
    "/bin/dmsetup",
];
const TRUNCATE_PATHS: &[&str] = &["/usr/bin/truncate", "/bin/truncate"];
const MKFS_EXT4_PATHS: &[&str] = &["/usr/sbin/mkfs.ext4", "/sbin/mkfs.ext4", "/usr/bin/mkfs.ext4"];
const MKDIR_PATHS: &[&str] = &["/usr/bin/mkdir", "/bin/mkdir"];
const MOUNT_PATHS: &[&str] = &["/usr/bin/mount", "/bin/mount", "/usr/sbin/mount", "/sbin/mount"];
const UMOUNT_PATHS: &[&str] = &["/usr/bin/umount", "/bin/umount", "/usr/sbin/umount", "/sbin/umount"];
const RM_PATHS: &[&str] = &["/usr/bin/rm", "/bin/rm"];

/// Provider that manages containers via the host's disk tooling.
#[derive(Debug, Clone)]
pub struct SystemContainerProvider {
    cryptsetup: ExternalTool,
    dmsetup: ExternalTool,
    truncate: ExternalTool,
    mkfs_ext4: ExternalTool,
    mkdir: ExternalTool,
    mount: ExternalTool,
    umount: ExternalTool,
    rm: ExternalTool,
}

impl SystemContainerProvider {
    /// Build a provider from configuration, resolving every tool up front so
    /// a missing binary surfaces at startup instead of mid-sequence.
    pub fn from_config(config: &LuksmanConfig) -> LuksmanResult<Self> {
        let tools = &config.tools;
        Ok(Self {
            cryptsetup: ExternalTool::resolve(
                "cryptsetup",
                tools.cryptsetup.as_deref(),
                CRYPTSETUP_PATHS,
            )?,
            dmsetup: ExternalTool::resolve("dmsetup", tools.dmsetup.as_deref(), DMSETUP_PATHS)?,
            truncate: ExternalTool::resolve("truncate", tools.truncate.as_deref(), TRUNCATE_PATHS)?,
            mkfs_ext4: ExternalTool::resolve(
                "mkfs.ext4",
                tools.mkfs_ext4.as_deref(),
                MKFS_EXT4_PATHS,
            )?,
            mkdir: ExternalTool::resolve("mkdir", tools.mkdir.as_deref(), MKDIR_PATHS)?,
            mount: ExternalTool::resolve("mount", tools.mount.as_deref(), MOUNT_PATHS)?,
            umount: ExternalTool::resolve("umount", tools.umount.as_deref(), UMOUNT_PATHS)?,
            rm: ExternalTool::resolve("rm", tools.rm.as_deref(), RM_PATHS)?,
        })
    }
}

impl ContainerProvider for SystemContainerProvider {
    type Error = LuksmanError;

    fn allocate_image(&self, container: &Path, size_mib: u64) -> LuksmanResult<()> {
        self.truncate.call([
            OsString::from("-s"),
            OsString::from(format!("{size_mib}M")),
            container.into(),
        ])
    }

    fn format_volume(&self, container: &Path) -> LuksmanResult<()> {
        self.cryptsetup.call([
            OsString::from("luksFormat"),
            OsString::from("--cipher=aes-xts-plain64"),
            OsString::from("--key-size=512"),
            OsString::from("--pbkdf=argon2i"),
            OsString::from("--pbkdf-memory=128"),
            container.into(),
        ])
    }

    fn activate(&self, container: &Path, mapping: &str) -> LuksmanResult<()> {
        self.cryptsetup.call([
            OsString::from("luksOpen"),
            container.into(),
            OsString::from(mapping),
        ])
    }

    fn deactivate(&self, mapping: &str) -> LuksmanResult<()> {
        self.cryptsetup.call(["luksClose", mapping])
    }

    fn make_filesystem(&self, device: &Path) -> LuksmanResult<()> {
        self.mkfs_ext4.call([
            OsString::from("-O"),
            OsString::from("^has_journal"),
            OsString::from("-j"),
            device.into(),
        ])
    }

    fn create_mount_dir(&self, mountpoint: &Path) -> LuksmanResult<()> {
        self.mkdir
            .call([OsString::from("-p"), mountpoint.into()])
    }

    fn mount(&self, device: &Path, mountpoint: &Path) -> LuksmanResult<()> {
        self.mount
            .call([OsString::from(device), OsString::from(mountpoint)])
    }

    fn unmount(&self, device: &Path) -> LuksmanResult<()> {
        self.umount.call([device])
    }

    fn show_status(&self, mapping: &str) -> LuksmanResult<()> {
        self.cryptsetup.call(["status", mapping])
    }

    fn list_mappings(&self) -> LuksmanResult<()> {
        self.dmsetup.call(["ls"])
    }

    fn remove_tree(&self, root: &Path) -> LuksmanResult<()> {
        self.rm.call([OsString::from("-rf"), root.into()])
    }
}
