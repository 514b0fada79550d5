//! Provider contract between the lifecycle workflows and the external
//! disk-encryption toolchain.
//!
//! The system implementation lives in `luksman-system`; workflow tests use
//! in-memory mocks. Every operation maps to exactly one external command, and
//! only its exit code is inspected. Interactive output (passphrase prompts,
//! status text, mapping listings) passes straight through to the operator's
//! terminal.

use std::error::Error;
use std::path::Path;

pub trait ContainerProvider {
    type Error: Error + Send + Sync + 'static;

    /// Allocate a sparse container image of `size_mib` MiB at `container`.
    fn allocate_image(&self, container: &Path, size_mib: u64) -> Result<(), Self::Error>;

    /// Initialise `container` as a LUKS volume with the fixed cipher suite
    /// (aes-xts-plain64, 512-bit key, argon2i). The passphrase is collected
    /// interactively by the tool itself.
    fn format_volume(&self, container: &Path) -> Result<(), Self::Error>;

    /// Decrypt `container` and expose it under `mapping`.
    fn activate(&self, container: &Path, mapping: &str) -> Result<(), Self::Error>;

    /// Close an active mapping.
    fn deactivate(&self, mapping: &str) -> Result<(), Self::Error>;

    /// Build an ext4 filesystem (journal disabled) on a decrypted device.
    fn make_filesystem(&self, device: &Path) -> Result<(), Self::Error>;

    /// Create a mount point directory, parents included.
    fn create_mount_dir(&self, mountpoint: &Path) -> Result<(), Self::Error>;

    fn mount(&self, device: &Path, mountpoint: &Path) -> Result<(), Self::Error>;

    fn unmount(&self, device: &Path) -> Result<(), Self::Error>;

    /// Query a mapping's status and let the raw output reach the operator.
    fn show_status(&self, mapping: &str) -> Result<(), Self::Error>;

    /// List active mapping names (raw `dmsetup ls` output).
    fn list_mappings(&self) -> Result<(), Self::Error>;

    /// Recursively delete `root` and everything beneath it.
    fn remove_tree(&self, root: &Path) -> Result<(), Self::Error>;
}
