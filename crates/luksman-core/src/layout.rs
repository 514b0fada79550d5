//! Fixed filesystem layout conventions.
//!
//! Decrypted devices appear under the device-mapper prefix and mount points
//! are created under a single root. Both are program-wide constants; the
//! `Layout` type exists so workflows stay testable against scratch
//! directories.

use std::path::{Path, PathBuf};

/// Prefix under which active mappings expose their decrypted device node.
pub const MAPPER_PREFIX: &str = "/dev/mapper";

/// Root directory that holds every mount point this program creates.
pub const MOUNT_ROOT: &str = "/mnt/containers/luks";

/// Smallest container the creation workflow accepts, in MiB.
pub const MIN_CONTAINER_MIB: u64 = 50;

#[derive(Debug, Clone)]
pub struct Layout {
    mapper_prefix: PathBuf,
    mount_root: PathBuf,
}

impl Layout {
    /// The fixed system layout used outside of tests.
    pub fn system() -> Self {
        Self::new(MAPPER_PREFIX, MOUNT_ROOT)
    }

    pub fn new(mapper_prefix: impl Into<PathBuf>, mount_root: impl Into<PathBuf>) -> Self {
        Self {
            mapper_prefix: mapper_prefix.into(),
            mount_root: mount_root.into(),
        }
    }

    /// Device node for an active mapping name.
    pub fn mapper_path(&self, mapping: &str) -> PathBuf {
        self.mapper_prefix.join(mapping)
    }

    /// Mount point directory for a generated mount name.
    pub fn mount_path(&self, name: &str) -> PathBuf {
        self.mount_root.join(name)
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_layout_uses_fixed_roots() {
        let layout = Layout::default();
        assert_eq!(
            layout.mapper_path("ABC"),
            PathBuf::from("/dev/mapper/ABC")
        );
        assert_eq!(
            layout.mount_path("XYZ"),
            PathBuf::from("/mnt/containers/luks/XYZ")
        );
        assert_eq!(layout.mount_root(), Path::new(MOUNT_ROOT));
    }
}
