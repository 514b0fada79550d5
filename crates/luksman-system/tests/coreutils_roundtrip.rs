//! Exercise the non-privileged provider operations against the real
//! coreutils binaries in a scratch directory.

use luksman_core::config::LuksmanConfig;
use luksman_core::error::LuksmanError;
use luksman_core::provider::ContainerProvider;
use luksman_system::SystemContainerProvider;
use std::fs;
use tempfile::tempdir;

fn scaffold_provider() -> SystemContainerProvider {
    let sh = ["/bin/sh", "/usr/bin/sh"]
        .iter()
        .find(|candidate| std::path::Path::new(candidate).exists())
        .expect("no shell available")
        .to_string();

    let mut config = LuksmanConfig::default();
    config.tools.cryptsetup = Some(sh.clone());
    config.tools.dmsetup = Some(sh.clone());
    config.tools.mkfs_ext4 = Some(sh.clone());
    config.tools.mount = Some(sh.clone());
    config.tools.umount = Some(sh);
    SystemContainerProvider::from_config(&config).expect("provider should construct")
}

#[test]
fn allocate_image_creates_a_sparse_file_of_the_requested_size() {
    let provider = scaffold_provider();
    let dir = tempdir().unwrap();
    let image = dir.path().join("box.img");

    provider.allocate_image(&image, 60).unwrap();

    let meta = fs::metadata(&image).unwrap();
    assert_eq!(meta.len(), 60 * 1024 * 1024);
}

#[test]
fn allocate_image_surfaces_the_tool_exit_code() {
    let provider = scaffold_provider();
    let dir = tempdir().unwrap();

    // truncate refuses to operate on a directory
    let err = provider.allocate_image(dir.path(), 60).unwrap_err();
    match err {
        LuksmanError::Tool { tool, code } => {
            assert_eq!(tool, "truncate");
            assert_ne!(code, 0);
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[test]
fn create_mount_dir_makes_parents() {
    let provider = scaffold_provider();
    let dir = tempdir().unwrap();
    let nested = dir.path().join("luks").join("MNTNAME222");

    provider.create_mount_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn remove_tree_deletes_the_root_and_spares_its_parent() {
    let provider = scaffold_provider();
    let dir = tempdir().unwrap();
    let root = dir.path().join("luks");
    fs::create_dir_all(root.join("MNTNAME222")).unwrap();
    fs::write(root.join("MNTNAME222").join("marker"), b"x").unwrap();

    provider.remove_tree(&root).unwrap();

    assert!(!root.exists());
    assert!(dir.path().exists());
}

#[test]
fn remove_tree_on_a_missing_root_succeeds() {
    let provider = scaffold_provider();
    let dir = tempdir().unwrap();
    provider.remove_tree(&dir.path().join("never-created")).unwrap();
}
