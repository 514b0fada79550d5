//! System-backed [`ContainerProvider`] implementation.
//!
//! Wraps the host's disk tooling (cryptsetup, dmsetup, truncate, mkfs.ext4,
//! mkdir, mount, umount, rm) behind the provider contract so workflow logic
//! stays testable against mocks.

mod command;
mod system;

pub use system::SystemContainerProvider;
