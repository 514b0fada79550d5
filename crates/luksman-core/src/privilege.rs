//! Startup privilege precondition.
//!
//! luksman drives cryptsetup, device-mapper, and mount directly, so it only
//! runs usefully as root. The check happens once at entry; nothing else reads
//! ambient privilege state.

#[cfg(unix)]
pub fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn running_as_root() -> bool {
    true
}
