//! Storage volume enumeration.

use std::path::PathBuf;

/// Source of candidate volume mount points for the drive listing.
///
/// Candidates that cannot be read are dropped by the scanner, so
/// implementations do not need to check readiness themselves.
pub trait VolumeSource {
    /// List candidate mount points in display order.
    fn volumes(&self) -> Vec<PathBuf>;
}

/// Volumes reported by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemVolumes;

impl VolumeSource for SystemVolumes {
    fn volumes(&self) -> Vec<PathBuf> {
        let disks = sysinfo::Disks::new_with_refreshed_list();
        let mut mounts: Vec<PathBuf> = Vec::new();

        for disk in disks.list() {
            let mount = disk.mount_point();
            if !mount.is_absolute() || mounts.iter().any(|m| m == mount) {
                continue;
            }
            mounts.push(mount.to_path_buf());
        }

        if mounts.is_empty() {
            mounts.push(fallback_root());
        }

        mounts
    }
}

#[cfg(windows)]
fn fallback_root() -> PathBuf {
    PathBuf::from("C:\\")
}

#[cfg(not(windows))]
fn fallback_root() -> PathBuf {
    PathBuf::from("/")
}

/// A fixed list of mount points.
#[derive(Debug, Clone, Default)]
pub struct FixedVolumes(pub Vec<PathBuf>);

impl VolumeSource for FixedVolumes {
    fn volumes(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}
