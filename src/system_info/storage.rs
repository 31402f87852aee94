use std::path::Path;

use sysinfo::{Disks, System};

const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

pub fn get_cpu_usage(sys: &System) -> String {
    format_cpu_usage(sys.global_cpu_info().cpu_usage())
}

pub fn get_memory_info(sys: &System) -> String {
    format_memory(sys.used_memory(), sys.total_memory())
}

/// Usage of the filesystem mounted at `/`, which lives on the SD card.
pub fn get_disk_usage() -> String {
    let disks = Disks::new_with_refreshed_list();
    let mounts = disks
        .list()
        .iter()
        .map(|disk| (disk.mount_point(), disk.total_space(), disk.available_space()));

    match root_space(mounts) {
        Some((used, total)) => format_disk(used, total),
        None => format_disk(0, 0),
    }
}

// (used, total) of the root mount; boot partitions and USB drives are skipped
fn root_space<'a>(mounts: impl IntoIterator<Item = (&'a Path, u64, u64)>) -> Option<(u64, u64)> {
    mounts
        .into_iter()
        .find(|(mount_point, _, _)| *mount_point == Path::new("/"))
        .map(|(_, total, available)| (total.saturating_sub(available), total))
}

pub fn format_cpu_usage(percent: f32) -> String {
    format!("CPU: {:.0}%", percent.clamp(0.0, 100.0))
}

pub fn format_memory(used_bytes: u64, total_bytes: u64) -> String {
    format!("RAM: {}/{}MB", used_bytes / MB, total_bytes / MB)
}

pub fn format_disk(used_bytes: u64, total_bytes: u64) -> String {
    if total_bytes > 0 {
        format!("Disk: {}/{}GB", used_bytes / GB, total_bytes / GB)
    } else {
        "Disk: N/A".to_string()
    }
}
