use hlab_api::{ClusterResource, Container};

use super::snapshot::Snapshot;

/// Cluster wide usage in percent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResourceUsage {
    pub cpu: u64,
    pub memory: u64,
    pub disk: u64,
}

impl ResourceUsage {
    /// Cpu and memory are summed over nodes only, disk over storages only.
    pub fn from_resources(resources: &[ClusterResource]) -> Self {
        let (mut cpu_used, mut cpu_total) = (0.0, 0.0);
        let (mut mem_used, mut mem_total) = (0.0, 0.0);
        let (mut disk_used, mut disk_total) = (0.0, 0.0);

        for resource in resources {
            match resource.kind.as_str() {
                "node" => {
                    let maxcpu = resource.maxcpu.unwrap_or_default();
                    cpu_total += maxcpu;
                    cpu_used += resource.cpu.unwrap_or_default()
                        * if maxcpu > 0.0 { maxcpu } else { 1.0 };

                    mem_total += resource.maxmem.unwrap_or_default();
                    mem_used += resource.mem.unwrap_or_default();
                }
                "storage" => {
                    disk_total += resource.maxdisk.unwrap_or_default();
                    disk_used += resource.disk.unwrap_or_default();
                }
                _ => {}
            }
        }

        Self {
            cpu: percent(cpu_used, cpu_total),
            memory: percent(mem_used, mem_total),
            disk: percent(disk_used, disk_total),
        }
    }
}

pub fn percent(used: f64, total: f64) -> u64 {
    if total > 0.0 {
        (used / total * 100.0).round().max(0.0) as u64
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ContainerStats {
    pub running: usize,
    pub paused: usize,
    pub stopped: usize,
}

impl ContainerStats {
    pub fn from_containers(containers: &[Container]) -> Self {
        let mut stats = Self::default();
        for container in containers {
            if container.is_paused() {
                stats.paused += 1;
            } else if container.is_running() {
                stats.running += 1;
            } else {
                stats.stopped += 1;
            }
        }
        stats
    }
}

/// Text of a connection badge: the item count on success.
pub fn badge<T>(snapshot: &Snapshot<Vec<T>>, noun: &str) -> Option<String> {
    match snapshot {
        Snapshot::Loading => None,
        Snapshot::Ready { payload, .. } => Some(format!("Connected ({} {})", payload.len(), noun)),
        Snapshot::Failed { .. } => Some("Connection Error".to_owned()),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
