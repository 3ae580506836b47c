//! The assembled audit document.
//!
//! Field order here is the key order of the serialized document.

use std::collections::BTreeMap;

use serde::Serialize;

use super::collected::{Collected, RawText};
use super::table::{FlatMap, Table};

/// Top-level keys of a serialized snapshot, in document order.
pub const SECTION_NAMES: [&str; 10] = [
    "sysctl",
    "proc",
    "disk_partitions",
    "dmesg",
    "transparent_huge_pages",
    "memory",
    "disk",
    "network",
    "distro",
    "power_mgmt",
];

/// Point-in-time view of kernel, disk, network and distro state.
///
/// Built once per run by the collector and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Kernel parameters, keys kept verbatim.
    /// Source: `sysctl -a`
    pub sysctl: Collected<FlatMap>,

    pub proc: ProcSection,

    /// Mounted filesystems.
    /// Source: `df -h`
    pub disk_partitions: Collected<Table>,

    /// Source: `dmesg`
    pub dmesg: RawText,

    pub transparent_huge_pages: ThpSection,

    /// Source: `free -m`
    pub memory: RawText,

    pub disk: DiskSection,
    pub network: NetworkSection,
    pub distro: DistroSection,
    pub power_mgmt: PowerMgmtSection,
}

/// Selected files under `/proc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcSection {
    /// `:`-delimited; with several CPUs the last processor block wins.
    pub cpuinfo: Collected<FlatMap>,
    pub cmdline: RawText,
    #[serde(rename = "net/softnet_stat")]
    pub softnet_stat: RawText,
    pub cgroups: Collected<Table>,
    pub uptime: RawText,
    /// Space-delimited counters.
    pub vmstat: Collected<FlatMap>,
    pub loadavg: RawText,
    pub zoneinfo: RawText,
    pub partitions: Collected<Table>,
    pub version: RawText,
}

/// Transparent huge page settings from `/sys/kernel/mm/transparent_hugepage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThpSection {
    pub enabled: RawText,
    pub defrag: RawText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskSection {
    /// Block device name to the content of its `queue/scheduler`.
    /// `Unavailable` as a whole when `/sys/block` cannot be listed.
    pub scheduler: Collected<BTreeMap<String, RawText>>,
    /// Source: `lsblk`
    pub number_of_disks: Collected<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSection {
    pub ifconfig: RawText,
    pub ip: RawText,
    pub netstat: RawText,
    /// TCP sockets from `ss -tan`.
    pub ss: Collected<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistroSection {
    pub issue: RawText,
    /// Content of the first readable distro release file.
    pub release: RawText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerMgmtSection {
    pub max_cstate: RawText,
}

impl Snapshot {
    /// Dotted names of every source that came back `Unavailable`.
    ///
    /// Per-device scheduler entries are not listed individually.
    pub fn unavailable_sources(&self) -> Vec<&'static str> {
        let sources = [
            ("sysctl", self.sysctl.is_available()),
            ("proc.cpuinfo", self.proc.cpuinfo.is_available()),
            ("proc.cmdline", self.proc.cmdline.is_available()),
            ("proc.net/softnet_stat", self.proc.softnet_stat.is_available()),
            ("proc.cgroups", self.proc.cgroups.is_available()),
            ("proc.uptime", self.proc.uptime.is_available()),
            ("proc.vmstat", self.proc.vmstat.is_available()),
            ("proc.loadavg", self.proc.loadavg.is_available()),
            ("proc.zoneinfo", self.proc.zoneinfo.is_available()),
            ("proc.partitions", self.proc.partitions.is_available()),
            ("proc.version", self.proc.version.is_available()),
            ("disk_partitions", self.disk_partitions.is_available()),
            ("dmesg", self.dmesg.is_available()),
            (
                "transparent_huge_pages.enabled",
                self.transparent_huge_pages.enabled.is_available(),
            ),
            (
                "transparent_huge_pages.defrag",
                self.transparent_huge_pages.defrag.is_available(),
            ),
            ("memory", self.memory.is_available()),
            ("disk.scheduler", self.disk.scheduler.is_available()),
            ("disk.number_of_disks", self.disk.number_of_disks.is_available()),
            ("network.ifconfig", self.network.ifconfig.is_available()),
            ("network.ip", self.network.ip.is_available()),
            ("network.netstat", self.network.netstat.is_available()),
            ("network.ss", self.network.ss.is_available()),
            ("distro.issue", self.distro.issue.is_available()),
            ("distro.release", self.distro.release.is_available()),
            ("power_mgmt.max_cstate", self.power_mgmt.max_cstate.is_available()),
        ];

        sources
            .into_iter()
            .filter(|(_, available)| !available)
            .map(|(name, _)| name)
            .collect()
    }
}
