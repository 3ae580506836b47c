//! Main collector that assembles every section into a `Snapshot`.
//!
//! Each section is produced by its own method returning a value; the
//! snapshot is composed from those values in one expression. Sections are
//! independent: a source that is unavailable only affects its own slot.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::collector::host::{parse_effective_uid, sanitize_hostname};
use crate::collector::source::Sources;
use crate::collector::traits::{CommandRunner, FileSystem};
use crate::config::AuditConfig;
use crate::model::{
    Collected, DiskSection, DistroSection, FlatMap, NetworkSection, PowerMgmtSection,
    ProcSection, RawText, Snapshot, Table, ThpSection,
};
use crate::parser::{parse_delimited, parse_sysctl, parse_tabular};

const SYSCTL_CMD: &[&str] = &["sysctl", "-a"];
const DF_CMD: &[&str] = &["df", "-h"];
const DMESG_CMD: &[&str] = &["dmesg"];
const FREE_CMD: &[&str] = &["free", "-m"];
const LSBLK_CMD: &[&str] = &["lsblk"];
const IFCONFIG_CMD: &[&str] = &["ifconfig"];
const IP_CMD: &[&str] = &["ip", "addr", "show"];
const NETSTAT_CMD: &[&str] = &["netstat", "-an"];
const SS_CMD: &[&str] = &["ss", "-tan"];
const UNAME_NODE_CMD: &[&str] = &["uname", "-n"];

/// Distro identification files under the etc directory, in lookup order.
pub const RELEASE_FILES: [&str; 16] = [
    "SuSE-release",
    "redhat-release",
    "redhat_version",
    "fedora-release",
    "slackware-release",
    "slackware-version",
    "debian_release",
    "debian_version",
    "os-release",
    "mandrake-release",
    "yellowdog-release",
    "sun-release",
    "release",
    "gentoo-release",
    "system-release",
    "lsb-release",
];

/// Status file of the running process. Always the host's own `/proc`, not
/// the configured root, which may point at a captured tree.
const SELF_STATUS: &str = "/proc/self/status";

/// Hostname used when neither the kernel nor `uname` can tell us.
const FALLBACK_HOSTNAME: &str = "localhost";

/// Gathers a full [`Snapshot`] from a host.
///
/// Generic over the filesystem and command runner so the same code runs
/// against the real host and against mocks.
pub struct Collector<F: FileSystem, R: CommandRunner> {
    sources: Sources<F, R>,
    config: AuditConfig,
}

impl<F: FileSystem, R: CommandRunner> Collector<F, R> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `runner` - Command runner (real or mock)
    /// * `config` - Pseudo-filesystem roots
    pub fn new(fs: F, runner: R, config: AuditConfig) -> Self {
        Self {
            sources: Sources::new(fs, runner),
            config,
        }
    }

    /// Collects every section, in document order.
    ///
    /// Never fails: each unreadable source becomes `Unavailable` in place.
    pub fn collect_snapshot(&self) -> Snapshot {
        let started = Instant::now();

        let snapshot = Snapshot {
            sysctl: timed("sysctl", || self.collect_sysctl()),
            proc: timed("proc", || self.collect_proc()),
            disk_partitions: timed("disk_partitions", || self.collect_disk_partitions()),
            dmesg: timed("dmesg", || self.sources.run_command(DMESG_CMD)),
            transparent_huge_pages: timed("transparent_huge_pages", || self.collect_thp()),
            memory: timed("memory", || self.sources.run_command(FREE_CMD)),
            disk: timed("disk", || self.collect_disk()),
            network: timed("network", || self.collect_network()),
            distro: timed("distro", || self.collect_distro()),
            power_mgmt: timed("power_mgmt", || self.collect_power_mgmt()),
        };

        info!("Snapshot collected in {:?}", started.elapsed());
        snapshot
    }

    /// Kernel parameters from `sysctl -a`.
    pub fn collect_sysctl(&self) -> Collected<FlatMap> {
        self.sources
            .run_command(SYSCTL_CMD)
            .map(|text| parse_sysctl(&text))
    }

    pub fn collect_proc(&self) -> ProcSection {
        ProcSection {
            cpuinfo: self
                .read_proc("cpuinfo")
                .map(|text| parse_delimited(":", &text)),
            cmdline: self.read_proc("cmdline"),
            softnet_stat: self.read_proc("net/softnet_stat"),
            cgroups: self.read_proc("cgroups").map(|text| parse_tabular(&text)),
            uptime: self.read_proc("uptime"),
            vmstat: self
                .read_proc("vmstat")
                .map(|text| parse_delimited(" ", &text)),
            loadavg: self.read_proc("loadavg"),
            zoneinfo: self.read_proc("zoneinfo"),
            partitions: self
                .read_proc("partitions")
                .map(|text| parse_tabular(&text)),
            version: self.read_proc("version"),
        }
    }

    /// Mounted filesystems from `df -h`.
    pub fn collect_disk_partitions(&self) -> Collected<Table> {
        self.sources
            .run_command(DF_CMD)
            .map(|text| parse_tabular(&text))
    }

    pub fn collect_thp(&self) -> ThpSection {
        ThpSection {
            enabled: self.read_sys("kernel/mm/transparent_hugepage/enabled"),
            defrag: self.read_sys("kernel/mm/transparent_hugepage/defrag"),
        }
    }

    pub fn collect_disk(&self) -> DiskSection {
        DiskSection {
            scheduler: self.collect_schedulers(),
            number_of_disks: self
                .sources
                .run_command(LSBLK_CMD)
                .map(|text| parse_tabular(&text)),
        }
    }

    /// I/O scheduler of every block device under `<sys>/block`.
    pub fn collect_schedulers(&self) -> Collected<BTreeMap<String, RawText>> {
        let block_dir = self.config.sys("block");
        self.sources.list_dir(&block_dir).map(|devices| {
            devices
                .into_iter()
                .map(|device| {
                    let path = block_dir.join(&device).join("queue/scheduler");
                    let scheduler = self.sources.read_file(&path);
                    (device, scheduler)
                })
                .collect()
        })
    }

    pub fn collect_network(&self) -> NetworkSection {
        NetworkSection {
            ifconfig: self.sources.run_command(IFCONFIG_CMD),
            ip: self.sources.run_command(IP_CMD),
            netstat: self.sources.run_command(NETSTAT_CMD),
            ss: self
                .sources
                .run_command(SS_CMD)
                .map(|text| parse_tabular(&text)),
        }
    }

    pub fn collect_distro(&self) -> DistroSection {
        DistroSection {
            issue: self.read_etc("issue"),
            release: self.collect_release(),
        }
    }

    /// Content of the first readable file in [`RELEASE_FILES`].
    ///
    /// Candidates that do not exist are skipped without a read attempt.
    pub fn collect_release(&self) -> RawText {
        for name in RELEASE_FILES {
            let path = self.config.etc(name);
            if !self.sources.exists(&path) {
                continue;
            }
            let text = self.sources.read_file(&path);
            if text.is_available() {
                debug!("distro release from {}", name);
                return text;
            }
        }
        Collected::Unavailable
    }

    pub fn collect_power_mgmt(&self) -> PowerMgmtSection {
        PowerMgmtSection {
            max_cstate: self.read_sys("module/intel_idle/parameters/max_cstate"),
        }
    }

    /// Hostname for naming the output file.
    ///
    /// Tries `<proc>/sys/kernel/hostname`, then `uname -n`, then falls back to
    /// `localhost`. The result is safe to embed in a file name.
    pub fn hostname(&self) -> String {
        self.read_proc("sys/kernel/hostname")
            .into_data()
            .and_then(|name| sanitize_hostname(&name))
            .or_else(|| {
                self.sources
                    .run_command(UNAME_NODE_CMD)
                    .into_data()
                    .and_then(|name| sanitize_hostname(&name))
            })
            .unwrap_or_else(|| FALLBACK_HOSTNAME.to_string())
    }

    /// Effective UID of this process, from `/proc/self/status`.
    pub fn effective_uid(&self) -> Option<u32> {
        self.sources
            .read_file(Path::new(SELF_STATUS))
            .into_data()
            .and_then(|status| parse_effective_uid(&status))
    }

    fn read_proc(&self, relative: &str) -> RawText {
        self.sources.read_file(&self.config.proc(relative))
    }

    fn read_sys(&self, relative: &str) -> RawText {
        self.sources.read_file(&self.config.sys(relative))
    }

    fn read_etc(&self, relative: &str) -> RawText {
        self.sources.read_file(&self.config.etc(relative))
    }
}

fn timed<T>(section: &str, collect: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let value = collect();
    debug!("{} collected in {:?}", section, started.elapsed());
    value
}
