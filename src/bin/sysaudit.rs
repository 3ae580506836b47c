//! sysaudit - collects a point-in-time snapshot of host state.
//!
//! Reads kernel counters, disk layout, sockets, distro identity and power
//! settings, and writes them as one JSON document.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use sysaudit::collector::{Collector, RealFs, SystemRunner};
use sysaudit::config::AuditConfig;
use sysaudit::model::Snapshot;
use sysaudit::output::{render_document, write_document, write_sysctl_listing};

/// Point-in-time system audit.
#[derive(Parser)]
#[command(name = "sysaudit", about = "Point-in-time system audit snapshot", version)]
struct Args {
    /// Directory the audit document is written to.
    #[arg(short, long, env = "SYSAUDIT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Print the document to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,

    /// Path to /proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Path to /sys filesystem.
    #[arg(long, default_value = "/sys")]
    sys_path: PathBuf,

    /// Directory holding distro identification files.
    #[arg(long, default_value = "/etc")]
    etc_path: PathBuf,

    /// Seconds a single diagnostic command may run before it is killed.
    #[arg(long, env = "SYSAUDIT_COMMAND_TIMEOUT", default_value = "30")]
    command_timeout: u64,

    /// Also write the sysctl section as a `key = value` listing to this path.
    #[arg(long, value_name = "PATH")]
    sysctl_out: Option<PathBuf>,

    /// Refuse to run unless the effective user is root.
    #[arg(long)]
    require_root: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr with the appropriate log level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("sysaudit={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Describes the contents of a snapshot for logging.
fn describe_snapshot(snapshot: &Snapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(sysctl) = snapshot.sysctl.data() {
        parts.push(format!("{} sysctl keys", sysctl.len()));
    }
    if let Some(partitions) = snapshot.disk_partitions.data() {
        parts.push(format!("{} mounts", partitions.len()));
    }
    if let Some(schedulers) = snapshot.disk.scheduler.data() {
        parts.push(format!("{} block devices", schedulers.len()));
    }
    if let Some(sockets) = snapshot.network.ss.data() {
        parts.push(format!("{} tcp sockets", sockets.len()));
    }

    let unavailable = snapshot.unavailable_sources();
    if !unavailable.is_empty() {
        parts.push(format!("{} sources unavailable", unavailable.len()));
    }

    parts.join(", ")
}

fn fatal(message: &str) -> ! {
    error!("{}", message);
    eprintln!("sysaudit: {}", message);
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("sysaudit {} starting", env!("CARGO_PKG_VERSION"));

    let config = AuditConfig {
        proc_path: args.proc_path.clone(),
        sys_path: args.sys_path.clone(),
        etc_path: args.etc_path.clone(),
        command_timeout: Duration::from_secs(args.command_timeout),
    };
    info!(
        "Config: proc={}, sys={}, etc={}, command_timeout={:?}",
        config.proc_path.display(),
        config.sys_path.display(),
        config.etc_path.display(),
        config.command_timeout
    );

    let runner = SystemRunner::new(config.command_timeout);
    let collector = Collector::new(RealFs::new(), runner, config);

    match collector.effective_uid() {
        Some(0) => debug!("Running as root"),
        Some(uid) if args.require_root => {
            fatal(&format!("must be run as root (effective uid {})", uid))
        }
        Some(uid) => warn!(
            "Running as uid {}; privileged sources (dmesg, some /sys files) may be unavailable",
            uid
        ),
        None if args.require_root => fatal("cannot determine effective uid"),
        None => warn!("Cannot determine effective uid"),
    }

    let snapshot = collector.collect_snapshot();
    info!("Snapshot: {}", describe_snapshot(&snapshot));
    for source in snapshot.unavailable_sources() {
        debug!("Unavailable: {}", source);
    }

    if let Some(ref path) = args.sysctl_out {
        match snapshot.sysctl.data() {
            Some(sysctl) => match write_sysctl_listing(path, sysctl) {
                Ok(()) => info!("Sysctl listing written to {}", path.display()),
                Err(e) => fatal(&format!("cannot write {}: {}", path.display(), e)),
            },
            None => warn!("sysctl unavailable, {} not written", path.display()),
        }
    }

    if args.stdout {
        match render_document(&snapshot, args.compact) {
            Ok(document) => println!("{}", document),
            Err(e) => fatal(&e.to_string()),
        }
        return;
    }

    let hostname = collector.hostname();
    let timestamp = Utc::now().timestamp();
    match write_document(&args.output_dir, &hostname, timestamp, &snapshot, args.compact) {
        Ok(path) => println!("Generated audit file: {}", path.display()),
        Err(e) => fatal(&format!(
            "cannot write audit file to {}: {}",
            args.output_dir.display(),
            e
        )),
    }
}
