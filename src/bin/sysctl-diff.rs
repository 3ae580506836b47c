//! sysctl-diff - compares kernel parameters of two hosts.
//!
//! Each input is a `sysctl -a` listing or a sysaudit JSON document. Prints
//! one `KEY (OLD => NEW)` line per shared key whose value differs.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, debug, error};
use tracing_subscriber::EnvFilter;

use sysaudit::collector::RealFs;
use sysaudit::diff::{diff, load_sysctl_map};

/// Reports sysctl keys whose values differ between two hosts.
#[derive(Parser)]
#[command(
    name = "sysctl-diff",
    about = "Report sysctl keys whose values differ between two hosts",
    version
)]
struct Args {
    /// Baseline: sysctl listing or audit document.
    old: PathBuf,

    /// Comparison: sysctl listing or audit document.
    new: PathBuf,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr, at warn level by default.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    for target in ["sysaudit", "sysctl_diff"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let fs = RealFs::new();
    let mut maps = Vec::with_capacity(2);
    for path in [&args.old, &args.new] {
        match load_sysctl_map(&fs, path) {
            Ok(map) => {
                debug!("{}: {} keys", path.display(), map.len());
                maps.push(map);
            }
            Err(e) => {
                error!("{}", e);
                eprintln!("sysctl-diff: {}", e);
                std::process::exit(1);
            }
        }
    }

    let entries = diff(&maps[0], &maps[1]);
    debug!("{} shared keys differ", entries.len());

    let mut out = io::stdout().lock();
    for entry in entries {
        if writeln!(out, "{}", entry).is_err() {
            // Reader went away (e.g. piped into `head`).
            break;
        }
    }
}
