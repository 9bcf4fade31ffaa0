use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use godecls::{scan_dir, write_json, ScanConfig};

/// List the top-level declarations of a directory of Go files as JSON
#[derive(Debug, Parser)]
#[command(name = "godecls", disable_version_flag = true)]
struct Cli {
    /// Directory of Go source files to scan
    dir: Option<PathBuf>,

    /// Print the version and exit
    #[arg(long)]
    version: bool,

    /// Exit with status 1 and report on stderr when any file fails to parse
    #[arg(long)]
    strict: bool,

    /// Leave *_test.go files out of the scan
    #[arg(long)]
    skip_tests: bool,

    /// Log scan progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            skip_tests: self.skip_tests,
            strict: self.strict,
        }
    }
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("godecls error: {error:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    if cli.version {
        println!("Version: {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let Some(dir) = cli.dir.as_deref() else {
        return Ok(0);
    };

    init_tracing(cli.verbose)?;

    let config = cli.scan_config();
    let scan = scan_dir(dir, &config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, &scan.declarations).context("failed to write declarations")?;
    out.flush().context("failed to flush stdout")?;

    if config.should_fail(scan.errors.len()) {
        for error in &scan.errors {
            eprintln!("godecls: {error}");
        }
        return Ok(1);
    }

    Ok(0)
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "off" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GODECLS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
