// keyval/src/main.rs

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::debug;

use keyval::{report::ReportFormat, settings, RunStatus, Settings};

#[derive(Parser)]
#[command(name = "keyval", version, about = "Validate keyed groups of JSON files against JSON Schemas")]
struct Args {
    /// Space-separated `key:path` list of JSON documents
    #[arg(long)]
    key_and_file: Option<String>,
    /// Space-separated `key:path` list of schemas (may be shorter than the file list)
    #[arg(long)]
    key_and_schema: Option<String>,
    /// Directory that token paths are relative to (default: current dir)
    #[arg(long)]
    base_dir: Option<PathBuf>,
    /// Settings file (default: ./keyval.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report format: log | actions
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
}

impl Args {
    fn overlay(&self) -> Settings {
        Settings {
            key_and_file: self.key_and_file.clone(),
            key_and_schema: self.key_and_schema.clone(),
            base_dir: self.base_dir.clone(),
            format: self.format,
            log_filter: None,
        }
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = std::env::var("RUST_LOG").ok()
        .or_else(|| filter.map(str::to_string))
        .unwrap_or_else(|| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let cfg = match settings::load(args.config.as_deref(), &args.overlay()) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(None);
            let format = args.format.unwrap_or_default();
            format.reporter().failed(&format!("Failed build: {e:#}"));
            return ExitCode::FAILURE;
        }
    };
    init_tracing(cfg.log_filter.as_deref());
    let reporter = cfg.format().reporter();

    match execute(&cfg, reporter.as_ref()).await {
        Ok(status) => {
            debug!(?status, "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.failed(&format!("Failed build: {e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn execute(cfg: &Settings, reporter: &dyn keyval::Reporter) -> anyhow::Result<RunStatus> {
    let inputs = cfg.inputs()?;
    let base_dir = cfg.base_dir()?;
    let outcome = keyval::run(&inputs, &base_dir, reporter).await?;
    Ok(outcome.status())
}
