use anyhow::Result;
use aso_common::observability::{LogConfig, LogFormat, init_logging};
use aso_config::{AsoConfig, AsoConfigLoader, default_config_path};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wiring::{Wiring, build_from_config};
mod wiring;

#[derive(Debug, Parser)]
#[command(name = "aso", about = "Terminal assistant for App Store suggestions")]
struct Cli {
    /// YAML config file; defaults to ./aso.yaml or the user config dir.
    #[arg(long, env = "ASO_CONFIG")]
    config: Option<PathBuf>,

    /// Override the simulated generation latency.
    #[arg(long)]
    delay_ms: Option<u64>,

    #[arg(long, value_enum)]
    log_format: Option<CliLogFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Text,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(f: CliLogFormat) -> Self {
        match f {
            CliLogFormat::Text => LogFormat::Text,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

fn load_config(cli: &Cli) -> Result<AsoConfig> {
    let loader = match (&cli.config, default_config_path()) {
        (Some(path), _) => AsoConfigLoader::new().with_file(path),
        (None, Some(found)) => AsoConfigLoader::new().with_optional_file(found),
        (None, None) => AsoConfigLoader::new(),
    };
    let mut cfg = loader.load()?;

    if let Some(ms) = cli.delay_ms {
        cfg.generator.delay_ms = ms;
    }
    if let Some(format) = cli.log_format {
        cfg.logging.format = format.into();
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file, flags win over both)
    let cfg = load_config(&cli)?;

    // The TUI owns the terminal, so logs go to file unless stderr is asked for.
    let log_path = init_logging(LogConfig {
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
        ..LogConfig::default()
    })?;
    tracing::info!(
        log = %log_path.display(),
        version = cfg.version.as_deref().unwrap_or("unversioned"),
        delay_ms = cfg.generator.delay_ms,
        "starting aso"
    );

    let mut wiring = Wiring::new();
    build_from_config(&mut wiring, cfg).await?;

    wiring.run().await
}
