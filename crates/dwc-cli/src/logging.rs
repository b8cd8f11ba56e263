//! Logging setup via `tracing` and `tracing-subscriber`.
//!
//! All diagnostics go through `tracing`; this module only decides where they
//! land (stderr or a file) and how they are formatted (pretty, compact, or
//! JSON for machine parsing). `RUST_LOG` takes precedence when no explicit
//! verbosity flag was given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, registry, util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override the level when set.
    pub use_env_filter: bool,
    pub format: LogFormat,
    /// When set, logs append to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            format: LogFormat::default(),
            log_file: None,
            with_ansi: true,
        }
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let filter = build_filter(config);
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            install(config, filter, Arc::new(file));
        }
        None => install(config, filter, io::stderr),
    }
    Ok(())
}

fn install<W>(config: &LogConfig, filter: EnvFilter, writer: W)
where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(writer).with_target(true);
            registry().with(filter).with(layer).init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(false)
                .without_time();
            registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(false)
                .without_time();
            registry().with(filter).with(layer).init();
        }
    }
}

/// Build the filter: `RUST_LOG` wins when allowed, otherwise our crates log
/// at the requested level and external crates stay at warn to reduce noise.
fn build_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    let level = config.level_filter.to_string().to_lowercase();
    EnvFilter::new(format!(
        "warn,dwc_cli={level},dwc_ingest={level},dwc_linkage={level},\
         dwc_model={level},dwc_taxonomy={level},dwc_validate={level}",
    ))
}
