//! Logging config and setup
//!
//! Logs go to stderr unless a directory is configured, in which case they are written to
//! rolling files there. Stdout is left alone because the stdio transport owns it.

mod defaults;
mod format_style;
mod log_rotation_kind;
mod parsers;

use std::path::{Path, PathBuf};

pub use format_style::FormatStyle;
pub use log_rotation_kind::LogRotationKind;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer as LayerTrait, Registry};

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "level")]
    pub level: Level,

    /// Directory to write log files to. Logs go to stderr when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Log file rotation period to use when a log directory is configured
    /// [default: Hourly]
    #[serde(default = "defaults::default_rotation")]
    pub rotation: LogRotationKind,

    #[serde(default)]
    pub format: FormatStyle,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::default_rotation(),
            format: FormatStyle::default(),
        }
    }
}

/// A formatting layer for the registry
pub type BoxedLayer = Box<dyn LayerTrait<Registry> + Send + Sync>;

impl Logging {
    /// Build the formatting layer for the configured destination.
    ///
    /// The returned guard flushes buffered file output and must be held for as long as
    /// logging is needed.
    pub fn layer(&self) -> (BoxedLayer, Option<WorkerGuard>) {
        match self.path.as_deref().and_then(|path| self.file_writer(path)) {
            Some((writer, guard)) => (self.layer_with_writer(writer, false), Some(guard)),
            None => (
                self.layer_with_writer(BoxMakeWriter::new(std::io::stderr), true),
                None,
            ),
        }
    }

    /// Build the formatting layer around an explicit writer.
    pub fn layer_with_writer<W>(&self, writer: W, ansi: bool) -> BoxedLayer
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);

        match self.format {
            FormatStyle::Full => layer.boxed(),
            FormatStyle::Compact => layer.compact().boxed(),
            FormatStyle::Json => layer.json().boxed(),
            FormatStyle::Pretty => layer.pretty().boxed(),
        }
    }

    fn file_writer(&self, path: &Path) -> Option<(BoxMakeWriter, WorkerGuard)> {
        let appender = std::fs::create_dir_all(path)
            .map_err(|e| e.to_string())
            .and_then(|_| {
                RollingFileAppender::builder()
                    .rotation(self.rotation.clone().into())
                    .filename_prefix(defaults::LOG_FILE_PREFIX)
                    .filename_suffix("log")
                    .build(path)
                    .map_err(|e| e.to_string())
            });

        match appender {
            Ok(appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                Some((BoxMakeWriter::new(non_blocking), guard))
            }
            Err(e) => {
                eprintln!(
                    "Failed to set up log files in {}: {e}. Falling back to stderr",
                    path.display()
                );
                None
            }
        }
    }

    /// The filter for the configured level, extended by `RUST_LOG` directives.
    pub fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        if self.level == Level::INFO {
            env_filter = env_filter.add_directive("rmcp=warn".parse()?);
        }
        Ok(env_filter)
    }
}

fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}
