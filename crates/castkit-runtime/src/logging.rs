//! Installs a `tracing` subscriber from the `[logging]` section.
//!
//! castkit logs registry changes at `debug`, each step of a guild-wide
//! message search at `trace` and ignored settings at `warn`; the
//! `castkit_framework=trace` filter shows a search channel by channel.

use std::ffi::OsStr;
use std::path::Path;

use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};
use crate::error::{RuntimeError, RuntimeResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber, doing nothing if one is already set.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = try_init_from_config(config);
}

/// Installs the global subscriber.
pub fn try_init_from_config(config: &LoggingConfig) -> RuntimeResult<()> {
    let (writer, writer_note) = make_writer(config);
    tracing_subscriber::registry()
        .with(format_layer(config, writer))
        .with(env_filter(config))
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    if let Some(note) = writer_note {
        warn!("{note}");
    }
    #[cfg(not(feature = "json-log"))]
    {
        if config.format == LogFormat::Json {
            warn!("JSON log format requires the json-log feature, using the full format");
        }
    }
    Ok(())
}

/// The per-target filter directives, sorted by target.
///
/// Levels are normalized; entries with an unknown level are dropped.
pub fn directives(config: &LoggingConfig) -> Vec<String> {
    let mut directives: Vec<String> = config
        .filters
        .iter()
        .filter_map(|(target, level)| {
            let level = level.parse::<LogLevel>().ok()?;
            Some(format!("{target}={level}"))
        })
        .collect();
    directives.sort();
    directives
}

/// `RUST_LOG` when set, otherwise the configured level, plus the filters.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let base = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    directives(config)
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(base, EnvFilter::add_directive)
}

fn span_events(config: &SpanEventConfig) -> FmtSpan {
    [
        (config.new, FmtSpan::NEW),
        (config.enter, FmtSpan::ENTER),
        (config.exit, FmtSpan::EXIT),
        (config.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
}

fn format_layer(config: &LoggingConfig, writer: BoxMakeWriter) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_span_events(span_events(&config.span_events))
        .with_thread_ids(config.thread_ids)
        .with_file(config.file_location)
        .with_line_number(config.file_location);

    match config.format {
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        #[cfg(feature = "json-log")]
        LogFormat::Json => layer.json().boxed(),
        #[cfg(not(feature = "json-log"))]
        LogFormat::Json => layer.boxed(),
        LogFormat::Full => layer.boxed(),
    }
}

/// Picks the output, with a note when the configured one cannot be used.
fn make_writer(config: &LoggingConfig) -> (BoxMakeWriter, Option<&'static str>) {
    match (config.output, &config.file_path) {
        (LogOutput::Stdout, _) => (BoxMakeWriter::new(std::io::stdout), None),
        (LogOutput::Stderr, _) => (BoxMakeWriter::new(std::io::stderr), None),
        (LogOutput::File, Some(path)) => (
            BoxMakeWriter::new(file_appender(path, config.rotation)),
            None,
        ),
        (LogOutput::File, None) => (
            BoxMakeWriter::new(std::io::stdout),
            Some("File output requested without logging.file_path, writing to stdout"),
        ),
    }
}

fn file_appender(path: &Path, rotation: LogRotation) -> RollingFileAppender {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_else(|| OsStr::new("castkit.log"));
    let rotation = match rotation {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
    };
    RollingFileAppender::new(rotation, directory, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_are_sorted_and_normalized() {
        let mut config = LoggingConfig::default();
        config
            .filters
            .insert("castkit_framework".to_string(), "TRACE".to_string());
        config
            .filters
            .insert("castkit_core".to_string(), "warning".to_string());
        config
            .filters
            .insert("noisy".to_string(), "loud".to_string());

        assert_eq!(
            directives(&config),
            ["castkit_core=warn", "castkit_framework=trace"]
        );
    }

    #[test]
    fn test_span_events() {
        assert_eq!(span_events(&SpanEventConfig::default()), FmtSpan::NONE);

        let lifecycle = SpanEventConfig {
            new: true,
            close: true,
            ..Default::default()
        };
        assert_eq!(span_events(&lifecycle), FmtSpan::NEW | FmtSpan::CLOSE);

        let all = SpanEventConfig {
            new: true,
            enter: true,
            exit: true,
            close: true,
        };
        assert_eq!(span_events(&all), FmtSpan::FULL);
    }

    #[test]
    fn test_file_output_without_path_falls_back() {
        let config = LoggingConfig {
            output: LogOutput::File,
            ..Default::default()
        };
        let (_, note) = make_writer(&config);
        assert!(note.is_some());

        let (_, note) = make_writer(&LoggingConfig::default());
        assert!(note.is_none());
    }
}
