// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2md::output::{deliver, plan_database, plan_page, OutputPlan, OutputReport};
use notion2md::{
    AppError, CommandLineInput, ConversionConfig, ConversionMode, Converter, LogDiagnostics,
    NotionHttpClient,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Builds the logging configuration.
///
/// The root logger always passes debug records so the file appender sees
/// everything; `verbose` only controls what reaches stderr. Stdout is left
/// to the converted Markdown.
fn log_config(verbose: bool, log_file_path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    Ok(config)
}

/// Sets up logging to stderr and `$TMPDIR/notion2md.log`.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_file_path = std::env::temp_dir().join("notion2md.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    log4rs::init_config(log_config(verbose, &log_file_path)?)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Fetch, render, deliver.
fn run(config: &ConversionConfig) -> Result<OutputReport, AppError> {
    let client = NotionHttpClient::new(&config.api_key)?;
    let converter = Converter::new(client).with_diagnostics(Arc::new(LogDiagnostics));
    let root_id = config.notion_id.to_hyphenated();

    let plan: OutputPlan = match &config.mode {
        ConversionMode::Page => {
            let markdown = converter.convert(&root_id, config.include_frontmatter)?;
            plan_page(markdown, config.output.as_deref())
        }
        ConversionMode::Database(query) => {
            let pages = converter.export_database(&root_id, query, config.include_frontmatter)?;
            plan_database(pages, config.output.as_deref())
        }
    };

    let report = deliver(plan)?;
    if !report.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: report.failure_messages(),
        });
    }
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = ConversionConfig::resolve(cli).context("Invalid configuration")?;
    log::debug!("Resolved configuration: {:?}", config);

    let report = run(&config)
        .with_context(|| format!("Failed to convert {}", config.notion_id))?;
    for path in report.written_files() {
        eprintln!("✓ Markdown saved to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(verbose: bool) -> Config {
        let path = std::env::temp_dir().join(format!("notion2md-log-{}.log", uuid::Uuid::new_v4()));
        let config = log_config(verbose, &path).unwrap();
        let _ = fs::remove_file(path);
        config
    }

    #[test]
    fn test_root_passes_info_records_without_verbose() {
        let config = config_for(false);
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert!(LevelFilter::Info <= config.root().level());
    }

    #[test]
    fn test_verbosity_is_filtered_per_appender() {
        for verbose in [false, true] {
            let config = config_for(verbose);
            assert_eq!(config.root().level(), LevelFilter::Debug);
            let names: Vec<_> = config.appenders().iter().map(|a| a.name()).collect();
            assert_eq!(names, ["stderr", "file"]);
            assert!(config.appenders().iter().all(|a| a.filters().len() == 1));
        }
    }
}
