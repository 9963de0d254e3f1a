// src/config.rs
use crate::api::DatabaseQuery;
use crate::constants::NOTION_TOKEN_ENV;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page/database URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Treat the input as a database and convert every row
    #[arg(short, long, default_value_t = false)]
    pub database: bool,

    /// Prepend YAML frontmatter built from page metadata
    #[arg(short, long, default_value_t = false)]
    pub frontmatter: bool,

    /// Output file (page mode) or directory (database mode); stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Database filter object as JSON (database mode only)
    #[arg(long)]
    pub filter: Option<String>,

    /// Database sorts array as JSON (database mode only)
    #[arg(long)]
    pub sorts: Option<String>,

    /// Notion integration token; falls back to the NOTION_TOKEN environment variable
    #[arg(long)]
    pub token: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// What to convert.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionMode {
    Page,
    Database(DatabaseQuery),
}

/// Resolved configuration, validated and ready to drive a conversion.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub notion_id: NotionId,
    pub api_key: ApiKey,
    pub mode: ConversionMode,
    pub include_frontmatter: bool,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl ConversionConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let env_token = std::env::var(NOTION_TOKEN_ENV).ok();
        Self::resolve_with_token(cli, env_token)
    }

    /// Resolves configuration with an explicit fallback token.
    pub fn resolve_with_token(
        cli: CommandLineInput,
        env_token: Option<String>,
    ) -> Result<Self, AppError> {
        let token = cli.token.or(env_token).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "no --token given and {} environment variable not set",
                NOTION_TOKEN_ENV
            ))
        })?;
        let api_key = ApiKey::new(token)?;
        let notion_id = NotionId::parse(&cli.notion_input)?;

        let mode = if cli.database {
            let mut query = DatabaseQuery::new();
            if let Some(filter) = cli.filter.as_deref() {
                query = query.with_filter(parse_json("--filter", filter)?);
            }
            if let Some(sorts) = cli.sorts.as_deref() {
                query = query.with_sorts(parse_json("--sorts", sorts)?);
            }
            ConversionMode::Database(query)
        } else {
            if cli.filter.is_some() || cli.sorts.is_some() {
                return Err(AppError::InvalidQuery(
                    "--filter and --sorts require --database".to_string(),
                ));
            }
            ConversionMode::Page
        };

        Ok(ConversionConfig {
            notion_id,
            api_key,
            mode,
            include_frontmatter: cli.frontmatter,
            output: cli.output.map(PathBuf::from),
            verbose: cli.verbose,
        })
    }
}

fn parse_json(flag: &str, raw: &str) -> Result<Value, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::InvalidQuery(format!("{} is not valid JSON: {}", flag, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "secret_abcdefghijklmnopqrstuvwxyz";
    const PAGE: &str = "https://www.notion.so/acme/Roadmap-550e8400e29b41d4a716446655440000";

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::parse_from(std::iter::once("notion2md").chain(args.iter().copied()))
    }

    #[test]
    fn test_page_mode_with_env_token() {
        let config =
            ConversionConfig::resolve_with_token(parse(&[PAGE, "-f"]), Some(TOKEN.to_string()))
                .unwrap();
        assert_eq!(config.notion_id.as_str(), "550e8400e29b41d4a716446655440000");
        assert_eq!(config.mode, ConversionMode::Page);
        assert!(config.include_frontmatter);
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_flag_token_wins_over_env() {
        let config = ConversionConfig::resolve_with_token(
            parse(&[PAGE, "--token", "ntn_fromflag_abcdefghijkl"]),
            Some(TOKEN.to_string()),
        )
        .unwrap();
        assert_eq!(config.api_key.as_str(), "ntn_fromflag_abcdefghijkl");
    }

    #[test]
    fn test_missing_token() {
        let err = ConversionConfig::resolve_with_token(parse(&[PAGE]), None).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn test_database_query_flags() {
        let config = ConversionConfig::resolve_with_token(
            parse(&[
                PAGE,
                "--database",
                "--filter",
                r#"{"property":"Done","checkbox":{"equals":true}}"#,
                "--sorts",
                r#"[{"timestamp":"created_time","direction":"ascending"}]"#,
                "-o",
                "out",
            ]),
            Some(TOKEN.to_string()),
        )
        .unwrap();

        let expected = DatabaseQuery::new()
            .with_filter(json!({ "property": "Done", "checkbox": { "equals": true } }))
            .with_sorts(json!([{ "timestamp": "created_time", "direction": "ascending" }]));
        assert_eq!(config.mode, ConversionMode::Database(expected));
        assert_eq!(config.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_query_flags_need_database_mode() {
        let err = ConversionConfig::resolve_with_token(
            parse(&[PAGE, "--filter", "{}"]),
            Some(TOKEN.to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidQuery(_)));
    }

    #[test]
    fn test_invalid_filter_json() {
        let err = ConversionConfig::resolve_with_token(
            parse(&[PAGE, "--database", "--filter", "{oops"]),
            Some(TOKEN.to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidQuery(_)));
    }

    #[test]
    fn test_invalid_id() {
        let err = ConversionConfig::resolve_with_token(parse(&["nope"]), Some(TOKEN.to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
