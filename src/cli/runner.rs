//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::LoaderConfig;
use crate::error::{Error, Result, ResultExt};
use crate::fetch::{CdnFetcher, PageFetcher};
use crate::loader::storyblok_loader;
use crate::pagination::PER_PAGE;
use crate::query::StoriesQuery;
use crate::types::Version;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Load { output, strict } => self.load(output.as_deref(), *strict).await,
            Commands::Check => self.check().await,
            Commands::Query { page } => self.query(*page),
        }
    }

    /// Build the loader config from the config file and the global flags
    pub fn loader_config(&self) -> Result<LoaderConfig> {
        let mut config = match &self.cli.config {
            Some(path) => LoaderConfig::load(path)?,
            None => LoaderConfig::default(),
        };

        if let Some(token) = &self.cli.token {
            config.access_token.clone_from(token);
        }
        if self.cli.draft {
            config.version = Version::Draft;
        }
        if let Some(content_type) = &self.cli.content_type {
            config.content_type = Some(content_type.clone());
        }

        Ok(config)
    }

    /// Config for commands that talk to the API
    fn authenticated_config(&self) -> Result<LoaderConfig> {
        let config = self.loader_config()?;
        if config.access_token.is_empty() {
            return Err(Error::missing_field(
                "access_token (set accessToken in the config file, --token or STORYBLOK_TOKEN)",
            ));
        }
        Ok(config)
    }

    /// Load every story
    async fn load(&self, output: Option<&Path>, strict: bool) -> Result<()> {
        let loader = storyblok_loader(self.authenticated_config()?);

        let stories = if strict {
            loader.try_load().await?
        } else {
            loader.load().await
        };

        let rendered = self.render(&stories)?;
        match output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                info!("Wrote {} stories to {}", stories.len(), path.display());
            }
            None => println!("{rendered}"),
        }

        Ok(())
    }

    /// Fetch a single one-story page to verify the token
    async fn check(&self) -> Result<()> {
        let config = self.authenticated_config()?;
        let fetcher = CdnFetcher::from_config(&config)?;
        let query = StoriesQuery::for_page(&config, 1, 1);

        let status = match fetcher.fetch_page(&query).await {
            Ok(_) => json!({
                "status": "SUCCEEDED",
                "message": format!("Connected to {}", config.api_base_url())
            }),
            Err(e) => json!({
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            }),
        };

        println!(
            "{}",
            self.render(&json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": status
            }))?
        );
        Ok(())
    }

    /// Print the query of a page without sending it
    fn query(&self, page: u32) -> Result<()> {
        let config = self.loader_config()?;
        let query = StoriesQuery::for_page(&config, page, PER_PAGE);

        println!("{}", self.render(&query.to_json())?);
        Ok(())
    }

    /// Serialize a value in the selected output format
    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(rendered)
    }
}
