pub mod cleanup;
pub mod entries;
pub mod export;
pub mod parse;
pub mod records;
pub mod stats;
pub mod version;

use medlog_core::Config;
use medlog_extract::{ClaudeClient, Extractor};
use medlog_service::{EntryService, ParserService};
use medlog_store::{normalize_user, Paths};
use std::path::PathBuf;
use tracing::warn;

/// What every command needs: where data lives, settings, and whose data it is
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub user: String,
}

impl Context {
    pub fn new(data_dir: Option<PathBuf>, user: &str) -> anyhow::Result<Self> {
        let paths = match data_dir {
            Some(dir) => Paths::from_dir(dir),
            None => Paths::new()?,
        };
        let config = Config::load(&paths.config_file());
        Ok(Self {
            paths,
            config,
            user: normalize_user(user),
        })
    }

    pub fn entry_service(&self) -> EntryService {
        EntryService::new(self.paths.clone())
    }

    pub fn parser_service(&self) -> anyhow::Result<ParserService> {
        if self.config.llm.api_key.is_empty() {
            warn!("CLAUDE_API_KEY is not set, records will come from the heuristic fallback");
        }
        let client = ClaudeClient::new(&self.config.llm)?;
        let extractor = Extractor::new(client, self.config.llm.max_tokens);
        Ok(ParserService::new(
            self.paths.clone(),
            Box::new(extractor),
            self.config.batch_size,
        ))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Context;
    use medlog_core::Config;
    use medlog_store::Paths;
    use tempfile::TempDir;

    /// Context over a fresh temp dir with no API key, so extraction falls back
    pub fn context(temp: &TempDir, user: &str) -> Context {
        Context {
            paths: Paths::from_dir(temp.path()),
            config: Config::new(),
            user: user.to_string(),
        }
    }
}
