//! Common utilities and helper functions shared across commands.

use std::path::Path;

use tracing::debug;

use crate::{
    core::{build_client, fetch_first, write_string, Config, CsvTable},
    picks::PickStore,
    schedule::Schedule,
    storage::PickDatabase,
    Result,
};

/// Resources most commands need, resolved once from the environment.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    /// Open the on-disk pick store.
    pub fn open_store(&self) -> Result<PickStore<PickDatabase>> {
        debug!(path = %self.config.database_path.display(), "opening picks database");
        let db = PickDatabase::open(&self.config.database_path)?;
        Ok(PickStore::new(db))
    }

    /// Fetch the schedule from the first source that loads. Command-line
    /// sources win over configured ones.
    pub async fn load_schedule(&self, cli_sources: &[String]) -> Result<Schedule> {
        let sources = self.config.sources_or_default(cli_sources);
        let client = build_client()?;
        let (source, body) = fetch_first(&client, &sources, self.config.fetch_timeout).await?;

        let schedule = Schedule::from_table(&CsvTable::parse(&body));
        debug!(%source, games = schedule.len(), "schedule loaded");
        Ok(schedule)
    }
}

/// Read and parse a local CSV file.
pub fn read_table(path: &Path) -> Result<CsvTable> {
    let text = std::fs::read_to_string(path)?;
    Ok(CsvTable::parse(&text))
}

pub fn read_tables(paths: &[impl AsRef<Path>]) -> Result<Vec<CsvTable>> {
    paths.iter().map(|p| read_table(p.as_ref())).collect()
}

/// Write a table as CSV, creating parent directories.
pub fn write_table(path: &Path, table: &CsvTable) -> Result<()> {
    write_string(path, &table.to_csv_string()?)?;
    Ok(())
}
