use super::{fatal, fatal_error};
use crate::{
    api::Taiga,
    libs::{
        config::Config,
        dedup::DedupStore,
        journal::FileJournal,
        messages::Message,
        sync::Syncer,
    },
};
use anyhow::Result;
use std::path::Path;

pub async fn cmd(input: &Path, log_dir: &Path) -> Result<()> {
    let journal = FileJournal::new(log_dir);

    let config = Config::read().map_err(|e| fatal(&journal, Message::ConfigLoadFailed(e.to_string())))?;
    let taiga = Taiga::new(&config.taiga).map_err(|e| fatal(&journal, Message::ConfigLoadFailed(e.to_string())))?;

    let syncer = Syncer::new(&taiga, &journal, DedupStore::new(log_dir));
    let summary = syncer.run(&config, input).await.map_err(|e| fatal_error(&journal, e))?;
    tracing::debug!(?summary, "sync finished");

    Ok(())
}
