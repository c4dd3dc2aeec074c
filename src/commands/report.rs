use super::fatal;
use crate::{
    api::{Taiga, TaskTracker},
    libs::{
        config::Config,
        journal::{FileJournal, Journal},
        messages::Message,
        render::ReportFormat,
        report::{output_path, ActivityReport},
    },
};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    #[arg(long, value_enum, default_value_t = ReportFormat::Pdf, help = "Report file format")]
    pub format: ReportFormat,

    #[arg(long, help = "Author shown in the report; without it the name is taken from the Taiga account")]
    pub author: Option<String>,
}

pub async fn cmd(log_file: &Path, args: &ReportArgs, log_dir: &Path) -> Result<()> {
    let journal = FileJournal::new(log_dir);

    let author = match &args.author {
        Some(author) => author.clone(),
        None => account_name(&journal).await?,
    };

    generate(log_file, &author, args.format, &journal)?;
    Ok(())
}

/// Renders `log_file` next to itself and returns the written path.
pub fn generate(log_file: &Path, author: &str, format: ReportFormat, journal: &dyn Journal) -> Result<PathBuf> {
    let report =
        ActivityReport::read(log_file, author).map_err(|e| fatal(journal, Message::ReportLogOpenFailed(e.to_string())))?;
    if report.is_empty() {
        journal.warning(Message::ReportNoEntries(log_file.display().to_string()));
    }

    let output = output_path(log_file, format.extension());
    format
        .renderer()
        .render(&report, &output)
        .map_err(|e| fatal(journal, Message::ReportFailed(e.to_string())))?;

    journal.success(Message::ReportGenerated(output.display().to_string()));
    Ok(output)
}

/// Display name of the configured Taiga account, or the login when the
/// account has none.
async fn account_name(journal: &dyn Journal) -> Result<String> {
    let config = Config::read().map_err(|e| fatal(journal, Message::ConfigLoadFailed(e.to_string())))?;
    let taiga = Taiga::new(&config.taiga).map_err(|e| fatal(journal, Message::ConfigLoadFailed(e.to_string())))?;

    let session = taiga
        .authenticate(&config.username, &config.password)
        .await
        .map_err(|e| fatal(journal, Message::AuthFailed(e.to_string())))?;
    journal.info(Message::AuthSuccess);

    if session.display_name.trim().is_empty() {
        Ok(config.username)
    } else {
        Ok(session.display_name)
    }
}
