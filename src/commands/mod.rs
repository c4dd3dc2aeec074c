pub mod report;
pub mod sync;

use crate::libs::{
    config,
    journal::{FileJournal, Journal, Level},
    messages::Message,
};
use crate::{msg_error_anyhow, msg_info};
use anyhow::Result;
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Legacy single-dash spelling of `--pdf`.
const LEGACY_PDF_FLAG: &str = "-pdf";

#[derive(Debug, Parser)]
#[command(name = "taiga-sync", author, version, long_about = None)]
#[command(about = "Sync a work log into Taiga tasks, or render a monthly report")]
pub struct Cli {
    #[arg(value_name = "INPUT_FILE", help = "Work log to sync: story reference on the first line, then subject|date|start|minutes")]
    pub input: Option<PathBuf>,

    #[arg(long, value_name = "LOG_FILE", help = "Render a report from a created-tasks log instead of syncing")]
    pub pdf: Option<PathBuf>,

    #[command(flatten)]
    pub report: report::ReportArgs,

    #[arg(long, value_name = "DIR", help = "Directory for created-tasks logs and error.log [default: logs]")]
    pub log_dir: Option<PathBuf>,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Sync(PathBuf),
    Report(PathBuf),
}

impl Cli {
    /// Report mode wins when both a log file and an input file are given.
    pub fn mode(&self) -> Result<Mode> {
        match (&self.pdf, &self.input) {
            (Some(log), _) => Ok(Mode::Report(log.clone())),
            (None, Some(input)) => Ok(Mode::Sync(input.clone())),
            (None, None) => Err(msg_error_anyhow!(Message::NoInputFile)),
        }
    }

    pub async fn menu(self) -> Result<()> {
        let log_dir = config::log_dir(self.log_dir.clone(), |key| env::var(key).ok());
        let mode = match self.mode() {
            Ok(mode) => mode,
            Err(_) => {
                let err = fatal(&FileJournal::new(&log_dir), Message::NoInputFile);
                msg_info!(Message::Usage);
                return Err(err);
            }
        };

        match mode {
            Mode::Sync(input) => sync::cmd(&input, &log_dir).await,
            Mode::Report(log_file) => report::cmd(&log_file, &self.report, &log_dir).await,
        }
    }
}

/// Rewrites `-pdf` to `--pdf` so clap accepts the legacy spelling.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg.to_str() == Some(LEGACY_PDF_FLAG) { OsString::from("--pdf") } else { arg })
        .collect()
}

/// Journals a fatal condition and hands it back for the exit path.
fn fatal(journal: &dyn Journal, message: Message) -> anyhow::Error {
    journal.error(message.clone());
    msg_error_anyhow!(message)
}

/// Journals a fatal error that already carries its own wording.
fn fatal_error<E>(journal: &dyn Journal, error: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    journal.record(Level::Error, &error.to_string());
    error.into()
}
