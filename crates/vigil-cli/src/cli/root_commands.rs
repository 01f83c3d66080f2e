use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Monitor the configured channel until interrupted.
    Run,
    /// Run a single monitoring iteration and print what happened.
    Once,
    /// List targets already processed for the channel.
    Seen,
    /// Show the most recent audit records for the channel.
    Audit(AuditArgs),
    /// Parse an assessment from a file (or stdin) and show the alert decision.
    Parse(ParseArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Number of records to show.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// File holding the assessment text. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}
