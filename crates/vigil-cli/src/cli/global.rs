use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Compact JSON, one document per line.
    Raw,
}

/// Flags command handlers consult after logging is set up.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
}
