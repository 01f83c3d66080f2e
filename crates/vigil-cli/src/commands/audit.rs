use anyhow::Context;
use vigil_store::AuditLog;

use crate::cli::root_commands::AuditArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, to_ndjson};

/// Handle `vigil audit`.
///
/// JSON output is one array; raw output is the records as JSON Lines.
pub fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let log = AuditLog::new(ctx.state_paths().audit);
    let records = log
        .tail(args.limit)
        .with_context(|| format!("failed to read {}", log.path().display()))?;

    match flags.format {
        OutputFormat::Json => output(&records, flags.format),
        OutputFormat::Raw => {
            print!("{}", to_ndjson(&records)?);
            Ok(())
        }
    }
}
