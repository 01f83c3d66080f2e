use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vigil once`: one iteration, then print the report.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut monitor = ctx.monitor().await?;
    let report = monitor.run_once().await;
    tracing::info!(
        scanned = report.scanned,
        processed = report.runs.len(),
        "iteration complete"
    );
    output(&report, flags.format)
}
