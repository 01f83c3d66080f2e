use anyhow::Context;

use crate::context::AppContext;

/// Handle `vigil run`: poll until Ctrl-C.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let mut monitor = ctx.monitor().await?;
    tracing::info!(
        channel = %ctx.channel_id,
        poll_secs = monitor.settings().poll_interval.as_secs(),
        "monitor started"
    );

    tokio::select! {
        () = monitor.run() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            tracing::info!("interrupted; shutting down");
        }
    }

    Ok(())
}
