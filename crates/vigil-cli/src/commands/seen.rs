use serde::Serialize;
use vigil_core::entities::SeenEntry;
use vigil_store::SeenStore;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SeenResponse<'a> {
    channel: &'a str,
    path: String,
    count: usize,
    entries: Vec<&'a SeenEntry>,
}

/// Handle `vigil seen`.
///
/// Opening the store applies retention pruning, so the listing matches what
/// the next iteration will consider already processed.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let paths = ctx.state_paths();
    let store = SeenStore::open(&paths.seen, ctx.config.monitor.retention());

    let entries: Vec<&SeenEntry> = store.entries().collect();
    output(
        &SeenResponse {
            channel: &ctx.channel_id,
            path: store.path().display().to_string(),
            count: entries.len(),
            entries,
        },
        flags.format,
    )
}
