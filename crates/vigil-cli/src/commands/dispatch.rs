use crate::bootstrap;
use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::{AppContext, warn_unconfigured};

/// Dispatch a parsed command to its handler.
///
/// `parse` runs offline; every other command loads configuration and
/// resolves the Slack channel first.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Parse(args) => commands::parse::handle(&args, flags),
        Commands::Run => commands::run::handle(&app_context().await?).await,
        Commands::Once => commands::once::handle(&app_context().await?, flags).await,
        Commands::Seen => commands::seen::handle(&app_context().await?, flags),
        Commands::Audit(args) => commands::audit::handle(&args, &app_context().await?, flags),
    }
}

async fn app_context() -> anyhow::Result<AppContext> {
    let config = bootstrap::load_config()?;
    warn_unconfigured(&config);
    AppContext::init(config).await
}
