use vigil_config::VigilConfig;

/// Warn when `VIGIL_<SECTION>*` variables exist but the section still looks
/// unconfigured, which usually means a single underscore was used.
pub fn warn_unconfigured(config: &VigilConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &VigilConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let sections = [
        (
            "Slack",
            config.slack.is_configured(),
            "VIGIL_SLACK",
            "VIGIL_SLACK__BOT_TOKEN",
        ),
        (
            "Assessor",
            config.assessor.is_configured(),
            "VIGIL_ASSESSOR",
            "VIGIL_ASSESSOR__BASE_URL",
        ),
    ];

    sections
        .into_iter()
        .filter(|(_, configured, prefix, _)| !configured && has_env_prefix(&env_keys, prefix))
        .map(|(name, _, prefix, example)| {
            format!(
                "{name} config appears default while {prefix}* env vars exist. Use double underscores (example: {example})."
            )
        })
        .collect()
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
