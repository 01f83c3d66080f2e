use vigil_config::VigilConfig;

/// Load `.env` (if present) and the layered configuration.
pub fn load_config() -> anyhow::Result<VigilConfig> {
    VigilConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
