use pinpoint_dns_domain::{CliOverrides, Config, OverrideType};

/// Load, override and validate the configuration file.
///
/// Runs before logging is initialised, so problems found here go to stderr.
pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    Ok(config)
}

/// Record types in `config` that will never answer a query.
pub fn unsupported_record_types(config: &Config) -> Vec<&OverrideType> {
    config
        .records
        .iter()
        .map(|record| &record.record_type)
        .filter(|record_type| !record_type.is_supported())
        .collect()
}
