pub mod kv_console_encoder;

use std::path::Path;

use anyhow::{Context, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::kv_console_encoder::KvConsoleEncoderDeserializer;

const EXTERNAL_CONFIG_PATH: &str = "log4rs.yml";

fn deserializers() -> Deserializers {
    let mut deserializers = Deserializers::default();
    deserializers.insert("kv_console", KvConsoleEncoderDeserializer);
    deserializers
}

/// Initializes logging for the binary.
///
/// A `log4rs.yml` in the working directory takes precedence; otherwise the
/// embedded default configuration is used. The library itself never calls
/// this.
pub fn init_logging() -> anyhow::Result<()> {
    let path = Path::new(EXTERNAL_CONFIG_PATH);

    if path.exists() {
        log4rs::init_file(path, deserializers())
            .with_context(|| format!("Failed to load external {EXTERNAL_CONFIG_PATH}"))?;
        info!(path = EXTERNAL_CONFIG_PATH; "Logging initialized from external configuration");
        return Ok(());
    }

    log4rs::init_config(embedded_config()?).context("Failed to initialize logging from embedded config")?;

    debug!("Logging initialized from embedded defaults (no external log4rs.yml found)");
    Ok(())
}

fn embedded_config() -> anyhow::Result<Config> {
    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig = serde_yaml::from_str(yaml_content).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers());
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {:?}", errors));
    }

    Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        assert!(embedded_config().is_ok());
    }
}
