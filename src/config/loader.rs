use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::defaults::{CONFIG_SECTION, QueryConfig};

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the configuration file at `path`, layering `POKT_*` environment
/// variables on top. A commented default file is written first if `path`
/// does not exist yet.
pub fn load_configuration(path: &Path) -> Result<Config> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix("POKT").prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")
}

/// Reads the `[client]` section into a [`QueryConfig`]. A missing section
/// yields the defaults.
pub fn load_query_config(path: &Path) -> Result<QueryConfig> {
    let cfg = load_configuration(path)?;
    match cfg.get::<QueryConfig>(CONFIG_SECTION) {
        Ok(query_config) => Ok(query_config),
        Err(config::ConfigError::NotFound(_)) => Ok(QueryConfig::default()),
        Err(e) => Err(e).context("Could not read client configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::DEFAULT_GATEWAY_URL;

    #[test]
    fn test_creates_default_config_when_missing() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        let query_config = load_query_config(&path).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), get_default_config());
        assert_eq!(query_config.gateway_url(), DEFAULT_GATEWAY_URL);
        assert_eq!(query_config.request_timeout_secs, None);
    }

    #[test]
    fn test_reads_client_section() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        write_config_to(
            &path,
            "[client]\ngateway_url = \"http://localhost:8081\"\nrequest_timeout_secs = 12\n",
        )
        .unwrap();

        let query_config = load_query_config(&path).unwrap();

        assert_eq!(query_config.gateway_url(), "http://localhost:8081");
        assert_eq!(query_config.request_timeout_secs, Some(12));
    }

    #[test]
    fn test_file_without_client_section_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        write_config_to(&path, "[other]\nkey = 1\n").unwrap();

        let query_config = load_query_config(&path).unwrap();

        assert_eq!(query_config, QueryConfig::default());
    }
}
