//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use satfusion_core::config::{CliConfigOverrides, LayeredConfig, DEFAULT_CONFIG_FILE};

use crate::cli::{Cli, Commands};

/// Resolve configuration: defaults, then file, then environment, then flags.
///
/// An explicit `--config` file must exist; the default `satfusion.toml` is
/// only read when present in the working directory.
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match &cli.config {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => config
            .load_from_file_if_present(DEFAULT_CONFIG_FILE)
            .context("Failed to load configuration file")?,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(cli_overrides(cli));

    tracing::debug!(
        api_url = %config.api_url.value,
        api_url_source = ?config.api_url.source,
        timeout_secs = config.request_timeout_secs.value,
        "Configuration resolved"
    );

    Ok(config)
}

fn cli_overrides(cli: &Cli) -> CliConfigOverrides {
    let cloud_cover_max = match &cli.command {
        Commands::Analyze(args) => args.request.cloud_cover_max,
        Commands::Scenes(args) | Commands::Merge(args) => args.cloud_cover_max,
        _ => None,
    };

    CliConfigOverrides {
        api_url: cli.api_url.clone(),
        cloud_cover_max,
        request_timeout_secs: cli.timeout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use satfusion_core::config::ConfigSource;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://file-host:9000\"\ncloud_cover_max = 40").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "satfusion",
            "analyze",
            "--config",
            &path,
            "--cloud-cover-max",
            "10",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.api_url.value, "http://file-host:9000");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.cloud_cover_max.value, 10);
        assert_eq!(config.cloud_cover_max.source, ConfigSource::Cli);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_fails() {
        let cli =
            Cli::try_parse_from(["satfusion", "config", "--config", "/nonexistent/satfusion.toml"])
                .unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    #[serial]
    fn test_timeout_flag() {
        let cli = Cli::try_parse_from(["satfusion", "health", "--timeout", "7"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.request_timeout_secs.value, 7);
        assert_eq!(config.request_timeout_secs.source, ConfigSource::Cli);
    }
}
