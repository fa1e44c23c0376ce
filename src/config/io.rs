use super::defaults;
use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!(
                page_budget = cfg.page_budget,
                normalize = cfg.normalize,
                "Parsed configuration from disk"
            );
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

/// Parse the sectioned TOML layout into an [`AppConfig`].
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("parsing config TOML")?;
    let mut config = AppConfig::from(tables);
    if config.page_budget == 0 {
        warn!(
            fallback = defaults::default_page_budget(),
            "page_budget must be positive; using default"
        );
        config.page_budget = defaults::default_page_budget();
    }
    Ok(config)
}

/// Render `config` in the same sectioned layout [`parse_config`] reads.
pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("serializing config TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").expect("empty TOML is valid");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_budget, 3000);
        assert!(config.normalize);
    }

    #[test]
    fn reads_sectioned_layout() {
        let config = parse_config(
            r#"
            [reading]
            page_budget = 5000
            normalize = false

            [storage]
            cache_dir = "/tmp/bookmarks"

            [logging]
            log_level = "warn"
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.page_budget, 5000);
        assert!(!config.normalize);
        assert_eq!(config.cache_dir, "/tmp/bookmarks");
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn zero_budget_is_replaced() {
        let config = parse_config("[reading]\npage_budget = 0\n").expect("config should parse");
        assert_eq!(config.page_budget, 3000);
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = AppConfig {
            page_budget: 4200,
            normalize: false,
            cache_dir: "books-cache".to_string(),
            log_level: LogLevel::Debug,
        };
        let text = serialize_config(&config).expect("config should serialize");
        assert!(text.contains("[reading]"));
        assert_eq!(parse_config(&text).expect("config should parse"), config);
    }

    #[test]
    fn missing_or_invalid_file_falls_back() {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("gutenberg-reader-config-{nonce}.toml"));
        assert_eq!(load_config(&path), AppConfig::default());

        fs::write(&path, "[reading\npage_budget = ").expect("write temp config");
        assert_eq!(load_config(&path), AppConfig::default());

        fs::write(&path, "[reading]\npage_budget = 1234\n").expect("write temp config");
        assert_eq!(load_config(&path).page_budget, 1234);

        let _ = fs::remove_file(&path);
    }
}
