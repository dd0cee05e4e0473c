use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "kiln_mesh=debug,wgpu=warn"). When absent, `RUST_LOG` is consulted, then
/// `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Debug output for the kiln crates, warnings for everything else.
    pub fn verbose() -> Self {
        Self {
            env_filter: Some("warn,kiln_mesh=debug,kiln_engine=debug,kiln_inspect=debug".to_string()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored, as is the case where another logger was
/// installed first.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            log::debug!("a logger is already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_logs_info() {
        let config = LoggingConfig::default();
        assert!(config.env_filter.is_none());
        assert_eq!(config.default_level, log::LevelFilter::Info);
    }

    #[test]
    fn verbose_config_targets_kiln_crates() {
        let filter = LoggingConfig::verbose().env_filter.unwrap();
        assert!(filter.contains("kiln_mesh=debug"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::verbose());
    }
}
