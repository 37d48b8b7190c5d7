use crate::config::{LogLevel, LoggingConfig};
use rives_types::{RivesError, RivesResult};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Debug, Default)]
pub struct LogOptions {
    pub level: LogLevel,
    pub verbose: u8,
    pub quiet: bool,
    pub file: Option<PathBuf>,
}

impl LogOptions {
    pub fn from_config(config: &LoggingConfig, verbose: u8, quiet: bool, file: Option<PathBuf>) -> Self {
        Self {
            level: config.level,
            verbose,
            quiet,
            file: file.or_else(|| config.file.clone()),
        }
    }

    /// `RUST_LOG` takes precedence over this.
    pub fn filter(&self) -> String {
        if self.quiet {
            return "warn".to_string();
        }
        match self.verbose {
            0 => self.level.to_string(),
            1 => "info,rives_client=debug,rives_dash=debug".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

/// Installs the global subscriber: stdout, or the log file when one is set.
pub fn init_logging(options: &LogOptions) -> RivesResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.filter()));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if let Some(ref log_file) = options.file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .map_err(|e| RivesError::Io(format!("Failed to open log file {:?}: {}", log_file, e)))?;
        let file_layer = fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false);
        subscriber.with(file_layer).try_init()
    } else {
        let stdout_layer = fmt::layer().with_target(options.verbose >= 2);
        subscriber.with(stdout_layer).try_init()
    };

    result.map_err(|e| RivesError::Config(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_levels() {
        let mut options = LogOptions::default();
        assert_eq!(options.filter(), "info");

        options.level = LogLevel::Error;
        assert_eq!(options.filter(), "error");

        options.verbose = 2;
        assert_eq!(options.filter(), "debug");

        options.verbose = 5;
        assert_eq!(options.filter(), "trace");

        options.quiet = true;
        assert_eq!(options.filter(), "warn");
    }

    #[test]
    fn test_cli_file_wins_over_config() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            file: Some(PathBuf::from("/tmp/config.log")),
            ..Default::default()
        };
        let options = LogOptions::from_config(&config, 0, false, Some(PathBuf::from("/tmp/cli.log")));
        assert_eq!(options.file, Some(PathBuf::from("/tmp/cli.log")));
        assert_eq!(options.filter(), "debug");

        let options = LogOptions::from_config(&config, 0, false, None);
        assert_eq!(options.file, Some(PathBuf::from("/tmp/config.log")));
    }
}
