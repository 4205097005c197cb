use std::sync::Once;

use env_logger::fmt::TimestampPrecision;

/// Logger configuration for hosts of the fold widgets.
///
/// `env_filter` uses `env_logger` syntax, e.g. `"foldkit_ui=debug,foldkit_engine=warn"`.
/// Per-frame angle updates are logged at `trace`, so `debug` on `foldkit_ui`
/// shows recycling, capture allocation and unfold state changes without flooding.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// `None` drops the timestamp column (useful for deterministic headless runs).
    pub timestamps: Option<TimestampPrecision>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: Some(TimestampPrecision::Millis),
        }
    }
}

impl LoggingConfig {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn timestamps(mut self, precision: Option<TimestampPrecision>) -> Self {
        self.timestamps = precision;
        self
    }

    /// The filter in effect: explicit, then `RUST_LOG`, then `info`.
    fn resolved_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_owned())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger on first call; later calls do nothing.
///
/// Library crates only log through the `log` facade. Hosts call this early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolved_filter();
        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp(config.timestamps);

        // a test harness may have installed its own logger
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter {filter:?}");
        }
    });
}
