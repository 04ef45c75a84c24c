use std::sync::Once;

/// Timestamp precision prefixed to each log line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TimestampPrecision {
    None,
    Seconds,
    Millis,
    #[default]
    Micros,
    Nanos,
}

impl TimestampPrecision {
    fn to_env_logger(self) -> Option<env_logger::TimestampPrecision> {
        match self {
            Self::None => None,
            Self::Seconds => Some(env_logger::TimestampPrecision::Seconds),
            Self::Millis => Some(env_logger::TimestampPrecision::Millis),
            Self::Micros => Some(env_logger::TimestampPrecision::Micros),
            Self::Nanos => Some(env_logger::TimestampPrecision::Nanos),
        }
    }
}

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "tempus_time=debug"). Timer state transitions log at `debug`, stopwatch
/// brackets at `trace`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub timestamps: TimestampPrecision,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: TimestampPrecision::default(),
        }
    }
}

impl LoggingConfig {
    /// Builds the `env_logger` builder without installing it.
    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &self.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(self.write_style);
        builder.format_timestamp(self.timestamps.to_env_logger());
        builder
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // Another logger may already be installed (e.g. by a test harness).
        if config.builder().try_init().is_err() {
            return;
        }
        log::debug!("logging initialized ({:?} timestamps)", config.timestamps);
    });
}
