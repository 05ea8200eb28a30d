//! Logging for fieldcheck
//!
//! A tiny, dependency-light logger used by the validation engine and the
//! schema loader. Everything is controlled through environment variables so
//! that a host application can turn diagnostics on without touching code.
//!
//! # Usage
//!
//! ```rust
//! use fieldcheck_log::{debug, info, trace};
//!
//! debug!("validating {} fields", 3);
//! info!(target: "fieldcheck::config", "schema loaded");
//! trace!("rule {} failed", "min_length");
//! ```
//!
//! # Environment Variables
//!
//! - `FIELDCHECK_DEBUG=1` - Enable debug logging
//! - `FIELDCHECK_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level
//! - `FIELDCHECK_LOG_FORMAT=pretty|compact|json` - Output format
//! - `FIELDCHECK_LOG_COLOR=1|0` - Enable/disable colors
//! - `FIELDCHECK_LOG_TIMESTAMPS=1|0` - Include timestamps

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Levels and formats
// ============================================================================

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Nothing is emitted
    Off = 5,
}

impl Level {
    /// Upper-case level name used in every output format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable, optionally colored
    Pretty,
    /// One short line per record
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static SETTINGS: Lazy<LogSettings> = Lazy::new(LogSettings::from_env);

/// Logger settings, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Json,
            color: false,
            timestamps: true,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogSettings {
    /// Build settings from `FIELDCHECK_*` variables and publish the level
    /// to the global gate.
    ///
    /// The fallback level is `Warn` unless debug mode is switched on.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let debug = env_flag("FIELDCHECK_DEBUG").unwrap_or(defaults.debug);

        let level = env::var("FIELDCHECK_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("FIELDCHECK_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);

        let color = env_flag("FIELDCHECK_LOG_COLOR")
            .unwrap_or_else(|| env::var("NO_COLOR").is_err() && env::var("TERM").is_ok());

        let timestamps = env_flag("FIELDCHECK_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Read the environment eagerly. Otherwise this happens on first emit.
pub fn init() {
    Lazy::force(&SETTINGS);
}

/// Global settings.
pub fn settings() -> &'static LogSettings {
    &SETTINGS
}

#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime. Turning it on lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        LOG_LEVEL.store(Level::Debug as u8, Ordering::SeqCst);
    }
}

// ============================================================================
// Output
// ============================================================================

/// Write one record to stderr. Called by the macros.
#[doc(hidden)]
pub fn emit(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let settings = settings();
    match settings.format {
        Format::Pretty => emit_pretty(level, target, message, settings),
        Format::Compact => emit_compact(level, target, message, settings),
        Format::Json => emit_json(level, target, message),
    }
}

fn emit_pretty(level: Level, target: &str, message: &str, settings: &LogSettings) {
    let mut stderr = std::io::stderr().lock();

    if settings.timestamps {
        let now = chrono::Local::now();
        let _ = write!(stderr, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if settings.color {
        let _ = write!(stderr, "{:5} ", level.colored());
    } else {
        let _ = write!(stderr, "{:5} ", level.as_str());
    }

    #[cfg(not(feature = "color"))]
    let _ = write!(stderr, "{:5} ", level.as_str());

    if !target.is_empty() {
        let _ = write!(stderr, "[{}] ", target);
    }

    let _ = writeln!(stderr, "{}", message);
}

fn emit_compact(level: Level, target: &str, message: &str, settings: &LogSettings) {
    let mut stderr = std::io::stderr().lock();

    if settings.timestamps {
        let _ = write!(stderr, "{} ", chrono::Local::now().format("%H:%M:%S"));
    }

    let initial = level.as_str().chars().next().unwrap_or('?');
    let _ = writeln!(stderr, "{} {}: {}", initial, target, message);
}

#[cfg(feature = "json")]
fn emit_json(level: Level, target: &str, message: &str) {
    #[derive(serde::Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    if let Ok(line) = serde_json::to_string(&record) {
        eprintln!("{}", line);
    }
}

#[cfg(not(feature = "json"))]
fn emit_json(level: Level, target: &str, message: &str) {
    eprintln!(
        r#"{{"timestamp":"{}","level":"{}","target":{:?},"message":{:?}}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target,
        message
    );
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::emit($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::emit($level, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log at trace level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Trace, $($arg)+) };
}

/// Log at debug level.
///
/// Enabled by `FIELDCHECK_DEBUG=1` or `FIELDCHECK_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Debug, $($arg)+) };
}

/// Log at info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Info, $($arg)+) };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Warn, $($arg)+) };
}

/// Log at error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Error, $($arg)+) };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber that honors the `FIELDCHECK_*` level.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let settings = settings();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(current_level().as_str().to_lowercase()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(settings.color))
    }
}
