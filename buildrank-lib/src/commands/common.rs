//! Logging, color, and file-name helpers shared by the commands.

use clap::ValueEnum;
use std::io::IsTerminal;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Initialize the logger based on log level.
///
/// Only the first call in a process installs a logger; later calls are no-ops.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// File name for a table written into a CSV directory.
#[must_use]
pub fn csv_file_name(table: &str) -> String {
    // ".." first so names like "a.b" survive
    let name = table.replace("..", "__");
    format!("{}.csv", name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_file_name_plain() {
        assert_eq!(csv_file_name("Inventory"), "Inventory.csv");
        assert_eq!(csv_file_name("Build.Steps"), "Build.Steps.csv");
    }

    #[test]
    fn test_csv_file_name_strips_separators() {
        assert_eq!(csv_file_name("../etc/passwd"), "___etc_passwd.csv");
        assert_eq!(csv_file_name("a:b|c"), "a_b_c.csv");
    }

    #[test]
    fn test_explicit_color_modes() {
        assert!(ColorMode::Always.use_colors());
        assert!(!ColorMode::Never.use_colors());
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
        init_logging(LogLevel::None);
    }
}
