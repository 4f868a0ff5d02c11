use crate::config;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

pub const DEFAULT_LOG_FILE: &str = "barberbook.log";

/// Log level from the configured name; anything unknown means `info`.
pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Send all logging to a file. The terminal belongs to the TUI, so stderr
/// is only used when no file can be opened.
pub fn setup_logger() -> Result<(), log::SetLoggerError> {
    let config = config::get_config_or_panic();
    let log_level = level_filter(config.logging().level());

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(log_level)
        // reqwest and hyper are chatty at debug
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Info);

    let log_file = config.logging().file().unwrap_or(DEFAULT_LOG_FILE);

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            base_config.chain(file).apply()?;
            println!("Logging to file: {log_file}");
        }
        Err(e) => {
            eprintln!("Warning: Failed to open log file '{log_file}': {e}");
            eprintln!("Continuing with logging to stderr.");
            base_config.chain(std::io::stderr()).apply()?;
        }
    }

    log::info!("Logger initialized with level: {log_level}");
    Ok(())
}
