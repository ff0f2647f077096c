use crate::Result;
use colorful::core::color_string::CString;
use colorful::Colorful;
use core::fmt::Arguments;
use dashmap::DashMap;
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Record};
use std::io;
use std::time::{Duration, Instant};

lazy_static! {
    static ref LAST_SEEN: DashMap<String, Instant> = DashMap::new();
}

/// Colored console output plus a daily warn-level file under `logs/`.
/// Call once, from the binary; the library itself only ever logs.
pub fn init() -> Result<()> {
    let console = fern::Dispatch::new()
        .format(console_format)
        .level(LevelFilter::Info)
        .level_for("teampredict_rs", LevelFilter::Trace)
        .filter(|meta| meta.level() > LevelFilter::Warn)
        .chain(io::stdout());

    let err_console = fern::Dispatch::new()
        .format(console_format)
        .level(LevelFilter::Warn)
        .chain(io::stderr());

    let file = fern::Dispatch::new()
        .format(file_format)
        .level(LevelFilter::Warn)
        .level_for("teampredict_rs", LevelFilter::Debug)
        .chain(fern::DateBased::new("logs/", "%F.predlog"));

    fern::Dispatch::new()
        .chain(file)
        .chain(console)
        .chain(err_console)
        .apply()?;

    Ok(())
}

fn since_last(target: &str) -> Duration {
    let now = Instant::now();

    let duration = LAST_SEEN
        .get(target)
        .map(|seen| now.duration_since(*seen))
        .unwrap_or_default();

    LAST_SEEN.insert(target.to_owned(), now);
    duration
}

fn console_format(cb: fern::FormatCallback, message: &Arguments, record: &Record) {
    let target = record.target();

    cb.finish(format_args!(
        "{}{} {}{} {} ({}ms)",
        "[".dark_gray(),
        paint_level(record.level()),
        target,
        "]".dark_gray(),
        message,
        since_last(target).as_millis(),
    ))
}

fn file_format(cb: fern::FormatCallback, message: &Arguments, record: &Record) {
    cb.finish(format_args!(
        "{} {:<5} {} {}",
        chrono::Local::now().format("%F %T%.3f"),
        record.level(),
        record.target(),
        message,
    ))
}

fn paint_level(level: Level) -> CString {
    match level {
        Level::Trace => "TRACE".dark_gray(),
        Level::Debug => "DEBUG".white(),
        Level::Info => "INFO".green(),
        Level::Warn => "WARN".yellow(),
        Level::Error => "ERROR".red().bold(),
    }
}
