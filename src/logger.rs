use std::env;
use std::io::Write;

use log::LevelFilter;

pub const LOG_ENV: &str = "PISPACES_LOG";

fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

/// Routes `log` records to stderr. An explicit level wins over `PISPACES_LOG`;
/// with neither, only warnings and errors are shown so stdout stays the report.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => parse_level(level),
        None => env::var(LOG_ENV)
            .map(|v| parse_level(&v))
            .unwrap_or(LevelFilter::Warn),
    };

    let result = env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Warn);
    }
}
