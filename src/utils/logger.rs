//! Terminal logger setup shared by the demo binary and examples.

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Initializes a terminal logger at the given level. Accepted levels:
/// debug, info, warn, error, off/none. Calling it twice is an error from
/// simplelog; the message is passed through.
pub fn init_logging(loglevel: &str) -> Result<(), String> {
    let filter = match loglevel {
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" | "none" => LevelFilter::Off,
        other => {
            return Err(format!(
                "loglevel must be debug, info, warn, error or off, got '{}'",
                other
            ));
        }
    };
    CombinedLogger::init(vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .map_err(|e| e.to_string())
}
