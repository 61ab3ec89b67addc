//! Quanta line driver
//!
//! Reads one JSON expression tree per stdin line and writes one JSON result
//! per stdout line: `{"value": ..., "parts": ..., "display": ...}`.
//!
//! Commands:
//! - `:functions [category]` - list registered functions
//! - `:constants` - list registered constants
//!
//! Environment:
//! - `QUANTA_PRECISION` - decimal digits for approximate results
//! - `QUANTA_MAX_DEPTH` - deepest tree accepted before `TOO_COMPLEX`
//! - `RUST_LOG` - log filter for stderr (default `info`)

use quanta::Quanta;
use quanta_core::NumericConfig;
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Numeric limits, overridden from the environment
fn config_from_env() -> NumericConfig {
    let mut config = NumericConfig::default();
    if let Some(precision) = env_number::<u32>("QUANTA_PRECISION") {
        config.precision = precision;
    }
    if let Some(depth) = env_number::<usize>("QUANTA_MAX_DEPTH") {
        config.max_depth = depth;
    }
    config
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}

fn handle_command(quanta: &Quanta, command: &str) -> String {
    let mut words = command.split_whitespace();
    match words.next() {
        Some("functions") => to_json(&quanta.list_functions(words.next())),
        Some("constants") => to_json(&quanta.list_constants()),
        other => to_json(&serde_json::json!({
            "error": format!("unknown command ':{}'", other.unwrap_or_default()),
        })),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {}\"}}", e))
}

fn main() {
    init_logging();

    let config = config_from_env();
    let quanta = Quanta::with_standard_library().with_config(config);

    info!(version = VERSION, precision = config.precision, max_depth = config.max_depth, "quanta started");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                debug!("end of input");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let response = match line.strip_prefix(':') {
                    Some(command) => handle_command(&quanta, command),
                    None => {
                        let result = quanta.evaluate_json(line);
                        debug!(display = %result.display, "evaluated");
                        to_json(&result)
                    }
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response) {
                    warn!(error = %e, "writing result failed");
                    break;
                }
                if let Err(e) = stdout.flush() {
                    warn!(error = %e, "flushing stdout failed");
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "reading input failed");
                break;
            }
        }
    }

    info!("quanta shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        let quanta = Quanta::with_standard_library();
        let functions: serde_json::Value = serde_json::from_str(&handle_command(&quanta, "functions trig")).unwrap();
        let names: Vec<_> = functions
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["cos", "sin", "tan"]);

        let constants: serde_json::Value = serde_json::from_str(&handle_command(&quanta, "constants")).unwrap();
        assert!(constants.as_array().unwrap().iter().any(|c| c["name"] == "pi"));

        let unknown: serde_json::Value = serde_json::from_str(&handle_command(&quanta, "bogus")).unwrap();
        assert!(unknown["error"].as_str().unwrap().contains("bogus"));
    }
}
