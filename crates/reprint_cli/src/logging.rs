//! Log output for the `reprint` binary.
//!
//! Off unless `REPRINT_LOG` (or `RUST_LOG`) is set. The value is an
//! `EnvFilter` directive, e.g. `REPRINT_LOG=reprint_printer=trace`.
//! `REPRINT_LOG_FORMAT=json` switches from plain lines to newline-delimited
//! JSON. Everything goes to stderr; stdout carries reprinted text.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

fn filter_directives() -> Option<String> {
    std::env::var("REPRINT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
}

pub fn init() {
    let Some(directives) = filter_directives() else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);
    let format = LogFormat::parse(&std::env::var("REPRINT_LOG_FORMAT").unwrap_or_default());

    match format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("tree"), LogFormat::Text);
    }
}
