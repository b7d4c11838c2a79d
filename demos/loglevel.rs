//! Registers a flag type of its own next to the built-in ones.

use varflag::{FlagSet, Value, ValueError};

#[derive(Debug)]
enum LogLevel {
    Error,
    Info,
    Debug,
}

impl Value for LogLevel {
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        *self = match input {
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            _ => return Err(ValueError::new("expected error, info or debug")),
        };
        Ok(())
    }

    fn display(&self) -> Option<String> {
        match self {
            // Error is the zero value, so it never prints as a default.
            LogLevel::Error => None,
            LogLevel::Info => Some("info".to_string()),
            LogLevel::Debug => Some("debug".to_string()),
        }
    }
}

fn main() {
    let mut level = LogLevel::Info;

    let mut flags = FlagSet::new("Demonstrates a custom flag type.");
    flags.var(&mut level, "log", "the `level` to log at");
    flags.parse_or_exit(std::env::args());
    drop(flags);

    println!("log level: {:?}", level);
}
