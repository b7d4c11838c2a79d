//! Usage/help rendering.
//!
//! This sits on top of the registry: it only reads what registration
//! already cached (name, type hint, default display, description) and
//! never affects parsing itself.

use std::fmt;
use std::fmt::Display;

use crate::{Error, FlagSet};

/// The usage block of a [`FlagSet`], returned by [`FlagSet::usage`].
///
/// Displays as one entry per flag in registration order, followed by the
/// set description:
///
/// ```text
/// Usage of prog:
///   -port string
///         the port to listen on (default: :80)
///
/// Description:
/// a small demo server
/// ```
pub struct Usage<'s, 'a> {
    set: &'s FlagSet<'a>,
}

impl Display for Usage<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.set.program.as_deref().unwrap_or("<program>");
        writeln!(f, "Usage of {}:", program)?;
        for binding in &self.set.bindings {
            match &binding.type_hint {
                Some(hint) => writeln!(f, "  -{} {}", binding.name, hint)?,
                None => writeln!(f, "  -{}", binding.name)?,
            }
            let description = without_hint_ticks(binding.description);
            match &binding.default_display {
                Some(default) => writeln!(f, "\t{} (default: {})", description, default)?,
                None => writeln!(f, "\t{}", description)?,
            }
        }
        if !self.set.description.is_empty() {
            writeln!(f, "\nDescription:\n{}", self.set.description)?;
        }
        Ok(())
    }
}

impl<'a> FlagSet<'a> {
    /// Render the usage block.
    ///
    /// The program name comes from the last argument vector seen by
    /// [`parse`][FlagSet::parse]; before any parse a placeholder is used.
    pub fn usage(&self) -> Usage<'_, 'a> {
        Usage { set: self }
    }

    /// Parse, and terminate the process on any failure.
    ///
    /// This is the classic command line front end behavior, layered on
    /// top of [`parse`][FlagSet::parse] for programs that want it: a help
    /// request prints the usage block to stdout and exits with status 0,
    /// any other error prints its message and the usage block to stderr
    /// and exits with status 2. On success the leftover argument view is
    /// returned.
    pub fn parse_or_exit<I>(&mut self, argv: I) -> &[String]
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        match self.parse(argv) {
            Ok(()) => self.args(),
            Err(Error::HelpRequested) => {
                print!("{}", self.usage());
                std::process::exit(0);
            }
            Err(err) => {
                eprintln!("{}", err);
                eprintln!();
                eprint!("{}", self.usage());
                std::process::exit(2);
            }
        }
    }
}

/// The backtick-quoted type hint of a flag description: the text between
/// the first and second backtick. Absent if there are fewer than two
/// backticks or they enclose nothing.
pub(crate) fn type_hint(description: &str) -> Option<String> {
    let (_, rest) = description.split_once('`')?;
    let (hint, _) = rest.split_once('`')?;
    if hint.is_empty() {
        None
    } else {
        Some(hint.to_string())
    }
}

/// The description with the first two backticks removed, the form it is
/// printed in.
fn without_hint_ticks(description: &str) -> String {
    let mut out = String::with_capacity(description.len());
    let mut removed = 0;
    for ch in description.chars() {
        if removed < 2 && ch == '`' {
            removed += 1;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundedString;

    fn argv(line: &str) -> Vec<String> {
        line.split_ascii_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_type_hint() {
        assert_eq!(type_hint("an `int` test"), Some("int".to_string()));
        assert_eq!(type_hint("`bool` test"), Some("bool".to_string()));
        assert_eq!(type_hint("no ticks here"), None);
        assert_eq!(type_hint("only one ` tick"), None);
        assert_eq!(type_hint("``"), None);
        // Only the first pair counts.
        assert_eq!(type_hint("a `b` and `c`"), Some("b".to_string()));
    }

    #[test]
    fn test_without_hint_ticks() {
        assert_eq!(without_hint_ticks("enable `bool` chatter"), "enable bool chatter");
        assert_eq!(without_hint_ticks("plain"), "plain");
        assert_eq!(without_hint_ticks("a `b` and `c`"), "a b and `c`");
    }

    #[test]
    fn test_usage_block() -> Result<(), Error> {
        let mut verbose = false;
        let mut retries = 3;
        let mut port = BoundedString::with_value(6, ":80");

        let mut flags = FlagSet::new("serves hello");
        flags.bool_var(&mut verbose, "v", "enable `bool` chatter");
        flags.int_var(&mut retries, "retries", "an `int` count");
        flags.string_var(&mut port, "port", "listen address");
        flags.parse(argv("demo"))?;

        assert_eq!(
            flags.usage().to_string(),
            "Usage of demo:\n\
             \x20 -v bool\n\
             \tenable bool chatter\n\
             \x20 -retries int\n\
             \tan int count (default: 3)\n\
             \x20 -port\n\
             \tlisten address (default: :80)\n\
             \nDescription:\nserves hello\n"
        );
        Ok(())
    }

    #[test]
    fn test_usage_suppresses_zero_defaults() -> Result<(), Error> {
        // A default of true shows up; the zero values never do.
        let mut on = true;
        let mut count = 0;
        let mut flags = FlagSet::new("");
        flags.bool_var(&mut on, "on", "starts enabled");
        flags.int_var(&mut count, "count", "starts at zero");
        flags.parse(argv("demo"))?;

        let usage = flags.usage().to_string();
        assert!(usage.contains("starts enabled (default: true)"));
        assert!(usage.contains("\tstarts at zero\n"));
        assert!(!usage.contains("Description:"));
        Ok(())
    }

    #[test]
    fn test_usage_before_parse() {
        let mut n = 0;
        let mut flags = FlagSet::new("");
        flags.int_var(&mut n, "n", "");
        let usage = flags.usage().to_string();
        assert!(usage.starts_with("Usage of <program>:\n"));
    }
}
