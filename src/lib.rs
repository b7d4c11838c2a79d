//! A typed command line flag registry.
//!
//! Flags are declared against a [`FlagSet`] before parsing: each
//! registration binds a name to a caller-owned destination variable,
//! together with the behavior needed to parse and display it. A single
//! call to [`FlagSet::parse`] then walks the argument vector left to
//! right, fills the destinations, and keeps everything from the first
//! positional argument onward as leftover arguments.
//!
//! The accepted syntax is the one small tools have used forever:
//! `-name`, `--name`, `-name=value` and `-name value` all address the
//! same flag, boolean flags never consume a following token, and a bare
//! `-` or `--` ends flag scanning.
//!
//! ## Example
//! ```
//! use varflag::{BoundedString, FlagSet};
//!
//! let mut verbose = false;
//! let mut retries = 3;
//! let mut port = BoundedString::with_value(5, ":80");
//!
//! let mut flags = FlagSet::new("a small demo server");
//! flags.bool_var(&mut verbose, "v", "enable `bool` chatter");
//! flags.int_var(&mut retries, "retries", "an `int` retry budget");
//! flags.string_var(&mut port, "port", "the `string` port to listen on");
//!
//! flags.parse(["demo", "-v", "-port=:8080", "work"])?;
//! assert_eq!(flags.args(), ["demo", "work"]);
//! drop(flags);
//!
//! assert!(verbose);
//! assert_eq!(retries, 3);
//! assert_eq!(port, ":8080");
//! # Ok::<(), varflag::Error>(())
//! ```
//!
//! Descriptions may carry a backtick-quoted type hint (as in `` `int` ``
//! above); [`FlagSet::usage`] picks it up for the help block and strips
//! the backticks from the printed description.
//!
//! Parsing never prints or exits on its own: every failure comes back as
//! a structured [`Error`], and an optional diagnostic hook
//! ([`FlagSet::on_error`]) sees a rendered message first. Programs that
//! want the classic print-usage-and-exit behavior opt in through
//! [`FlagSet::parse_or_exit`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fmt::Display;

mod usage;
mod value;

pub use crate::usage::Usage;
pub use crate::value::{BoundedString, Value, ValueError};

/// A set of registered flags and, after parsing, the leftover arguments.
///
/// The set never owns destination storage; every registration borrows a
/// caller-owned variable for the lifetime of the set. Registration must
/// be complete before the single [`parse`][FlagSet::parse] call.
pub struct FlagSet<'a> {
    description: &'a str,
    bindings: Vec<Binding<'a>>,
    parsed: bool,
    // argv-shaped: index 0 is the program name, the rest are the
    // unconsumed positional tokens in original order.
    leftover: Vec<String>,
    program: Option<String>,
    hook: Option<Box<dyn FnMut(&str) + 'a>>,
}

// hook and the dyn destinations aren't Debug
impl std::fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.bindings.iter().map(|b| b.name).collect();
        f.debug_struct("FlagSet")
            .field("description", &self.description)
            .field("flags", &names)
            .field("parsed", &self.parsed)
            .field("leftover", &self.leftover)
            .field("program", &self.program)
            .finish()
    }
}

/// One registered flag.
struct Binding<'a> {
    name: &'a str,
    description: &'a str,
    // The text between the first pair of backticks in the description.
    type_hint: Option<String>,
    // Captured from the destination at registration time, before parsing,
    // so it reflects whatever the caller pre-seeded the variable with.
    default_display: Option<String>,
    is_bool: bool,
    value: &'a mut dyn Value,
}

impl<'a> FlagSet<'a> {
    /// Create an empty flag set. `description` is printed at the end of
    /// the usage block.
    pub fn new(description: &'a str) -> FlagSet<'a> {
        FlagSet {
            description,
            bindings: Vec::new(),
            parsed: false,
            leftover: Vec::new(),
            program: None,
            hook: None,
        }
    }

    /// Like [`new`][FlagSet::new], reserving room for `capacity` flags
    /// up front.
    pub fn with_capacity(capacity: usize, description: &'a str) -> FlagSet<'a> {
        let mut this = FlagSet::new(description);
        this.bindings.reserve(capacity);
        this
    }

    /// Register a flag with a custom [`Value`] destination.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered or if the set was already
    /// parsed. Both are configuration mistakes in the calling program,
    /// not runtime input errors.
    pub fn var(&mut self, dest: &'a mut dyn Value, name: &'a str, description: &'a str) {
        assert!(!self.parsed, "flag '{}' registered after parsing", name);
        assert!(
            self.bindings.iter().all(|b| b.name != name),
            "flag '{}' registered twice",
            name
        );
        self.bindings.push(Binding {
            name,
            description,
            type_hint: usage::type_hint(description),
            default_display: dest.display(),
            is_bool: dest.is_bool(),
            value: dest,
        });
    }

    /// Register a boolean flag. `-name` alone sets it to true.
    pub fn bool_var(&mut self, dest: &'a mut bool, name: &'a str, description: &'a str) {
        self.var(dest, name, description);
    }

    /// Register an integer flag.
    pub fn int_var(&mut self, dest: &'a mut i32, name: &'a str, description: &'a str) {
        self.var(dest, name, description);
    }

    /// Register a 64-bit integer flag.
    pub fn int64_var(&mut self, dest: &'a mut i64, name: &'a str, description: &'a str) {
        self.var(dest, name, description);
    }

    /// Register a floating-point flag.
    pub fn float_var(&mut self, dest: &'a mut f64, name: &'a str, description: &'a str) {
        self.var(dest, name, description);
    }

    /// Register a bounded string flag. Oversized values are truncated to
    /// the destination's capacity.
    pub fn string_var(&mut self, dest: &'a mut BoundedString, name: &'a str, description: &'a str) {
        self.var(dest, name, description);
    }

    /// Install a diagnostic hook.
    ///
    /// The hook sees a rendered message for every parse-time error and
    /// for explicit help requests, right before [`parse`][FlagSet::parse]
    /// returns the structured error. It is free to print, log or ignore
    /// the message; the error is returned either way.
    pub fn on_error<F: FnMut(&str) + 'a>(&mut self, hook: F) {
        self.hook = Some(Box::new(hook));
    }

    /// Parse an argument vector into the registered flags.
    ///
    /// `argv[0]` is the program name; flag scanning starts at index 1 and
    /// ends at the first positional token or at a bare `-`/`--`. On
    /// success the leftover arguments are available through
    /// [`args`][FlagSet::args] and the set is permanently marked parsed.
    ///
    /// A request for help (`-h`, `-help`, `--h` or `--help` anywhere in
    /// the vector, even after a positional token) takes priority over
    /// everything else and returns [`Error::HelpRequested`].
    pub fn parse<I>(&mut self, argv: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if self.parsed {
            return Err(Error::AlreadyParsed);
        }
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        self.program = argv.first().cloned();

        let help = ["-h", "-help", "--h", "--help"];
        if argv.iter().any(|arg| help.contains(&arg.as_str())) {
            return Err(self.fail(Error::HelpRequested));
        }

        let mut i = 1;
        while i < argv.len() {
            let arg = argv[i].as_str();
            if arg == "-" || arg == "--" {
                break;
            }
            if !arg.starts_with('-') {
                break;
            }

            // Strip one or two leading dashes, then split off an inline
            // `=value` if there is one.
            let mut name = &arg[1..];
            if name.starts_with('-') {
                name = &name[1..];
            }
            let (key, inline) = match name.split_once('=') {
                Some((key, inline)) => (key, Some(inline)),
                None => (name, None),
            };

            // Last registered wins, though registration forbids duplicates.
            let index = match self.bindings.iter().rposition(|b| b.name == key) {
                Some(index) => index,
                None => return Err(self.fail(Error::UnknownFlag(key.to_string()))),
            };

            if self.bindings[index].is_bool {
                // Booleans never consume the following token: without an
                // inline value the literal "true" is parsed.
                let input = inline.unwrap_or("true");
                if let Err(err) = self.bindings[index].value.parse_value(input) {
                    return Err(self.invalid(key, err));
                }
                i += 1;
                continue;
            }

            let (input, next) = match inline {
                Some(inline) => (inline, i + 1),
                None => match argv.get(i + 1) {
                    Some(token) => (token.as_str(), i + 2),
                    None => return Err(self.fail(Error::MissingArgument(key.to_string()))),
                },
            };
            if let Err(err) = self.bindings[index].value.parse_value(input) {
                return Err(self.invalid(key, err));
            }
            i = next;
        }

        self.parsed = true;
        if let Some(program) = argv.first() {
            self.leftover.push(program.clone());
            self.leftover.extend(argv[i..].iter().cloned());
        }
        Ok(())
    }

    /// The leftover argument view.
    ///
    /// Empty before a successful parse. Afterwards index 0 holds the
    /// program name and the rest are the tokens from the positional
    /// boundary onward, in their original order.
    pub fn args(&self) -> &[String] {
        &self.leftover
    }

    /// Whether a parse has completed successfully.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// The set description given at construction.
    pub fn description(&self) -> &str {
        self.description
    }

    /// Route an error through the diagnostic hook before returning it.
    fn fail(&mut self, err: Error) -> Error {
        if let Some(hook) = self.hook.as_mut() {
            hook(&err.to_string());
        }
        err
    }

    fn invalid(&mut self, flag: &str, err: ValueError) -> Error {
        self.fail(Error::InvalidValue {
            flag: flag.to_string(),
            message: err.to_string(),
        })
    }
}

/// An error during argument parsing.
///
/// Every failure is returned to the caller as one of these; whether it is
/// also printed, logged or turned into an exit is up to the caller (see
/// [`FlagSet::on_error`] and [`FlagSet::parse_or_exit`]).
#[non_exhaustive]
#[derive(Clone, PartialEq, Eq)]
pub enum Error {
    /// [`FlagSet::parse`] was called a second time on the same set.
    AlreadyParsed,
    /// A flag token had no matching registration.
    UnknownFlag(String),
    /// A non-boolean flag had neither an inline value nor a following
    /// token.
    MissingArgument(String),
    /// A registered type rejected the supplied text.
    InvalidValue {
        /// The flag whose value was rejected.
        flag: String,
        /// The diagnostic from the [`Value`] implementation.
        message: String,
    },
    /// `-h`, `-help`, `--h` or `--help` was found in the argument vector.
    HelpRequested,
}

impl Error {
    /// A stable display name for the error kind, for diagnostics and
    /// logging by the caller.
    pub fn name(&self) -> &'static str {
        match self {
            Error::AlreadyParsed => "AlreadyParsed",
            Error::UnknownFlag(_) => "UnknownFlag",
            Error::MissingArgument(_) => "MissingArgument",
            Error::InvalidValue { .. } => "InvalidValue",
            Error::HelpRequested => "HelpRequested",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AlreadyParsed => write!(f, "flag set was already parsed"),
            Error::UnknownFlag(name) => write!(f, "unknown flag '{}'", name),
            Error::MissingArgument(name) => write!(f, "flag '{}' has no argument", name),
            Error::InvalidValue { flag, message } => {
                write!(f, "invalid value for flag '{}': {}", flag, message)
            }
            Error::HelpRequested => write!(f, "explicit request for help"),
        }
    }
}

// This is printed when returning an error from main(), so defer to Display
impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}
