//! The per-type behavior behind a registered flag.
//!
//! Every flag binds a destination variable that implements [`Value`].
//! The built-in implementations cover `bool`, `i32`, `i64`, `f64`,
//! [`BoundedString`] and `String`; anything else can be registered through
//! [`FlagSet::var`][crate::FlagSet::var] by implementing the trait.

use std::fmt::Display;

/// The behavior a destination variable needs to be registered as a flag.
///
/// Implementations are free to keep whatever state they like; the flag set
/// only ever calls these three methods, synchronously, during registration
/// and parsing.
pub trait Value {
    /// Parse `input` and store the result.
    ///
    /// On error the current value must be left untouched, so a caller that
    /// treats the error as ignorable still holds a consistent value.
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError>;

    /// Render the current value, or `None` if it is the zero/absent value.
    ///
    /// Usage printing calls this at registration time and suppresses the
    /// `(default: ...)` suffix when it gets `None`.
    fn display(&self) -> Option<String>;

    /// Whether `-flag` without a value is meaningful.
    ///
    /// Only boolean-like flags should return true; they parse the literal
    /// `"true"` when no value is attached and never consume the following
    /// token.
    fn is_bool(&self) -> bool {
        false
    }
}

/// A value rejected by a [`Value`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    message: String,
}

impl ValueError {
    /// Create an error carrying a diagnostic message.
    pub fn new(message: impl Into<String>) -> ValueError {
        ValueError {
            message: message.into(),
        }
    }
}

impl Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValueError {}

impl Value for bool {
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        match input {
            "true" | "1" => *self = true,
            "false" | "0" => *self = false,
            _ => return Err(ValueError::new("malformed boolean value")),
        }
        Ok(())
    }

    fn display(&self) -> Option<String> {
        if *self {
            Some("true".to_string())
        } else {
            None
        }
    }

    fn is_bool(&self) -> bool {
        true
    }
}

impl Value for i32 {
    /// A scan that comes up with 0 is only trusted for the literal `"0"`;
    /// everything else that scans to 0 is treated as malformed.
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        let scanned = scan_integer(input) as i32;
        if scanned == 0 && input != "0" {
            return Err(ValueError::new("malformed integral value"));
        }
        *self = scanned;
        Ok(())
    }

    fn display(&self) -> Option<String> {
        if *self == 0 {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl Value for i64 {
    /// Best-effort: input without a leading number yields 0.
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        *self = scan_integer(input);
        Ok(())
    }

    fn display(&self) -> Option<String> {
        if *self == 0 {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl Value for f64 {
    /// Best-effort: input without a leading number yields 0.0.
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        *self = scan_float(input);
        Ok(())
    }

    fn display(&self) -> Option<String> {
        if *self == 0.0 {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl Value for String {
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        self.clear();
        self.push_str(input);
        Ok(())
    }

    fn display(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.clone())
        }
    }
}

/// A string destination with a fixed byte capacity.
///
/// Assigning a value longer than the capacity truncates it silently at a
/// character boundary, like a bounded buffer write. The capacity is fixed
/// at construction and never grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedString {
    text: String,
    capacity: usize,
}

impl BoundedString {
    /// An empty string that will hold at most `capacity` bytes.
    pub fn new(capacity: usize) -> BoundedString {
        BoundedString {
            text: String::new(),
            capacity,
        }
    }

    /// Seed with a starting value, truncated to `capacity`.
    pub fn with_value(capacity: usize, value: &str) -> BoundedString {
        let mut this = BoundedString::new(capacity);
        this.assign(value);
        this
    }

    /// The current text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The byte capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn assign(&mut self, value: &str) {
        let mut end = value.len().min(self.capacity);
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        self.text.clear();
        self.text.push_str(&value[..end]);
    }
}

impl Value for BoundedString {
    /// Never fails; oversized input is truncated silently.
    fn parse_value(&mut self, input: &str) -> Result<(), ValueError> {
        self.assign(input);
        Ok(())
    }

    fn display(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }
}

impl Display for BoundedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<&str> for BoundedString {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Best-effort decimal scan in the style of C's `atoll`: leading ASCII
/// whitespace is skipped, a single sign is honored, and digits are
/// consumed up to the first non-digit. Input without leading digits
/// yields 0.
pub(crate) fn scan_integer(input: &str) -> i64 {
    let mut bytes = input.as_bytes();
    while let Some((first, rest)) = bytes.split_first() {
        if !first.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    let mut negative = false;
    match bytes.first() {
        Some(b'-') => {
            negative = true;
            bytes = &bytes[1..];
        }
        Some(b'+') => bytes = &bytes[1..],
        _ => {}
    }
    let mut value: i64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Best-effort float scan in the style of C's `atof`: the longest prefix
/// matching `[ws][sign]digits[.digits][(e|E)[sign]digits]` is converted.
/// Input without leading digits yields 0.0.
pub(crate) fn scan_float(input: &str) -> f64 {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    // An exponent only counts if at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exponent = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent {
            i = j;
        }
    }
    input[start..i].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_integer() {
        assert_eq!(scan_integer("123"), 123);
        assert_eq!(scan_integer(" \t-42"), -42);
        assert_eq!(scan_integer("+7"), 7);
        assert_eq!(scan_integer("123abc"), 123);
        assert_eq!(scan_integer("abc"), 0);
        assert_eq!(scan_integer(""), 0);
        assert_eq!(scan_integer("-"), 0);
        assert_eq!(scan_integer("00"), 0);
        assert_eq!(scan_integer("0x10"), 0);
    }

    #[test]
    fn test_scan_float() {
        assert_eq!(scan_float("3.14"), 3.14);
        assert_eq!(scan_float("1e3"), 1000.0);
        assert_eq!(scan_float("-2.5e-2"), -0.025);
        assert_eq!(scan_float(".5"), 0.5);
        assert_eq!(scan_float("3."), 3.0);
        assert_eq!(scan_float("junk"), 0.0);
        assert_eq!(scan_float(""), 0.0);
        // A dangling exponent is not part of the number.
        assert_eq!(scan_float("5e"), 5.0);
        assert_eq!(scan_float("5e+"), 5.0);
        assert_eq!(scan_float("2.5stop"), 2.5);
    }

    #[test]
    fn test_bool_value() {
        let mut b = false;
        b.parse_value("true").unwrap();
        assert!(b);
        b.parse_value("0").unwrap();
        assert!(!b);
        b.parse_value("1").unwrap();
        assert!(b);
        b.parse_value("false").unwrap();
        assert!(!b);
        b.parse_value("maybe").unwrap_err();
        assert!(!b);
        assert!(b.is_bool());
        assert_eq!(b.display(), None);
        b = true;
        assert_eq!(b.display(), Some("true".to_string()));
    }

    #[test]
    fn test_int_value() {
        let mut n = 7i32;
        n.parse_value("123").unwrap();
        assert_eq!(n, 123);
        n.parse_value("0").unwrap();
        assert_eq!(n, 0);
        n = 7;
        // Scans to 0 without being the literal "0": rejected, untouched.
        n.parse_value("00").unwrap_err();
        assert_eq!(n, 7);
        n.parse_value("abc").unwrap_err();
        assert_eq!(n, 7);
        // A trailing non-digit tail is tolerated, as in atoi.
        n.parse_value("12abc").unwrap();
        assert_eq!(n, 12);
        assert!(!n.is_bool());
        assert_eq!(0i32.display(), None);
        assert_eq!(12i32.display(), Some("12".to_string()));
    }

    #[test]
    fn test_int64_value() {
        let mut n = 1i64 << 33;
        n.parse_value("5").unwrap();
        assert_eq!(n, 5);
        // No validation: garbage silently yields 0.
        n.parse_value("abc").unwrap();
        assert_eq!(n, 0);
        assert_eq!(0i64.display(), None);
        assert_eq!((1i64 << 33).display(), Some("8589934592".to_string()));
    }

    #[test]
    fn test_float_value() {
        let mut x = 1.5f64;
        x.parse_value("2.25e1").unwrap();
        assert_eq!(x, 22.5);
        x.parse_value("abc").unwrap();
        assert_eq!(x, 0.0);
        assert_eq!(0.0f64.display(), None);
        assert_eq!(0.5f64.display(), Some("0.5".to_string()));
    }

    #[test]
    fn test_string_value() {
        let mut s = String::from("before");
        s.parse_value("after").unwrap();
        assert_eq!(s, "after");
        assert_eq!(s.display(), Some("after".to_string()));
        s.parse_value("").unwrap();
        assert_eq!(s.display(), None);
    }

    #[test]
    fn test_bounded_string() {
        let mut s = BoundedString::with_value(5, ":80");
        assert_eq!(s, ":80");
        assert_eq!(s.capacity(), 5);
        s.parse_value(":8080").unwrap();
        assert_eq!(s, ":8080");
        s.parse_value("overlong").unwrap();
        assert_eq!(s, "overl");
        assert_eq!(s.display(), Some("overl".to_string()));

        let mut s = BoundedString::new(2);
        assert_eq!(s.display(), None);
        // Truncation backs off to a character boundary.
        s.parse_value("aµ").unwrap();
        assert_eq!(s, "a");
        s.parse_value("µµ").unwrap();
        assert_eq!(s, "µ");
    }
}
