#![no_main]
use libfuzzer_sys::fuzz_target;

use varflag::{BoundedString, Error, FlagSet};

// We check some basic invariants but mainly make sure that registration
// plus a single parse never panics or hangs.
fuzz_target!(|data: &[u8]| {
    let tokens: Vec<String> = data
        // Arguments can't contain null bytes (on Unix) so it's a
        // reasonable separator
        .split(|&b| b == b'\0')
        .map(|token| String::from_utf8_lossy(token).into_owned())
        .collect();

    let mut b = false;
    let mut n = 0i32;
    let mut ll = 0i64;
    let mut x = 0f64;
    let mut s = BoundedString::new(16);

    let mut flags = FlagSet::new("fuzz");
    flags.bool_var(&mut b, "b", "a `bool`");
    flags.int_var(&mut n, "n", "an `int`");
    flags.int64_var(&mut ll, "ll", "a wide one");
    flags.float_var(&mut x, "x", "a `double`");
    flags.string_var(&mut s, "s", "a `string`");

    match flags.parse(tokens.clone()) {
        Ok(()) => {
            assert!(flags.parsed());
            let leftover = flags.args();
            if tokens.is_empty() {
                assert!(leftover.is_empty());
            } else {
                // Program name survives, nothing gets invented.
                assert_eq!(leftover.first(), tokens.first());
                assert!(leftover.len() <= tokens.len());
            }
            // A completed set refuses a second parse.
            assert_eq!(flags.parse(tokens), Err(Error::AlreadyParsed));
        }
        Err(err) => {
            assert!(!flags.parsed());
            assert!(flags.args().is_empty());
            assert!(!err.name().is_empty());
        }
    }
});
