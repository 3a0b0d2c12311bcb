//! Fuzz target for path data parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 strings to the path parser, checking
//! for panics, crashes, or hangs. Anything that parses must survive a
//! normalize round without changing meaning.

#![no_main]

use kvadrat::path::{format_path, parse_path};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(commands) = parse_path(input) {
        let formatted = format_path(&commands);
        let reparsed = parse_path(&formatted).expect("formatted path must parse");
        assert_eq!(reparsed.len(), commands.len());
    }
});
