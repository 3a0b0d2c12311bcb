//! Fuzz target for image decoding followed by conversion.
//!
//! Small decoded images are converted end to end; conversion of any
//! decodable image must succeed.

#![no_main]

use kvadrat::raster::decode_image;
use kvadrat::{convert, ConvertOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    let Ok(grid) = decode_image(data) else {
        return;
    };
    if grid.len() > 32 * 32 {
        return;
    }

    convert(&grid, &ConvertOptions::default()).expect("decoded image must convert");
});
