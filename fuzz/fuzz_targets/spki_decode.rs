#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input.
    let _ = ctlist_core::der::raw_public_key(data);
});
