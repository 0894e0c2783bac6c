#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary response bodies must decode or error, never panic
    if let Ok(records) = persona::client::decode_profiles(data) {
        for record in &records {
            let _ = persona::render::summary(record, &Default::default());
        }
    }
});
