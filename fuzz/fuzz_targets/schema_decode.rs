#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(schema) = swe_common::schema::from_str(text) {
        // A decoded schema always carries a time stamp and re-encodes cleanly
        assert!(schema.has_time_stamp());
        let _ = swe_common::schema::encode(&schema).unwrap();
    }
});
