#![no_main]

use connected_systems::net::response::ResponseShape;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = ResponseShape::resolve(Some(text));
    }
});
