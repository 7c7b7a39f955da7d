#![no_main]

use libfuzzer_sys::fuzz_target;
use swe_common::{ComponentBuilder, ValueCodec};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let schema = ComponentBuilder::record()
        .field("time", ComponentBuilder::time().as_phenomenon_time_iso_utc())
        .field("count", ComponentBuilder::count())
        .field(
            "pos",
            ComponentBuilder::vector()
                .field("x", ComponentBuilder::quantity())
                .field("y", ComponentBuilder::quantity()),
        )
        .field("samples", ComponentBuilder::array(ComponentBuilder::quantity()))
        .field(
            "mode",
            ComponentBuilder::choice()
                .field("off", ComponentBuilder::boolean())
                .field("label", ComponentBuilder::text()),
        )
        .build();

    let codec = ValueCodec::new(&schema);
    if let Ok(block) = codec.decode(&json) {
        let _ = codec.encode(&block).unwrap();
    }
});
