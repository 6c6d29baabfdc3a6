#![no_main]

use libfuzzer_sys::fuzz_target;
use querystate::{equals, parse, serialize, Preset, QueryParams};

// Panics propagate so libFuzzer keeps the crashing input under its artifact
// prefix.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let params = QueryParams::parse(input);
    for preset in Preset::ALL {
        let schema = preset.schema();
        let record = parse(&schema, &params);
        let encoded = serialize(&schema, &record);
        let reparsed = parse(&schema, &encoded);
        assert!(
            equals(&schema, &record, &reparsed),
            "{preset}: {input:?} decoded differently after re-encoding as {encoded}"
        );
        assert_eq!(
            serialize(&schema, &reparsed),
            encoded,
            "{preset}: re-encoding of {input:?} is not stable"
        );
    }
});
