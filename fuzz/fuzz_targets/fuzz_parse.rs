#![no_main]

use capquiz::{CityList, GeoPoint};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Whatever parses as a point must be a valid coordinate.
    if let Ok(point) = text.parse::<GeoPoint>() {
        assert!(point.is_valid());
    }

    // Whatever parses as a dataset must be non-empty and in range.
    if let Ok(list) = CityList::from_json(text) {
        assert!(!list.is_empty());
        for city in &list {
            assert!(city.location().is_valid());
        }
    }
});
