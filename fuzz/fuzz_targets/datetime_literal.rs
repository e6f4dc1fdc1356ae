#![no_main]

use libfuzzer_sys::fuzz_target;
use oxtime::DateTime;
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };
    match input.parse::<DateTime>() {
        Ok(value) => {
            let date = value.to_date().unwrap();
            assert_eq!(date.to_date(), Some(date));
            assert_eq!(date.checked_add(value.to_time()), Some(value));
            // The offset may move the instant out of the accepted years
            if let Ok(reparsed) = value.to_string().parse::<DateTime>() {
                assert_eq!(reparsed, value);
            }
        }
        Err(error) => {
            if let Some(position) = error.position() {
                assert!(position <= input.len());
            } else {
                assert!(error.invalid_field().is_some());
            }
        }
    }
});
