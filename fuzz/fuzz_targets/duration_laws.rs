#![no_main]

use libfuzzer_sys::fuzz_target;
use oxtime::extension::{Value, call};
use oxtime::{Duration, TimeUnit};

fuzz_target!(|data: (i64, i64, u8)| {
    let (start, millis, unit) = data;
    let duration = Duration::from_millis(millis);
    let unit = TimeUnit::ALL[usize::from(unit) % TimeUnit::ALL.len()];

    let whole = duration.to_unit(unit);
    let remainder = i128::from(millis) - i128::from(whole) * i128::from(unit.millis());
    assert!(remainder.abs() < i128::from(unit.millis()));
    assert!(remainder == 0 || remainder.signum() == i128::from(millis.signum()));

    // Round trip through an instant built by arithmetic from the epoch
    let Ok(Value::DateTime(epoch)) = call("datetime", &["1970-01-01T00:00:00Z".into()]) else {
        panic!("the epoch literal is valid");
    };
    let Some(instant) = epoch.checked_add(Duration::from_millis(start)) else {
        return;
    };
    if let Some(shifted) = instant.checked_add(duration) {
        assert_eq!(shifted.checked_sub(instant), Some(duration));
        assert_eq!(
            call("<", &[instant.into(), shifted.into()]),
            Ok(Value::Boolean(duration > Duration::ZERO))
        );
    }
});
