#![no_main]
use libfuzzer_sys::fuzz_target;
use marshal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    if let Ok(d) = s.parse::<Decimal>() {
        let printed = d.to_string();
        let again: Decimal = printed.parse().expect("printed decimal must parse");
        assert_eq!(d, again);
        assert_eq!(printed, again.to_string());
    }
});
