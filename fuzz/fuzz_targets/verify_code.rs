#![no_main]

use libfuzzer_sys::fuzz_target;
use tkt_passcode::{verify_code, Params};

fuzz_target!(|data: &[u8]| {
    // 20-byte secret, 8-byte clock, remainder is the presented code
    if data.len() < 28 { return; }
    let (secret, rest) = data.split_at(20);
    let now = u64::from_be_bytes(rest[..8].try_into().unwrap_or([0u8; 8]));
    let candidate = String::from_utf8_lossy(&rest[8..]);

    // Any candidate must yield Ok(bool); only precondition failures may error
    let Ok(params) = Params::default().with_skew_steps(1) else { return };
    assert!(verify_code(&params, secret, &candidate, now).is_ok());
});
