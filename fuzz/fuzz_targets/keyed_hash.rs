#![no_main]

use libfuzzer_sys::fuzz_target;
use tkt_passcode::{Sha256Engine, TicketError, SECRET_LEN};

fuzz_target!(|data: &[u8]| {
    let engine = Sha256Engine::default();
    let split = data.first().map_or(0, |b| usize::from(*b)).min(data.len());
    let (secret, message) = data.split_at(split);

    match engine.compute(secret, message) {
        Ok(out) => assert_eq!(out.len(), 32),
        Err(TicketError::InvalidSecretLength { got, .. }) => assert_ne!(got, SECRET_LEN),
        Err(TicketError::EmptyMessage) => assert!(message.is_empty()),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
