//! Time-stepped passcodes (RFC 6238 over the RFC 4226 truncation).
//!
//! code = Truncate( KH(secret, BE64(floor((now - epoch) / interval))) ) mod 10^digits

use sha2::Sha256;
use subtle::ConstantTimeEq;
use crate::{
    errors::TicketError,
    keyed_hash::KeyedHashEngine,
    params::Params,
    ser::{be32, be64, is_well_formed_code, render_code},
    types::{COUNTER_LEN, Passcode},
};

/// Time step containing `now`.
///
/// # Errors
///
/// Returns `TicketError::TimeBeforeEpoch` if `now` precedes the configured epoch.
pub const fn counter_for(params: &Params, now: u64) -> Result<u64, TicketError> {
    let epoch = params.epoch();
    if now < epoch {
        return Err(TicketError::TimeBeforeEpoch { now, epoch });
    }
    Ok((now - epoch) / params.interval_secs())
}

/// The keyed-hash message for `now`.
///
/// # Errors
///
/// See [`counter_for`].
pub fn counter_bytes(params: &Params, now: u64) -> Result<[u8; COUNTER_LEN], TicketError> {
    counter_for(params, now).map(be64)
}

/// RFC 4226 dynamic truncation: 31 bits read at the offset named by the low nibble of the last byte.
///
/// Returns `None` if `hash` is too short to hold the selected window.
#[must_use]
pub fn truncate(hash: &[u8]) -> Option<u32> {
    let last = *hash.last()?;
    let offset = usize::from(last & 0x0f);
    let window: [u8; 4] = hash.get(offset..offset + 4)?.try_into().ok()?;
    Some(be32(window) & 0x7fff_ffff)
}

/// HOTP form: the code for an explicit counter value.
///
/// # Errors
///
/// Propagates keyed-hash precondition failures.
pub fn generate_at_counter(params: &Params, secret: &[u8], counter: u64) -> Result<Passcode, TicketError> {
    let engine = KeyedHashEngine::<Sha256>::new(params);
    let mac = engine.compute(secret, &be64(counter))?;
    // SHA-256 output is 32 bytes; offset + 4 <= 19.
    let value = truncate(&mac).ok_or(TicketError::InvalidParams("hash output shorter than truncation window"))?;
    Ok(render_code(value % params.modulus(), params.digits()))
}

/// The passcode valid at Unix time `now`.
///
/// # Errors
///
/// Returns `TicketError::TimeBeforeEpoch` for a clock earlier than the epoch, and
/// keyed-hash precondition failures for a malformed secret.
pub fn generate(params: &Params, secret: &[u8], now: u64) -> Result<Passcode, TicketError> {
    generate_at_counter(params, secret, counter_for(params, now)?)
}

/// Check `candidate` against the authoritative code for `now`, tolerating
/// `params.skew_steps()` steps of clock drift in either direction.
///
/// A mismatch, or a candidate that is not `digits` ASCII digits, is `Ok(false)`.
///
/// # Errors
///
/// Only precondition failures (bad secret, clock before epoch).
pub fn verify_code(params: &Params, secret: &[u8], candidate: &str, now: u64) -> Result<bool, TicketError> {
    let counter = counter_for(params, now)?;
    if !is_well_formed_code(candidate, params.digits()) {
        // Still exercise the secret so malformed input surfaces misuse the same way.
        generate_at_counter(params, secret, counter)?;
        return Ok(false);
    }
    let lo = counter.saturating_sub(params.skew_steps());
    let hi = counter.saturating_add(params.skew_steps());
    let mut matched = 0u8;
    for c in lo..=hi {
        let expected = generate_at_counter(params, secret, c)?;
        matched |= expected.as_str().as_bytes().ct_eq(candidate.as_bytes()).unwrap_u8();
    }
    Ok(matched == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_SKEW_STEPS;
    use hex_literal::hex;

    const SECRET: &[u8; 20] = b"DEBUGSECRETKEY2345==";

    #[test]
    fn rfc4226_truncation_example() {
        let hs = hex!("1f8698690e02ca16618550ef7f19da8e945b555a");
        assert_eq!(truncate(&hs), Some(0x50ef_7f19));
        assert_eq!(0x50ef_7f19 % 1_000_000, 872_921);
    }

    #[test]
    fn truncation_masks_sign_bit() {
        let mut hs = [0xffu8; 32];
        hs[31] = 0xf0; // offset 0
        assert_eq!(truncate(&hs), Some(0x7fff_ffff));
    }

    #[test]
    fn truncation_rejects_short_hash() {
        assert_eq!(truncate(&[]), None);
        assert_eq!(truncate(&[0x0f; 8]), None);
    }

    #[test]
    fn stable_within_a_window() {
        let p = Params::default();
        let a = generate(&p, SECRET, 1_700_000_010).unwrap();
        let b = generate(&p, SECRET, 1_700_000_019).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 6);
    }

    #[test]
    fn counter_floors_to_step() {
        let p = Params::default();
        assert_eq!(counter_for(&p, 0).unwrap(), 0);
        assert_eq!(counter_for(&p, 29).unwrap(), 0);
        assert_eq!(counter_for(&p, 30).unwrap(), 1);
        let p = p.with_epoch(100);
        assert_eq!(counter_for(&p, 159).unwrap(), 1);
        assert_eq!(counter_bytes(&p, 160).unwrap(), [0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(counter_for(&p, 99).unwrap_err(), TicketError::TimeBeforeEpoch { now: 99, epoch: 100 });
    }

    #[test]
    fn verify_accepts_current_and_rejects_neighbours_without_skew() {
        let p = Params::default();
        let now = 1_700_000_000;
        let code = generate(&p, SECRET, now).unwrap();
        let prev = generate(&p, SECRET, now - 30).unwrap();
        let next = generate(&p, SECRET, now + 30).unwrap();
        assert_eq!(code, "079071");
        assert_eq!(prev, "029193");
        assert_eq!(next, "464618");
        assert!(verify_code(&p, SECRET, code.as_str(), now).unwrap());
        assert!(!verify_code(&p, SECRET, prev.as_str(), now).unwrap());
        assert!(!verify_code(&p, SECRET, next.as_str(), now).unwrap());
    }

    #[test]
    fn skew_window_accepts_adjacent_steps() {
        let p = Params::default().with_skew_steps(1).unwrap();
        let now = 1_700_000_000;
        let prev = generate(&p, SECRET, now - 30).unwrap();
        let next = generate(&p, SECRET, now + 30).unwrap();
        assert!(verify_code(&p, SECRET, prev.as_str(), now).unwrap());
        assert!(verify_code(&p, SECRET, next.as_str(), now).unwrap());
    }

    #[test]
    fn widest_skew_window_stops_at_its_edge() {
        let p = Params::default().with_skew_steps(MAX_SKEW_STEPS).unwrap();
        let now = 1_700_000_000;
        // 10 steps either side
        assert!(verify_code(&p, SECRET, "059078", now).unwrap());
        assert!(verify_code(&p, SECRET, "570477", now).unwrap());
        // 11 steps either side
        assert_eq!(generate(&p, SECRET, now - 11 * 30).unwrap(), "807311");
        assert_eq!(generate(&p, SECRET, now + 11 * 30).unwrap(), "820673");
        assert!(!verify_code(&p, SECRET, "807311", now).unwrap());
        assert!(!verify_code(&p, SECRET, "820673", now).unwrap());
    }

    #[test]
    fn skew_window_saturates_at_step_zero() {
        let p = Params::default().with_skew_steps(2).unwrap();
        let code = generate(&p, SECRET, 0).unwrap();
        assert!(verify_code(&p, SECRET, code.as_str(), 5).unwrap());
    }

    #[test]
    fn malformed_candidates_are_false() {
        let p = Params::default();
        assert!(!verify_code(&p, SECRET, "12345", 0).unwrap());
        assert!(!verify_code(&p, SECRET, "abcdef", 0).unwrap());
        assert!(!verify_code(&p, SECRET, "1234567", 0).unwrap());
    }

    #[test]
    fn bad_secret_is_an_error_not_a_mismatch() {
        let p = Params::default();
        assert!(matches!(verify_code(&p, b"short", "123456", 0), Err(TicketError::InvalidSecretLength { .. })));
        assert!(matches!(verify_code(&p, b"short", "x", 0), Err(TicketError::InvalidSecretLength { .. })));
    }
}
