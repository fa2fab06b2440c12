use rand_core::{OsRng, RngCore};
use crate::{
    entity::{Backing, EntropySource},
    errors::TicketError,
    types::{ACCOUNT_ENTROPY_LEN, EVENT_ENTROPY_LEN, SECRET_LEN, TicketSecret},
};

fn fragment<S: EntropySource>(source: &S, n: usize) -> Result<&[u8], TicketError> {
    source.entropy_suffix(n).ok_or_else(|| TicketError::InsufficientEntropy {
        entity: source.kind(),
        needed: n,
        available: source.entropy_len(),
    })
}

/// secret = event_suffix(10) || account_suffix(10)
///
/// Pure: no registration check happens here, the caller owns eligibility.
///
/// # Errors
///
/// Returns `TicketError::UnresolvedEntity` if either side is not directory-backed,
/// and `TicketError::InsufficientEntropy` if either attribute is too short.
pub fn derive_ticket_secret<A: EntropySource, E: EntropySource>(
    account: &A,
    event: &E,
) -> Result<TicketSecret, TicketError> {
    if event.backing() != Backing::Stored {
        return Err(TicketError::UnresolvedEntity(event.kind()));
    }
    if account.backing() != Backing::Stored {
        return Err(TicketError::UnresolvedEntity(account.kind()));
    }
    let ev = fragment(event, EVENT_ENTROPY_LEN)?;
    let ac = fragment(account, ACCOUNT_ENTROPY_LEN)?;

    let mut out = [0u8; SECRET_LEN];
    out[..EVENT_ENTROPY_LEN].copy_from_slice(ev);
    out[EVENT_ENTROPY_LEN..].copy_from_slice(ac);
    Ok(TicketSecret(out))
}

/// A secret unlinked from any entity, drawn from the OS RNG.
#[must_use]
pub fn generate_random_secret() -> TicketSecret {
    let mut out = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut out);
    TicketSecret(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Account, EntityKind, Event};

    fn account() -> Account {
        Account::stored("5a1d1c0e-8f4e-4b8e-9d51-6f8a2c7d9e10", "pbkdf2_sha256$260000$salt$QmFzZTY0SGFzaA==")
    }

    fn event() -> Event {
        Event::stored("e1", "Launch party", "c0ffee00deadbeef")
    }

    #[test]
    fn layout_is_event_then_account() {
        let s = derive_ticket_secret(&account(), &event()).unwrap();
        assert_eq!(&s.0[..10], b"00deadbeef");
        assert_eq!(&s.0[10..], b"Y0SGFzaA==");
    }

    #[test]
    fn deterministic_and_sensitive_to_inputs() {
        let a = derive_ticket_secret(&account(), &event()).unwrap();
        assert_eq!(a, derive_ticket_secret(&account(), &event()).unwrap());

        let rotated = Account::stored("u", "pbkdf2_sha256$260000$salt$T3RoZXJIYXNo");
        assert_ne!(a, derive_ticket_secret(&rotated, &event()).unwrap());

        let other = Event::stored("e2", "Other", "c0ffee0012345678");
        assert_ne!(a, derive_ticket_secret(&account(), &other).unwrap());
    }

    #[test]
    fn transient_entities_are_rejected() {
        let ev = Event::transient("e", "t", "0123456789abcdef");
        let ac = Account::transient("u", "0123456789abcdef");
        assert_eq!(derive_ticket_secret(&account(), &ev).unwrap_err(), TicketError::UnresolvedEntity(EntityKind::Event));
        assert_eq!(derive_ticket_secret(&ac, &event()).unwrap_err(), TicketError::UnresolvedEntity(EntityKind::Account));
        assert!(matches!(derive_ticket_secret(&ac, &ev), Err(TicketError::UnresolvedEntity(_))));
    }

    #[test]
    fn short_event_hash_is_insufficient() {
        let ev = Event::stored("e", "t", "abc");
        assert_eq!(
            derive_ticket_secret(&account(), &ev).unwrap_err(),
            TicketError::InsufficientEntropy { entity: EntityKind::Event, needed: 10, available: 3 }
        );
    }

    #[test]
    fn short_credential_is_insufficient() {
        let ac = Account::stored("u", "tiny");
        assert!(matches!(
            derive_ticket_secret(&ac, &event()),
            Err(TicketError::InsufficientEntropy { entity: EntityKind::Account, .. })
        ));
    }

    #[test]
    fn random_secrets_differ() {
        assert_ne!(generate_random_secret(), generate_random_secret());
    }
}
