use std::time::{SystemTime, UNIX_EPOCH};
use crate::{
    entity::{Account, Event},
    errors::TicketError,
    types::{AccountId, EventId},
};

/// Account lookup. `None` means the account does not exist.
pub trait AccountDirectory {
    fn resolve_account(&self, id: &AccountId) -> Option<Account>;
}

/// Event lookup. `None` means the event does not exist.
pub trait EventDirectory {
    fn resolve_event(&self, id: &EventId) -> Option<Event>;
}

/// Which accounts hold a place at which events.
pub trait RegistrationRegistry {
    fn is_registered(&self, account: &AccountId, event: &EventId) -> bool;

    /// Record a new registration.
    ///
    /// # Errors
    ///
    /// Returns `TicketError::AlreadyRegistered` if the pair already exists.
    fn register(&self, account: &AccountId, event: &EventId) -> Result<(), TicketError>;
}

/// Source of "now" in Unix seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// A clock pinned to one instant, for tests and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

impl<T: AccountDirectory + ?Sized> AccountDirectory for &T {
    fn resolve_account(&self, id: &AccountId) -> Option<Account> { (**self).resolve_account(id) }
}

impl<T: EventDirectory + ?Sized> EventDirectory for &T {
    fn resolve_event(&self, id: &EventId) -> Option<Event> { (**self).resolve_event(id) }
}

impl<T: RegistrationRegistry + ?Sized> RegistrationRegistry for &T {
    fn is_registered(&self, account: &AccountId, event: &EventId) -> bool { (**self).is_registered(account, event) }
    fn register(&self, account: &AccountId, event: &EventId) -> Result<(), TicketError> { (**self).register(account, event) }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> u64 { (**self).now() }
}
