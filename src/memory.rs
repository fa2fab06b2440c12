use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};
use crate::{
    directory::{AccountDirectory, EventDirectory, RegistrationRegistry},
    entity::{Account, Event},
    errors::TicketError,
    types::{AccountId, EventId},
};

/// Thread-safe in-process store implementing all three collaborator traits.
///
/// Everything inserted here is treated as persisted: lookups hand back
/// directory-backed entities.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    accounts: RwLock<HashMap<AccountId, String>>,
    events: RwLock<HashMap<EventId, (String, String)>>,
    registrations: RwLock<HashSet<(AccountId, EventId)>>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account. Replacing the credential hash changes
    /// every ticket secret derived for it afterwards.
    pub fn put_account(&self, id: impl Into<AccountId>, credential_hash: impl Into<String>) {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), credential_hash.into());
    }

    pub fn put_event(&self, id: impl Into<EventId>, title: impl Into<String>, hash: impl Into<String>) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), (title.into(), hash.into()));
    }

    #[must_use]
    pub fn registered_events(&self, account: &AccountId) -> Vec<EventId> {
        let regs = self.registrations.read().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<EventId> = regs.iter().filter(|(a, _)| a == account).map(|(_, e)| e.clone()).collect();
        out.sort();
        out
    }
}

impl AccountDirectory for InMemoryDirectory {
    fn resolve_account(&self, id: &AccountId) -> Option<Account> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.get(id).map(|hash| Account::stored(id.clone(), hash.clone()))
    }
}

impl EventDirectory for InMemoryDirectory {
    fn resolve_event(&self, id: &EventId) -> Option<Event> {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        events.get(id).map(|(title, hash)| Event::stored(id.clone(), title.clone(), hash.clone()))
    }
}

impl RegistrationRegistry for InMemoryDirectory {
    fn is_registered(&self, account: &AccountId, event: &EventId) -> bool {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(account.clone(), event.clone()))
    }

    fn register(&self, account: &AccountId, event: &EventId) -> Result<(), TicketError> {
        let inserted = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((account.clone(), event.clone()));
        if inserted {
            Ok(())
        } else {
            Err(TicketError::AlreadyRegistered { account: account.to_string(), event: event.to_string() })
        }
    }
}
