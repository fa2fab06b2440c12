use core::fmt;
use crate::types::{AccountId, EventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    Event,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Account => "account",
            Self::Event => "event",
        })
    }
}

/// Whether an entity was loaded from a directory or only built in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Transient,
    Stored,
}

/// Narrow capability the secret deriver needs from an account or event.
pub trait EntropySource {
    fn kind(&self) -> EntityKind;

    fn backing(&self) -> Backing;

    /// The trailing `n` bytes of the stable attribute, or `None` if it is shorter.
    fn entropy_suffix(&self, n: usize) -> Option<&[u8]>;

    /// Length of the stable attribute in bytes.
    fn entropy_len(&self) -> usize;
}

fn suffix(bytes: &[u8], n: usize) -> Option<&[u8]> {
    bytes.len().checked_sub(n).map(|start| &bytes[start..])
}

/// An account as the deriver sees it.
///
/// `credential_hash` is whatever stable secret-bearing string the account
/// store keeps (a password hash in the original deployment). Rotating it
/// changes every ticket secret derived for this account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub credential_hash: String,
    backing: Backing,
}

impl Account {
    /// An account that has not been persisted; the deriver rejects it.
    #[must_use]
    pub fn transient(id: impl Into<AccountId>, credential_hash: impl Into<String>) -> Self {
        Self { id: id.into(), credential_hash: credential_hash.into(), backing: Backing::Transient }
    }

    /// An account as returned by a directory.
    #[must_use]
    pub fn stored(id: impl Into<AccountId>, credential_hash: impl Into<String>) -> Self {
        Self { id: id.into(), credential_hash: credential_hash.into(), backing: Backing::Stored }
    }
}

impl EntropySource for Account {
    fn kind(&self) -> EntityKind { EntityKind::Account }
    fn backing(&self) -> Backing { self.backing }
    fn entropy_suffix(&self, n: usize) -> Option<&[u8]> { suffix(self.credential_hash.as_bytes(), n) }
    fn entropy_len(&self) -> usize { self.credential_hash.len() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Immutable hash-like attribute assigned at creation.
    pub hash: String,
    backing: Backing,
}

impl Event {
    #[must_use]
    pub fn transient(id: impl Into<EventId>, title: impl Into<String>, hash: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), hash: hash.into(), backing: Backing::Transient }
    }

    #[must_use]
    pub fn stored(id: impl Into<EventId>, title: impl Into<String>, hash: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), hash: hash.into(), backing: Backing::Stored }
    }
}

impl EntropySource for Event {
    fn kind(&self) -> EntityKind { EntityKind::Event }
    fn backing(&self) -> Backing { self.backing }
    fn entropy_suffix(&self, n: usize) -> Option<&[u8]> { suffix(self.hash.as_bytes(), n) }
    fn entropy_len(&self) -> usize { self.hash.len() }
}
