use core::convert::TryFrom;
use core::fmt;
use crate::errors::TicketError;

pub const SECRET_LEN: usize = 20;                    // ticket secret, bytes
pub const EVENT_ENTROPY_LEN: usize = SECRET_LEN / 2; // leading half, from the event
pub const ACCOUNT_ENTROPY_LEN: usize = SECRET_LEN - EVENT_ENTROPY_LEN;
pub const COUNTER_LEN: usize = 8;                    // BE64 time step
pub const DEFAULT_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_DIGITS: u32 = 6;
pub const MAX_SKEW_STEPS: u64 = 10;                  // verify window is at most 2 * 10 + 1 steps
pub const MAX_DIGITS: u32 = 9;                       // 10^9 still fits the 31-bit truncation
pub const INNER_PAD: u8 = 0x36;
pub const OUTER_PAD: u8 = 0x5c;

/// Per-(account, event) secret. Recomputed on demand and never stored.
///
/// `Debug` is redacted so a secret cannot leak through logs.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct TicketSecret(pub [u8; SECRET_LEN]);

impl TicketSecret {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for TicketSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TicketSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TicketSecret(<redacted>)")
    }
}

impl TryFrom<&[u8]> for TicketSecret {
    type Error = TicketError;
    fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
        if b.len() != SECRET_LEN {
            return Err(TicketError::InvalidSecretLength { expected: SECRET_LEN, got: b.len() });
        }
        let mut arr = [0u8; SECRET_LEN];
        arr.copy_from_slice(b);
        Ok(Self(arr))
    }
}

/// Fixed-width, zero-padded decimal passcode.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Passcode(String);

impl Passcode {
    pub(crate) const fn new_unchecked(digits: String) -> Self {
        Self(digits)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Passcode({})", self.0)
    }
}

impl PartialEq<str> for Passcode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Passcode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// Opaque identifiers; the format (usually a UUID string) is the directory's business.
macro_rules! impl_string_id {
    ($t:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $t(String);

        impl $t {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

            #[must_use]
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl From<&str> for $t {
            fn from(s: &str) -> Self { Self(s.to_owned()) }
        }

        impl From<String> for $t {
            fn from(s: String) -> Self { Self(s) }
        }
    }
}
impl_string_id!(AccountId);
impl_string_id!(EventId);
