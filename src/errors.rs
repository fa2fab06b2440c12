use thiserror::Error;

use crate::entity::EntityKind;

pub type Result<T> = core::result::Result<T, TicketError>;

/// Coarse grouping of [`TicketError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or missing request fields.
    Validation,
    /// Account or event lookup failed.
    NotFound,
    /// Internal misuse of the engine; never expected in a correctly wired system.
    Precondition,
    /// Business-rule rejection, surfaced to the caller verbatim.
    Policy,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketError {
    #[error("invalid secret length: expected {expected} got {got}")]
    InvalidSecretLength { expected: usize, got: usize },

    #[error("keyed hash over an empty message")]
    EmptyMessage,

    #[error("{0} has no backing store")]
    UnresolvedEntity(EntityKind),

    #[error("insufficient entropy in {entity}: need {needed} bytes, have {available}")]
    InsufficientEntropy { entity: EntityKind, needed: usize, available: usize },

    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),

    #[error("time {now} precedes epoch {epoch}")]
    TimeBeforeEpoch { now: u64, epoch: u64 },

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("passcode was not supplied")]
    MissingCode,

    #[error("account {account} is already registered to event {event}")]
    AlreadyRegistered { account: String, event: String },

    #[error("account {account} is not registered to event {event}")]
    NotRegistered { account: String, event: String },
}

impl TicketError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingCode => ErrorClass::Validation,
            Self::AccountNotFound(_) | Self::EventNotFound(_) => ErrorClass::NotFound,
            Self::InvalidSecretLength { .. }
            | Self::EmptyMessage
            | Self::UnresolvedEntity(_)
            | Self::InsufficientEntropy { .. }
            | Self::InvalidParams(_)
            | Self::TimeBeforeEpoch { .. } => ErrorClass::Precondition,
            Self::AlreadyRegistered { .. } | Self::NotRegistered { .. } => ErrorClass::Policy,
        }
    }

    /// Precondition failures signal a wiring bug, not a retryable condition.
    #[must_use]
    pub const fn is_programming_error(&self) -> bool {
        matches!(self.class(), ErrorClass::Precondition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy() {
        assert_eq!(TicketError::MissingCode.class(), ErrorClass::Validation);
        assert_eq!(TicketError::AccountNotFound("u".into()).class(), ErrorClass::NotFound);
        assert_eq!(TicketError::EventNotFound("e".into()).class(), ErrorClass::NotFound);
        assert_eq!(TicketError::EmptyMessage.class(), ErrorClass::Precondition);
        assert_eq!(
            TicketError::NotRegistered { account: "u".into(), event: "e".into() }.class(),
            ErrorClass::Policy
        );
        assert!(TicketError::UnresolvedEntity(EntityKind::Event).is_programming_error());
        assert!(!TicketError::MissingCode.is_programming_error());
    }

    #[test]
    fn messages_name_the_entity() {
        let e = TicketError::InsufficientEntropy { entity: EntityKind::Event, needed: 10, available: 4 };
        assert_eq!(e.to_string(), "insufficient entropy in event: need 10 bytes, have 4");
    }
}
