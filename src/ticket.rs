use tracing::{debug, warn};
use crate::{
    directory::{AccountDirectory, Clock, EventDirectory, RegistrationRegistry, SystemClock},
    entity::{Account, Event},
    errors::TicketError,
    params::Params,
    passcode::{generate, verify_code},
    secret::derive_ticket_secret,
    types::{AccountId, EventId, Passcode, TicketSecret},
};

/// Issues and verifies ticket passcodes for registered (account, event) pairs.
///
/// Holds no state of its own; every call resolves through the collaborators
/// and recomputes the secret from scratch.
#[derive(Debug, Clone)]
pub struct TicketService<A, E, R, C = SystemClock> {
    accounts: A,
    events: E,
    registry: R,
    clock: C,
    params: Params,
}

impl<A, E, R> TicketService<A, E, R, SystemClock>
where
    A: AccountDirectory,
    E: EventDirectory,
    R: RegistrationRegistry,
{
    pub const fn new(accounts: A, events: E, registry: R) -> Self {
        Self { accounts, events, registry, clock: SystemClock, params: Params::DEFAULT }
    }
}

impl<A, E, R, C> TicketService<A, E, R, C>
where
    A: AccountDirectory,
    E: EventDirectory,
    R: RegistrationRegistry,
    C: Clock,
{
    pub const fn with_clock_and_params(accounts: A, events: E, registry: R, clock: C, params: Params) -> Self {
        Self { accounts, events, registry, clock, params }
    }

    pub const fn params(&self) -> &Params {
        &self.params
    }

    fn resolve(&self, account_id: &AccountId, event_id: &EventId) -> Result<(Account, Event), TicketError> {
        let Some(account) = self.accounts.resolve_account(account_id) else {
            debug!(account = %account_id, "account not found");
            return Err(TicketError::AccountNotFound(account_id.to_string()));
        };
        let Some(event) = self.events.resolve_event(event_id) else {
            debug!(event = %event_id, "event not found");
            return Err(TicketError::EventNotFound(event_id.to_string()));
        };
        Ok((account, event))
    }

    fn require_registered(&self, account_id: &AccountId, event_id: &EventId) -> Result<(), TicketError> {
        if self.registry.is_registered(account_id, event_id) {
            return Ok(());
        }
        warn!(account = %account_id, event = %event_id, "account not registered to event");
        Err(TicketError::NotRegistered { account: account_id.to_string(), event: event_id.to_string() })
    }

    fn derive(account: &Account, event: &Event) -> Result<TicketSecret, TicketError> {
        derive_ticket_secret(account, event).inspect_err(|e| {
            warn!(account = %account.id, event = %event.id, error = %e, "ticket secret derivation failed");
        })
    }

    /// Hand the ticket secret for an existing registration back to its holder.
    ///
    /// The raw secret lets the holder compute codes offline; anyone who sees
    /// it can too.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `EventNotFound`, `NotRegistered`, or a derivation
    /// precondition (`InsufficientEntropy`, `UnresolvedEntity`).
    pub fn issue_ticket(&self, account_id: &AccountId, event_id: &EventId) -> Result<TicketSecret, TicketError> {
        let (account, event) = self.resolve(account_id, event_id)?;
        self.require_registered(account_id, event_id)?;
        let secret = Self::derive(&account, &event)?;
        debug!(account = %account_id, event = %event_id, "ticket issued");
        Ok(secret)
    }

    /// Register the pair and issue its ticket in one step.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `EventNotFound`, `AlreadyRegistered` for a repeat
    /// attempt, or a derivation precondition.
    pub fn enroll_and_issue(&self, account_id: &AccountId, event_id: &EventId) -> Result<TicketSecret, TicketError> {
        let (account, event) = self.resolve(account_id, event_id)?;
        // Derive before registering so a bad entity never leaves a registration behind.
        let secret = Self::derive(&account, &event)?;
        self.registry.register(account_id, event_id).inspect_err(|e| {
            warn!(account = %account_id, event = %event_id, error = %e, "registration rejected");
        })?;
        debug!(account = %account_id, event = %event_id, "account enrolled, ticket issued");
        Ok(secret)
    }

    /// Check a presented passcode. A wrong code is `Ok(false)`, not an error.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `EventNotFound`, `MissingCode` for an absent or empty
    /// candidate, `NotRegistered`, or a derivation precondition.
    pub fn verify_ticket(
        &self,
        account_id: &AccountId,
        event_id: &EventId,
        candidate: Option<&str>,
    ) -> Result<bool, TicketError> {
        let (account, event) = self.resolve(account_id, event_id)?;
        let candidate = match candidate {
            Some(c) if !c.is_empty() => c,
            _ => return Err(TicketError::MissingCode),
        };
        self.require_registered(account_id, event_id)?;
        let secret = Self::derive(&account, &event)?;
        let valid = verify_code(&self.params, secret.as_ref(), candidate, self.clock.now())?;
        debug!(account = %account_id, event = %event_id, valid, "ticket verified");
        Ok(valid)
    }

    /// The authoritative code for a registered pair at the current instant.
    ///
    /// # Errors
    ///
    /// Same as [`Self::issue_ticket`], plus `TimeBeforeEpoch`.
    pub fn current_code(&self, account_id: &AccountId, event_id: &EventId) -> Result<Passcode, TicketError> {
        let secret = self.issue_ticket(account_id, event_id)?;
        generate(&self.params, secret.as_ref(), self.clock.now())
    }
}
