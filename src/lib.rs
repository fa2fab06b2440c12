#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Ticket passcodes
//!
//! Short-lived numeric passcodes that prove an account holds a place at an
//! event, without storing any ticket record. The ticket secret is recomputed
//! from the account and the event on every call.

// Fixed choices:
// - Keyed hash: RFC 2104 construction over SHA-256 (64-byte block), built from the raw hash
// - Secret: 20 bytes = event hash suffix (10) || account credential suffix (10)
// - Counter: BE64( floor((now - epoch) / 30) )
// - Code: RFC 4226 dynamic truncation, 6 decimal digits, zero-padded

// Core modules
pub mod types;
pub mod errors;
pub mod params;
pub mod ser;
pub mod keyed_hash;
pub mod passcode;
pub mod entity;
pub mod secret;
pub mod directory;
pub mod memory;
pub mod ticket;

// Re-export commonly used types and functions
pub use types::*;
pub use errors::{ErrorClass, TicketError};
pub use params::Params;
pub use keyed_hash::{KeyedHashEngine, Sha256Engine, keyed_hash};
pub use passcode::{counter_bytes, counter_for, generate, generate_at_counter, truncate, verify_code};
pub use entity::{Account, Backing, EntityKind, EntropySource, Event};
pub use secret::{derive_ticket_secret, generate_random_secret};
pub use directory::{AccountDirectory, Clock, EventDirectory, FixedClock, RegistrationRegistry, SystemClock};
pub use memory::InMemoryDirectory;
pub use ticket::TicketService;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
