use core::marker::PhantomData;
use sha2::{
    Sha256,
    digest::{Digest, Output, core_api::{Block, BlockSizeUser}},
};
use crate::{errors::TicketError, params::Params, types::SECRET_LEN};

/// RFC 2104 keyed hash over a pluggable block hash `D`.
///
/// Built from the raw hash rather than a packaged HMAC so the construction
/// can be checked byte-for-byte against an independent implementation.
/// Only `SECRET_LEN`-byte secrets are accepted; they are zero-padded to the
/// block size of `D`, never hashed down.
pub struct KeyedHashEngine<D> {
    inner_pad: u8,
    outer_pad: u8,
    _hash: PhantomData<fn() -> D>,
}

/// The engine instantiated with the crate's fixed hash choice.
pub type Sha256Engine = KeyedHashEngine<Sha256>;

impl<D> Clone for KeyedHashEngine<D> {
    fn clone(&self) -> Self { *self }
}
impl<D> Copy for KeyedHashEngine<D> {}

impl<D> core::fmt::Debug for KeyedHashEngine<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyedHashEngine")
            .field("inner_pad", &self.inner_pad)
            .field("outer_pad", &self.outer_pad)
            .finish()
    }
}

impl<D> Default for KeyedHashEngine<D> {
    fn default() -> Self {
        Self::new(&Params::default())
    }
}

impl<D> KeyedHashEngine<D> {
    #[must_use]
    pub const fn new(params: &Params) -> Self {
        Self { inner_pad: params.inner_pad(), outer_pad: params.outer_pad(), _hash: PhantomData }
    }
}

impl<D: Digest + BlockSizeUser + Clone> KeyedHashEngine<D> {
    /// H( (K ^ opad) || H( (K ^ ipad) || message ) ), K zero-padded to the block size.
    ///
    /// # Errors
    ///
    /// Returns `TicketError::InvalidSecretLength` unless `secret` is exactly
    /// `SECRET_LEN` bytes, `TicketError::EmptyMessage` for an empty message, and
    /// `TicketError::InvalidParams` if `D` has a block shorter than the secret.
    pub fn compute(&self, secret: &[u8], message: &[u8]) -> Result<Output<D>, TicketError> {
        if secret.len() != SECRET_LEN {
            return Err(TicketError::InvalidSecretLength { expected: SECRET_LEN, got: secret.len() });
        }
        if message.is_empty() {
            return Err(TicketError::EmptyMessage);
        }
        if D::block_size() < SECRET_LEN {
            return Err(TicketError::InvalidParams("hash block size is shorter than the secret"));
        }

        // Zero bytes past the secret XOR to the bare pad constant.
        let mut ipad_key = Block::<D>::default();
        let mut opad_key = Block::<D>::default();
        ipad_key.fill(self.inner_pad);
        opad_key.fill(self.outer_pad);
        for ((i, o), b) in ipad_key.iter_mut().zip(opad_key.iter_mut()).zip(secret) {
            *i ^= b;
            *o ^= b;
        }

        let inner = D::new().chain_update(&ipad_key).chain_update(message).finalize();
        Ok(D::new().chain_update(&opad_key).chain_update(&inner).finalize())
    }
}

/// Keyed hash with the standard pads, for callers that do not carry `Params`.
///
/// # Errors
///
/// See [`KeyedHashEngine::compute`].
pub fn keyed_hash<D: Digest + BlockSizeUser + Clone>(secret: &[u8], message: &[u8]) -> Result<Output<D>, TicketError> {
    KeyedHashEngine::<D>::default().compute(secret, message)
}
