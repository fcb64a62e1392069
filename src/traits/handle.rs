//! Opaque key handle capability.

use alloc::vec::Vec;
use core::fmt;
use rand_core::CryptoRngCore;

use crate::config::{EncryptionPadding, SignatureAlgorithm};
use crate::errors::{Error, Result};

/// Whether a handle carries public or private key material.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyClass {
    /// Encrypts and verifies.
    Public,

    /// Decrypts and signs.
    Private,
}

impl KeyClass {
    /// Fails with [`Error::InvalidKeyHandle`] unless `self == expected`.
    pub fn require(self, expected: KeyClass) -> Result<()> {
        if self == expected {
            Ok(())
        } else {
            Err(Error::InvalidKeyHandle)
        }
    }
}

impl fmt::Display for KeyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyClass::Public => f.write_str("public"),
            KeyClass::Private => f.write_str("private"),
        }
    }
}

/// A single-block RSA primitive bound to one key.
///
/// Every method operates on at most one block of [`block_size`] bytes;
/// callers needing more use [`crate::chunked`]. Operations that do not match
/// the handle's [`key_class`] fail with [`Error::InvalidKeyHandle`]:
/// encryption and verification need a public handle, decryption and signing
/// a private one.
///
/// [`block_size`]: KeyHandle::block_size
/// [`key_class`]: KeyHandle::key_class
pub trait KeyHandle {
    /// Public or private.
    fn key_class(&self) -> KeyClass;

    /// Modulus size in bytes; the length of every ciphertext and signature.
    fn block_size(&self) -> usize;

    /// Encrypt one padded block.
    fn encrypt(
        &self,
        rng: &mut dyn CryptoRngCore,
        padding: EncryptionPadding,
        msg: &[u8],
    ) -> Result<Vec<u8>>;

    /// Decrypt one block, returning the unpadded plaintext. `rng` is used for
    /// blinding.
    fn decrypt(
        &self,
        rng: &mut dyn CryptoRngCore,
        padding: EncryptionPadding,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Hash and sign `msg`.
    fn sign(
        &self,
        rng: &mut dyn CryptoRngCore,
        algorithm: SignatureAlgorithm,
        msg: &[u8],
    ) -> Result<Vec<u8>>;

    /// Hash `msg` and check `signature` against it.
    ///
    /// Returns [`Error::Verification`] when the signature does not match.
    fn verify(&self, algorithm: SignatureAlgorithm, msg: &[u8], signature: &[u8]) -> Result<()>;
}
