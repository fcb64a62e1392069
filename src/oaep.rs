//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! The label is always empty.

use alloc::vec::Vec;

use digest::{Digest, FixedOutputReset};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::oaep::*;
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Encrypts the given message with RSA and the padding scheme from
/// [PKCS#1 OAEP].
///
/// The message must be no longer than the length of the public modulus minus
/// `2 + (2 * D::output_size())`.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub(crate) fn encrypt<R, K, D>(rng: &mut R, pub_key: &K, msg: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PublicKeyParts,
    D: Digest + FixedOutputReset,
{
    key::check_public(pub_key)?;

    let em = encrypt_pad::<_, D>(rng, msg, pub_key.size())?;
    let int = Zeroizing::new(BigUint::from_bytes_be(&em));
    uint_to_be_pad(rsa_encrypt(pub_key, &int), pub_key.size())
}

/// Decrypts a ciphertext produced by [`encrypt`] with the same digest.
///
/// Note that whether this function returns an error or not discloses secret
/// information.
#[inline]
pub(crate) fn decrypt<R, K, D>(rng: &mut R, priv_key: &K, ciphertext: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts,
    D: Digest + FixedOutputReset,
{
    key::check_public(priv_key)?;
    if ciphertext.len() != priv_key.size() {
        return Err(Error::Decryption);
    }

    let c = BigUint::from_bytes_be(ciphertext);
    let em = rsa_decrypt_and_check(rng, priv_key, &c)?;
    let mut em = uint_to_zeroizing_be_pad(em, priv_key.size())?;

    decrypt_unpad::<D>(&mut em, priv_key.size())
}
