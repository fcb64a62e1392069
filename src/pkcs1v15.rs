//! `RSAES-PKCS1-v1_5` encryption ([RFC8017 § 7.2]) and `RSASSA-PKCS1-v1_5`
//! signatures ([RFC8017 § 8.2]).
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec::Vec;
use const_oid::AssociatedOid;
use digest::Digest;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::pkcs1v15::*;
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Encrypts the given message with RSA and the padding
/// scheme from PKCS#1 v1.5.  The message must be no longer than the
/// length of the public modulus minus 11 bytes.
#[inline]
pub(crate) fn encrypt<R, K>(rng: &mut R, pub_key: &K, msg: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PublicKeyParts,
{
    key::check_public(pub_key)?;

    let em = encrypt_pad(rng, msg, pub_key.size())?;
    let int = Zeroizing::new(BigUint::from_bytes_be(&em));
    uint_to_be_pad(rsa_encrypt(pub_key, &int), pub_key.size())
}

/// Decrypts a plaintext using RSA and the padding scheme from PKCS#1 v1.5.
///
/// Note that whether this function returns an error or not discloses secret
/// information. Callers must not report padding failures to untrusted
/// parties in a distinguishable way.
#[inline]
pub(crate) fn decrypt<R, K>(rng: &mut R, priv_key: &K, ciphertext: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts,
{
    key::check_public(priv_key)?;
    if ciphertext.len() != priv_key.size() {
        return Err(Error::Decryption);
    }

    let c = BigUint::from_bytes_be(ciphertext);
    let em = rsa_decrypt_and_check(rng, priv_key, &c)?;
    let em = uint_to_zeroizing_be_pad(em, priv_key.size())?;

    encrypt_unpad(&em, priv_key.size())
}

/// Hashes `msg` with `D` and signs the `DigestInfo`.
///
/// The signature is deterministic; `rng` only blinds the private key
/// operation.
#[inline]
pub(crate) fn sign<R, K, D>(rng: &mut R, priv_key: &K, msg: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts,
    D: Digest + AssociatedOid,
{
    let prefix = digest_info_prefix::<D>();
    let hashed = D::digest(msg);

    let em = sign_pad(&prefix, &hashed, priv_key.size())?;
    let em = BigUint::from_bytes_be(&em);
    let sig = rsa_decrypt_and_check(rng, priv_key, &em).map_err(|_| Error::Signing)?;
    uint_to_be_pad(sig, priv_key.size())
}

/// Verifies an RSA PKCS#1 v1.5 signature over `msg`.
#[inline]
pub(crate) fn verify<K, D>(pub_key: &K, msg: &[u8], sig: &[u8]) -> Result<()>
where
    K: PublicKeyParts,
    D: Digest + AssociatedOid,
{
    let s = BigUint::from_bytes_be(sig);
    if sig.len() != pub_key.size() || &s >= pub_key.n() {
        return Err(Error::Verification);
    }

    let prefix = digest_info_prefix::<D>();
    let hashed = D::digest(msg);

    let em = uint_to_be_pad(rsa_encrypt(pub_key, &s), pub_key.size())
        .map_err(|_| Error::Verification)?;

    sign_unpad(&prefix, &hashed, &em, pub_key.size())
}
