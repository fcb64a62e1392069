//! Support for the [Probabilistic Signature Scheme] (PSS) a.k.a. RSASSA-PSS.
//!
//! Designed by Mihir Bellare and Phillip Rogaway. Specified in [RFC8017 § 8.1].
//! The salt is as long as the digest output.
//!
//! [Probabilistic Signature Scheme]: https://en.wikipedia.org/wiki/Probabilistic_signature_scheme
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::pad::uint_to_be_pad;
use crate::algorithms::pss::*;
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Hashes `msg` with `D` and signs it with a random salt.
pub(crate) fn sign<R, K, D>(rng: &mut R, priv_key: &K, msg: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts,
    D: Digest + FixedOutputReset,
{
    let m_hash = D::digest(msg);

    let mut salt = vec![0; <D as Digest>::output_size()];
    rng.fill_bytes(&mut salt[..]);

    let em = emsa_pss_encode::<D>(&m_hash, priv_key.n().bits() - 1, &salt)?;
    let em = BigUint::from_bytes_be(&em);
    let sig = rsa_decrypt_and_check(rng, priv_key, &em).map_err(|_| Error::Signing)?;
    uint_to_be_pad(sig, priv_key.size())
}

/// Verifies a PSS signature over `msg`.
pub(crate) fn verify<K, D>(pub_key: &K, msg: &[u8], sig: &[u8]) -> Result<()>
where
    K: PublicKeyParts,
    D: Digest + FixedOutputReset,
{
    let s = BigUint::from_bytes_be(sig);
    if sig.len() != pub_key.size() || &s >= pub_key.n() {
        return Err(Error::Verification);
    }

    let mut em = uint_to_be_pad(rsa_encrypt(pub_key, &s), pub_key.size())
        .map_err(|_| Error::Verification)?;

    emsa_pss_verify::<D>(
        &D::digest(msg),
        &mut em,
        <D as Digest>::output_size(),
        pub_key.n().bits(),
    )
}
