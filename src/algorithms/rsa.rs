//! Textbook RSA on integers. Padding lives in the sibling modules.

use num_bigint::{BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// `c = m^e mod n`.
#[inline]
pub(crate) fn rsa_encrypt<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint) -> BigUint {
    m.modpow(key.e(), key.n())
}

/// `m = c^d mod n` through the CRT, with the input blinded by a fresh random
/// factor.
pub(crate) fn rsa_decrypt<R, K>(rng: &mut R, priv_key: &K, c: &BigUint) -> Result<BigUint>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts + ?Sized,
{
    if priv_key.n().is_zero() || c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    let (mut blinded, mut unblinder) = blind(rng, priv_key, c)?;
    let mut m = crt_exp(priv_key, &blinded);
    let out = unblind(priv_key, &m, &unblinder);

    blinded.zeroize();
    unblinder.zeroize();
    m.zeroize();

    Ok(out)
}

/// [`rsa_decrypt`] followed by re-encryption of the result, guarding against
/// faults in the CRT computation leaking a factor of `n`.
pub(crate) fn rsa_decrypt_and_check<R, K>(rng: &mut R, priv_key: &K, c: &BigUint) -> Result<BigUint>
where
    R: CryptoRngCore + ?Sized,
    K: PrivateKeyParts + ?Sized,
{
    let m = rsa_decrypt(rng, priv_key, c)?;

    if &rsa_encrypt(priv_key, &m) != c {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Garner's recombination for two primes:
/// `h = qinv * (m1 - m2) mod p`, `m = m2 + h * q`.
fn crt_exp<K: PrivateKeyParts + ?Sized>(key: &K, c: &BigUint) -> BigUint {
    let p = &key.primes()[0];
    let q = &key.primes()[1];

    let mut m1 = c.modpow(key.dp(), p);
    let mut m2 = c.modpow(key.dq(), q);

    // m1 < p, so adding p keeps the difference non-negative
    let mut m2_mod_p = &m2 % p;
    let mut h = ((&m1 + p) - &m2_mod_p) * key.qinv() % p;
    let m = &h * q + &m2;

    m1.zeroize();
    m2.zeroize();
    m2_mod_p.zeroize();
    h.zeroize();

    m
}

/// Returns `(c * r^e mod n, r^-1 mod n)` for a random unit `r`.
fn blind<R, K>(rng: &mut R, key: &K, c: &BigUint) -> Result<(BigUint, BigUint)>
where
    R: CryptoRngCore + ?Sized,
    K: PublicKeyParts + ?Sized,
{
    let n = key.n();
    let (r, unblinder) = loop {
        let mut r = rng.gen_biguint_below(n);
        if r.is_zero() {
            r = BigUint::one();
        }
        if let Some(ir) = r.clone().mod_inverse(n) {
            match ir.into_biguint() {
                Some(ir) => break (r, ir),
                None => return Err(Error::Internal),
            }
        }
    };

    let mut rpowe = r.modpow(key.e(), n);
    let blinded = (c * &rpowe) % n;
    rpowe.zeroize();

    Ok((blinded, unblinder))
}

/// `m * unblinder mod n`.
fn unblind<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

/// `n = p * q`.
pub(crate) fn compute_modulus(primes: &[BigUint]) -> BigUint {
    primes.iter().fold(BigUint::one(), |acc, prime| acc * prime)
}

/// `d = e^-1 mod (p - 1)(q - 1)`.
pub(crate) fn compute_private_exponent_euler_totient(
    primes: &[BigUint],
    exp: &BigUint,
) -> Result<BigUint> {
    if primes.len() < 2 {
        return Err(Error::InvalidPrime);
    }

    let mut totient = BigUint::one();
    for prime in primes {
        totient *= prime.clone() - BigUint::one();
    }

    exp.clone()
        .mod_inverse(totient)
        .and_then(|d| d.into_biguint())
        .ok_or(Error::InvalidExponent)
}
