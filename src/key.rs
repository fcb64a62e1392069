use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand_core::CryptoRngCore;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroize;

use crate::algorithms::generate::generate_key_with_exp;
use crate::config::{EncryptionPadding, SignatureAlgorithm};
use crate::errors::{Error, Result};
use crate::traits::{KeyClass, KeyHandle, PrivateKeyParts, PublicKeyParts};
use crate::{oaep, pkcs1v15, pss};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    ///
    /// Typically 0x10001 (65537)
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
///
/// Only two-prime keys are supported. Secret components are wiped on drop.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
    /// Prime factors `p` and `q` of N.
    primes: Vec<BigUint>,
    /// D mod (P-1)
    dp: BigUint,
    /// D mod (Q-1)
    dq: BigUint,
    /// Q^-1 mod P
    qinv: BigUint,
}

impl Eq for RsaPrivateKey {}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.primes == other.primes
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", self.n())
            .field("e", self.e())
            .finish_non_exhaustive()
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.primes.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Minimum value of the public exponent `e`.
    pub const MIN_PUB_EXPONENT: u64 = 2;

    /// Maximum value of the public exponent `e`.
    pub const MAX_PUB_EXPONENT: u64 = (1 << 33) - 1;

    /// Maximum size of the modulus `n` in bits.
    pub const MAX_SIZE: usize = 4096;

    /// Create a new public key from its components.
    ///
    /// This function accepts public keys with a modulus size up to 4096-bits,
    /// i.e. [`RsaPublicKey::MAX_SIZE`].
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        Self::new_with_max_size(n, e, Self::MAX_SIZE)
    }

    /// Create a new public key from its components.
    pub fn new_with_max_size(n: BigUint, e: BigUint, max_size: usize) -> Result<Self> {
        let k = Self { n, e };
        check_public_with_max_size(&k, max_size)?;
        Ok(k)
    }

    /// Create a new public key from big-endian modulus and exponent bytes.
    pub fn from_be_bytes(n: &[u8], e: &[u8]) -> Result<Self> {
        Self::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
    }
}

impl KeyHandle for RsaPublicKey {
    fn key_class(&self) -> KeyClass {
        KeyClass::Public
    }

    fn block_size(&self) -> usize {
        self.size()
    }

    fn encrypt(
        &self,
        rng: &mut dyn CryptoRngCore,
        padding: EncryptionPadding,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        match padding {
            EncryptionPadding::Pkcs1v15 => pkcs1v15::encrypt(rng, self, msg),
            EncryptionPadding::OaepSha256 => oaep::encrypt::<_, _, Sha256>(rng, self, msg),
            EncryptionPadding::Raw => Err(Error::UnsupportedAlgorithm),
        }
    }

    fn decrypt(
        &self,
        _rng: &mut dyn CryptoRngCore,
        _padding: EncryptionPadding,
        _ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        Err(Error::InvalidKeyHandle)
    }

    fn sign(
        &self,
        _rng: &mut dyn CryptoRngCore,
        _algorithm: SignatureAlgorithm,
        _msg: &[u8],
    ) -> Result<Vec<u8>> {
        Err(Error::InvalidKeyHandle)
    }

    fn verify(&self, algorithm: SignatureAlgorithm, msg: &[u8], signature: &[u8]) -> Result<()> {
        match algorithm {
            SignatureAlgorithm::Pkcs1v15Sha256 => pkcs1v15::verify::<_, Sha256>(self, msg, signature),
            SignatureAlgorithm::Pkcs1v15Sha384 => pkcs1v15::verify::<_, Sha384>(self, msg, signature),
            SignatureAlgorithm::Pkcs1v15Sha512 => pkcs1v15::verify::<_, Sha512>(self, msg, signature),
            SignatureAlgorithm::PssSha256 => pss::verify::<_, Sha256>(self, msg, signature),
        }
    }
}

impl RsaPrivateKey {
    /// Default exponent for RSA keys.
    const EXP: u64 = 65537;

    /// Generate a new two-prime RSA key pair of the given bit size using the
    /// passed in `rng` and the default public exponent 65537.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_with_exp(rng, bit_size, &BigUint::from(Self::EXP))
    }

    /// Generate a new RSA key pair of the given bit size and the public
    /// exponent using the passed in `rng`.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: &BigUint,
    ) -> Result<RsaPrivateKey> {
        if bit_size > RsaPublicKey::MAX_SIZE {
            return Err(Error::ModulusTooLarge);
        }

        let components = generate_key_with_exp(rng, bit_size, exp)?;
        RsaPrivateKey::from_components(
            components.n,
            components.e,
            components.d,
            components.primes,
        )
    }

    /// Constructs an RSA key pair from individual components:
    ///
    /// - `n`: RSA modulus
    /// - `e`: public exponent (i.e. encrypting exponent)
    /// - `d`: private exponent (i.e. decrypting exponent)
    /// - `primes`: the two prime factors of `n`
    ///
    /// The key is validated and the CRT values are precomputed.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        primes: Vec<BigUint>,
    ) -> Result<RsaPrivateKey> {
        if primes.len() != 2 {
            return Err(Error::InvalidPrime);
        }

        let mut k = RsaPrivateKey {
            pubkey_components: RsaPublicKey { n, e },
            d,
            primes,
            dp: BigUint::zero(),
            dq: BigUint::zero(),
            qinv: BigUint::zero(),
        };

        k.validate()?;
        k.precompute()?;

        Ok(k)
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Fills in `dp`, `dq` and `qinv`.
    fn precompute(&mut self) -> Result<()> {
        let p = &self.primes[0];
        let q = &self.primes[1];

        let qinv = q
            .clone()
            .mod_inverse(p)
            .and_then(|qinv| qinv.into_biguint())
            .ok_or(Error::InvalidPrime)?;

        self.dp = &self.d % (p.clone() - BigUint::one());
        self.dq = &self.d % (q.clone() - BigUint::one());
        self.qinv = qinv;

        Ok(())
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        // Check that Πprimes == n.
        let mut m = BigUint::one();
        for prime in &self.primes {
            // Any primes ≤ 1 will cause divide-by-zero panics later.
            if *prime <= BigUint::one() {
                return Err(Error::InvalidPrime);
            }
            m *= prime;
        }
        if m != *self.n() {
            return Err(Error::InvalidModulus);
        }

        // Check that de ≡ 1 mod p-1, for each prime.
        // This implies that e is coprime to each p-1 as e has a multiplicative
        // inverse. Therefore e is coprime to lcm(p-1,q-1) = λ(N).
        // It also implies that a^de ≡ a mod p as a^(p-1) ≡ 1 mod p. Thus a^de
        // ≡ a mod n for all a coprime to n, as required.
        let de = &self.d * self.e();
        for prime in &self.primes {
            let congruence = &de % (prime.clone() - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn primes(&self) -> &[BigUint] {
        &self.primes
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl KeyHandle for RsaPrivateKey {
    fn key_class(&self) -> KeyClass {
        KeyClass::Private
    }

    fn block_size(&self) -> usize {
        self.size()
    }

    fn encrypt(
        &self,
        _rng: &mut dyn CryptoRngCore,
        _padding: EncryptionPadding,
        _msg: &[u8],
    ) -> Result<Vec<u8>> {
        Err(Error::InvalidKeyHandle)
    }

    fn decrypt(
        &self,
        rng: &mut dyn CryptoRngCore,
        padding: EncryptionPadding,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        match padding {
            EncryptionPadding::Pkcs1v15 => pkcs1v15::decrypt(rng, self, ciphertext),
            EncryptionPadding::OaepSha256 => oaep::decrypt::<_, _, Sha256>(rng, self, ciphertext),
            EncryptionPadding::Raw => Err(Error::UnsupportedAlgorithm),
        }
    }

    fn sign(
        &self,
        rng: &mut dyn CryptoRngCore,
        algorithm: SignatureAlgorithm,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        match algorithm {
            SignatureAlgorithm::Pkcs1v15Sha256 => pkcs1v15::sign::<_, _, Sha256>(rng, self, msg),
            SignatureAlgorithm::Pkcs1v15Sha384 => pkcs1v15::sign::<_, _, Sha384>(rng, self, msg),
            SignatureAlgorithm::Pkcs1v15Sha512 => pkcs1v15::sign::<_, _, Sha512>(rng, self, msg),
            SignatureAlgorithm::PssSha256 => pss::sign::<_, _, Sha256>(rng, self, msg),
        }
    }

    fn verify(&self, _algorithm: SignatureAlgorithm, _msg: &[u8], _signature: &[u8]) -> Result<()> {
        Err(Error::InvalidKeyHandle)
    }
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    check_public_with_max_size(public_key, RsaPublicKey::MAX_SIZE)
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
fn check_public_with_max_size(public_key: &impl PublicKeyParts, max_size: usize) -> Result<()> {
    if public_key.n().bits() > max_size {
        return Err(Error::ModulusTooLarge);
    }

    // an even or zero modulus has no valid private counterpart
    if public_key.n().is_zero() || public_key.n().is_even() {
        return Err(Error::InvalidModulus);
    }

    let e = public_key
        .e()
        .to_u64()
        .ok_or(Error::PublicExponentTooLarge)?;

    if e < RsaPublicKey::MIN_PUB_EXPONENT {
        return Err(Error::PublicExponentTooSmall);
    }

    if e > RsaPublicKey::MAX_PUB_EXPONENT {
        return Err(Error::PublicExponentTooLarge);
    }

    Ok(())
}
