//! PKCS#1, PKCS#8 and X.509 encoding support.
//!
//! Decoding goes through the `pkcs1`, `pkcs8` and `spki` crates. Public keys
//! are encoded with the minimal encoder in [`crate::der`].

use alloc::vec::Vec;
use core::convert::{TryFrom, TryInto};

use num_bigint::BigUint;
use pkcs1::der::{asn1::UintRef, Encode};
use zeroize::Zeroizing;

use crate::der::{encode_integer, encode_sequence};
use crate::errors::{Error, Result};
use crate::format::pkcs1_to_x509;
use crate::traits::{PrivateKeyParts, PublicKeyParts};
use crate::{RsaPrivateKey, RsaPublicKey};

/// Verify that the `AlgorithmIdentifier` for a key is `rsaEncryption` with
/// `NULL` parameters.
pub(crate) fn verify_algorithm_id(algorithm: &spki::AlgorithmIdentifierRef<'_>) -> spki::Result<()> {
    algorithm.assert_algorithm_oid(pkcs1::ALGORITHM_OID)?;

    if algorithm.parameters_any()? != pkcs1::der::asn1::Null.into() {
        return Err(spki::Error::KeyMalformed);
    }

    Ok(())
}

impl TryFrom<pkcs1::RsaPublicKey<'_>> for RsaPublicKey {
    type Error = Error;

    fn try_from(pkcs1_key: pkcs1::RsaPublicKey<'_>) -> Result<Self> {
        RsaPublicKey::from_be_bytes(
            pkcs1_key.modulus.as_bytes(),
            pkcs1_key.public_exponent.as_bytes(),
        )
    }
}

impl TryFrom<spki::SubjectPublicKeyInfoRef<'_>> for RsaPublicKey {
    type Error = Error;

    fn try_from(spki: spki::SubjectPublicKeyInfoRef<'_>) -> Result<Self> {
        verify_algorithm_id(&spki.algorithm)?;

        let bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or(Error::KeyImport)?;

        pkcs1::RsaPublicKey::try_from(bytes)?.try_into()
    }
}

impl TryFrom<pkcs1::RsaPrivateKey<'_>> for RsaPrivateKey {
    type Error = Error;

    fn try_from(pkcs1_key: pkcs1::RsaPrivateKey<'_>) -> Result<Self> {
        // Multi-prime RSA keys not currently supported
        if pkcs1_key.version() != pkcs1::Version::TwoPrime {
            return Err(Error::KeyImport);
        }

        let n = BigUint::from_bytes_be(pkcs1_key.modulus.as_bytes());
        let e = BigUint::from_bytes_be(pkcs1_key.public_exponent.as_bytes());
        let d = BigUint::from_bytes_be(pkcs1_key.private_exponent.as_bytes());
        let prime1 = BigUint::from_bytes_be(pkcs1_key.prime1.as_bytes());
        let prime2 = BigUint::from_bytes_be(pkcs1_key.prime2.as_bytes());

        RsaPrivateKey::from_components(n, e, d, vec![prime1, prime2])
    }
}

impl TryFrom<pkcs8::PrivateKeyInfo<'_>> for RsaPrivateKey {
    type Error = Error;

    fn try_from(private_key_info: pkcs8::PrivateKeyInfo<'_>) -> Result<Self> {
        verify_algorithm_id(&private_key_info.algorithm)?;
        pkcs1::RsaPrivateKey::try_from(private_key_info.private_key)?.try_into()
    }
}

impl RsaPublicKey {
    /// Decode a PKCS#1 `RSAPublicKey`.
    pub fn from_pkcs1_der(bytes: &[u8]) -> Result<Self> {
        pkcs1::RsaPublicKey::try_from(bytes)?.try_into()
    }

    /// Decode an X.509 `SubjectPublicKeyInfo`.
    pub fn from_public_key_der(bytes: &[u8]) -> Result<Self> {
        spki::SubjectPublicKeyInfoRef::try_from(bytes)?.try_into()
    }

    /// PKCS#1 `RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }`.
    ///
    /// This is the key's native external representation.
    pub fn to_pkcs1_der(&self) -> Vec<u8> {
        let n = encode_integer(&self.n().to_bytes_be());
        let e = encode_integer(&self.e().to_bytes_be());
        encode_sequence(&[n.as_slice(), e.as_slice()])
    }

    /// X.509 `SubjectPublicKeyInfo` wrapping [`RsaPublicKey::to_pkcs1_der`].
    pub fn to_public_key_der(&self) -> Vec<u8> {
        pkcs1_to_x509(&self.to_pkcs1_der())
    }
}

impl RsaPrivateKey {
    /// Decode a PKCS#1 `RSAPrivateKey`.
    pub fn from_pkcs1_der(bytes: &[u8]) -> Result<Self> {
        pkcs1::RsaPrivateKey::try_from(bytes)?.try_into()
    }

    /// Decode an unencrypted PKCS#8 `PrivateKeyInfo`.
    pub fn from_pkcs8_der(bytes: &[u8]) -> Result<Self> {
        pkcs8::PrivateKeyInfo::try_from(bytes)?.try_into()
    }

    /// Encode as a two-prime PKCS#1 `RSAPrivateKey`.
    pub fn to_pkcs1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let modulus = self.n().to_bytes_be();
        let public_exponent = self.e().to_bytes_be();
        let private_exponent = Zeroizing::new(self.d().to_bytes_be());
        let prime1 = Zeroizing::new(self.primes()[0].to_bytes_be());
        let prime2 = Zeroizing::new(self.primes()[1].to_bytes_be());
        let exponent1 = Zeroizing::new(self.dp().to_bytes_be());
        let exponent2 = Zeroizing::new(self.dq().to_bytes_be());
        let coefficient = Zeroizing::new(self.qinv().to_bytes_be());

        let der = pkcs1::RsaPrivateKey {
            modulus: UintRef::new(&modulus)?,
            public_exponent: UintRef::new(&public_exponent)?,
            private_exponent: UintRef::new(&private_exponent)?,
            prime1: UintRef::new(&prime1)?,
            prime2: UintRef::new(&prime2)?,
            exponent1: UintRef::new(&exponent1)?,
            exponent2: UintRef::new(&exponent2)?,
            coefficient: UintRef::new(&coefficient)?,
            other_prime_infos: None,
        }
        .to_der()
        .map_err(|_| Error::Internal)?;

        Ok(Zeroizing::new(der))
    }
}
