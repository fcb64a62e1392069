//! Algorithm and key size configuration.

use core::fmt;
use core::str::FromStr;
use sha2::Sha256;

use crate::algorithms::{oaep, pkcs1v15};

use crate::errors::{Error, Result};

/// Padding used for public-key encryption.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EncryptionPadding {
    /// `RSAES-PKCS1-v1_5`.
    #[default]
    Pkcs1v15,

    /// `RSAES-OAEP` with SHA-256 for both the label hash and MGF1.
    OaepSha256,

    /// Textbook RSA. Recognized so that configurations naming it can be
    /// parsed, but rejected by every operation.
    Raw,
}

impl EncryptionPadding {
    /// Number of bytes of each block consumed by the padding.
    pub fn overhead(self) -> Result<usize> {
        match self {
            EncryptionPadding::Pkcs1v15 => Ok(pkcs1v15::ENCRYPTION_OVERHEAD),
            EncryptionPadding::OaepSha256 => Ok(oaep::overhead::<Sha256>()),
            EncryptionPadding::Raw => Err(Error::UnsupportedAlgorithm),
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            EncryptionPadding::Pkcs1v15 => "pkcs1v15",
            EncryptionPadding::OaepSha256 => "oaep-sha256",
            EncryptionPadding::Raw => "raw",
        }
    }
}

impl fmt::Display for EncryptionPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncryptionPadding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pkcs1v15" => Ok(EncryptionPadding::Pkcs1v15),
            "oaep-sha256" => Ok(EncryptionPadding::OaepSha256),
            "raw" => Ok(EncryptionPadding::Raw),
            _ => Err(Error::UnsupportedAlgorithm),
        }
    }
}

/// Signature scheme and digest.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SignatureAlgorithm {
    /// `RSASSA-PKCS1-v1_5` over SHA-256.
    #[default]
    Pkcs1v15Sha256,

    /// `RSASSA-PKCS1-v1_5` over SHA-384.
    Pkcs1v15Sha384,

    /// `RSASSA-PKCS1-v1_5` over SHA-512.
    Pkcs1v15Sha512,

    /// `RSASSA-PSS` over SHA-256, MGF1-SHA-256, salt length equal to the
    /// digest length.
    PssSha256,
}

impl SignatureAlgorithm {
    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::Pkcs1v15Sha256 => "pkcs1v15-sha256",
            SignatureAlgorithm::Pkcs1v15Sha384 => "pkcs1v15-sha384",
            SignatureAlgorithm::Pkcs1v15Sha512 => "pkcs1v15-sha512",
            SignatureAlgorithm::PssSha256 => "pss-sha256",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pkcs1v15-sha256" => Ok(SignatureAlgorithm::Pkcs1v15Sha256),
            "pkcs1v15-sha384" => Ok(SignatureAlgorithm::Pkcs1v15Sha384),
            "pkcs1v15-sha512" => Ok(SignatureAlgorithm::Pkcs1v15Sha512),
            "pss-sha256" => Ok(SignatureAlgorithm::PssSha256),
            _ => Err(Error::UnsupportedAlgorithm),
        }
    }
}

/// Key size and algorithm choices shared by both ends of an exchange.
///
/// Ciphertexts carry no header: the consumer must use the same key size and
/// padding as the producer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Modulus size in bits used for key generation.
    pub key_size: usize,

    /// Encryption padding.
    pub encryption: EncryptionPadding,

    /// Signature algorithm.
    pub signature: SignatureAlgorithm,
}

impl Configuration {
    /// 2048-bit keys, PKCS#1 v1.5 encryption padding.
    pub const PKCS1: Self = Self {
        key_size: 2048,
        encryption: EncryptionPadding::Pkcs1v15,
        signature: SignatureAlgorithm::Pkcs1v15Sha256,
    };

    /// 2048-bit keys, OAEP-SHA256 encryption padding.
    pub const OAEP: Self = Self {
        key_size: 2048,
        encryption: EncryptionPadding::OaepSha256,
        signature: SignatureAlgorithm::Pkcs1v15Sha256,
    };

    /// Create a new configuration.
    pub const fn new(
        key_size: usize,
        encryption: EncryptionPadding,
        signature: SignatureAlgorithm,
    ) -> Self {
        Self {
            key_size,
            encryption,
            signature,
        }
    }

    /// Replace the key size.
    pub const fn with_key_size(mut self, key_size: usize) -> Self {
        self.key_size = key_size;
        self
    }

    /// Replace the encryption padding.
    pub const fn with_encryption(mut self, encryption: EncryptionPadding) -> Self {
        self.encryption = encryption;
        self
    }

    /// Replace the signature algorithm.
    pub const fn with_signature(mut self, signature: SignatureAlgorithm) -> Self {
        self.signature = signature;
        self
    }

    /// Key size in bytes, rounded up.
    pub const fn key_size_bytes(&self) -> usize {
        (self.key_size + 7) / 8
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::PKCS1
    }
}
