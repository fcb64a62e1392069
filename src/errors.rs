//! Error types.

/// Alias for [`core::result::Result`] with the `rsa-interchange` crate
/// [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Input is not valid Base64.
    InvalidBase64,

    /// Decrypted or supplied bytes are not valid UTF-8.
    InvalidUtf8,

    /// Key encoding is unrecognized, or the PEM armor is absent or mismatched.
    InvalidKeyFormat,

    /// The engine failed to generate a key pair.
    KeyGeneration,

    /// The engine rejected well-formed key bytes.
    KeyImport,

    /// The key handle's class does not allow the requested operation.
    InvalidKeyHandle,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Public exponent too small.
    PublicExponentTooSmall,

    /// Public exponent too large.
    PublicExponentTooLarge,

    /// Modulus too large.
    ModulusTooLarge,

    /// Invalid prime value.
    InvalidPrime,

    /// Encryption error.
    Encryption,

    /// Decryption error.
    Decryption,

    /// Signing error.
    Signing,

    /// Verification error.
    Verification,

    /// The padding or signature algorithm is not supported for this key.
    UnsupportedAlgorithm,

    /// A plaintext chunk is larger than the padding scheme allows.
    MessageTooLong,

    /// Ciphertext length is not a positive multiple of the key block size.
    InvalidCiphertextLength,

    /// Internal error.
    Internal,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidBase64 => write!(f, "invalid base64 input"),
            Error::InvalidUtf8 => write!(f, "invalid utf-8 input"),
            Error::InvalidKeyFormat => write!(f, "unrecognized key format"),
            Error::KeyGeneration => write!(f, "key generation failed"),
            Error::KeyImport => write!(f, "key import failed"),
            Error::InvalidKeyHandle => write!(f, "invalid key handle for operation"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::PublicExponentTooLarge => write!(f, "public exponent too large"),
            Error::ModulusTooLarge => write!(f, "modulus too large"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::Encryption => write!(f, "encryption error"),
            Error::Decryption => write!(f, "decryption error"),
            Error::Signing => write!(f, "signing error"),
            Error::Verification => write!(f, "verification error"),
            Error::UnsupportedAlgorithm => write!(f, "unsupported algorithm"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::InvalidCiphertextLength => write!(f, "invalid ciphertext length"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl From<pkcs1::Error> for Error {
    fn from(_err: pkcs1::Error) -> Error {
        Error::KeyImport
    }
}

impl From<pkcs1::der::Error> for Error {
    fn from(_err: pkcs1::der::Error) -> Error {
        Error::KeyImport
    }
}

impl From<pkcs8::Error> for Error {
    fn from(_err: pkcs8::Error) -> Error {
        Error::KeyImport
    }
}

impl From<pkcs8::spki::Error> for Error {
    fn from(_err: pkcs8::spki::Error) -> Error {
        Error::KeyImport
    }
}

impl From<base64ct::Error> for Error {
    fn from(_err: base64ct::Error) -> Error {
        Error::InvalidBase64
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_err: core::str::Utf8Error) -> Error {
        Error::InvalidUtf8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use base64ct::Encoding;

    #[test]
    fn test_display_is_short() {
        assert_eq!(Error::InvalidBase64.to_string(), "invalid base64 input");
        assert_eq!(
            Error::InvalidCiphertextLength.to_string(),
            "invalid ciphertext length"
        );
    }

    #[test]
    fn test_from_utf8() {
        let err = core::str::from_utf8(&[0xc3, 0x28]).unwrap_err();
        assert_eq!(Error::from(err), Error::InvalidUtf8);
    }

    #[test]
    fn test_from_base64() {
        let err = base64ct::Base64::decode_vec("@@@@").unwrap_err();
        assert_eq!(Error::from(err), Error::InvalidBase64);
    }
}
