//! Encryption of payloads larger than one RSA block, and single-shot
//! signatures.
//!
//! A plaintext longer than [`max_chunk_size`] is cut into consecutive chunks
//! which are encrypted independently; the ciphertext is the concatenation of
//! the resulting blocks, each exactly `block_size` bytes long. There is no
//! header, so both ends must agree on the key size and padding out of band.
//!
//! Chunks are not bound to each other: blocks can be reordered or dropped
//! without detection. Pair this with a signature when that matters.

use alloc::string::String;
use alloc::vec::Vec;
use base64ct::{Base64, Encoding};
use log::{debug, trace, warn};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::config::{Configuration, SignatureAlgorithm};
use crate::errors::{Error, Result};
use crate::format::decode_base64;
use crate::traits::{KeyClass, KeyHandle};

/// Largest plaintext chunk that fits in one block of `key` under the
/// configured padding.
pub fn max_chunk_size<K: KeyHandle + ?Sized>(key: &K, config: &Configuration) -> Result<usize> {
    let overhead = config.encryption.overhead()?;
    key.block_size()
        .checked_sub(overhead)
        .filter(|&max| max > 0)
        .ok_or(Error::UnsupportedAlgorithm)
}

/// Number of blocks `len` plaintext bytes encrypt to. Empty input still
/// takes one block.
pub fn chunk_count(len: usize, max_chunk_size: usize) -> usize {
    if len == 0 {
        1
    } else {
        (len + max_chunk_size - 1) / max_chunk_size
    }
}

/// Encrypts `plaintext` with the public `key`, chunking as needed.
///
/// The output is `block_size * chunk_count(len, max_chunk_size)` bytes.
pub fn smart_encrypt<K: KeyHandle + ?Sized>(
    rng: &mut dyn CryptoRngCore,
    plaintext: &[u8],
    key: &K,
    config: &Configuration,
) -> Result<Vec<u8>> {
    key.key_class().require(KeyClass::Public)?;

    let max = max_chunk_size(key, config)?;
    let block_size = key.block_size();
    let chunks = chunk_count(plaintext.len(), max);
    debug!(
        "encrypting {} bytes as {chunks} x {block_size}-byte block(s), {}",
        plaintext.len(),
        config.encryption
    );

    let mut ciphertext = Vec::with_capacity(chunks * block_size);
    let mut encrypt_chunk = |index: usize, chunk: &[u8]| -> Result<()> {
        trace!("chunk {index}: {} bytes", chunk.len());
        let block = key
            .encrypt(&mut *rng, config.encryption, chunk)
            .map_err(|err| {
                warn!("encryption of chunk {index} failed: {err}");
                err
            })?;

        if block.len() != block_size {
            return Err(Error::Encryption);
        }
        ciphertext.extend_from_slice(&block);
        Ok(())
    };

    if plaintext.is_empty() {
        encrypt_chunk(0, &[])?;
    } else {
        for (index, chunk) in plaintext.chunks(max).enumerate() {
            encrypt_chunk(index, chunk)?;
        }
    }

    Ok(ciphertext)
}

/// Decrypts the output of [`smart_encrypt`] with the private `key`.
///
/// `ciphertext` must be a non-zero multiple of the key's block size. Any
/// block failing to decrypt fails the whole call.
pub fn smart_decrypt<K: KeyHandle + ?Sized>(
    rng: &mut dyn CryptoRngCore,
    ciphertext: &[u8],
    key: &K,
    config: &Configuration,
) -> Result<Vec<u8>> {
    key.key_class().require(KeyClass::Private)?;
    config.encryption.overhead()?;

    let block_size = key.block_size();
    if block_size == 0 || ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
        warn!(
            "ciphertext of {} bytes is not a multiple of the {block_size}-byte block",
            ciphertext.len()
        );
        return Err(Error::InvalidCiphertextLength);
    }

    let blocks = ciphertext.len() / block_size;
    debug!(
        "decrypting {blocks} x {block_size}-byte block(s), {}",
        config.encryption
    );

    let mut plaintext = Zeroizing::new(Vec::with_capacity(blocks * block_size));
    for (index, block) in ciphertext.chunks(block_size).enumerate() {
        trace!("block {index}");
        // failure logs must not name the block that failed unpadding
        let chunk = key
            .decrypt(&mut *rng, config.encryption, block)
            .map(Zeroizing::new)
            .map_err(|err| {
                warn!("decryption of {blocks} block(s) failed: {err}");
                err
            })?;
        plaintext.extend_from_slice(&chunk);
    }

    Ok(core::mem::take(&mut *plaintext))
}

/// [`smart_encrypt`] of UTF-8 text, returning standard padded Base64.
pub fn smart_encrypt_str<K: KeyHandle + ?Sized>(
    rng: &mut dyn CryptoRngCore,
    plaintext: &str,
    key: &K,
    config: &Configuration,
) -> Result<String> {
    let ciphertext = smart_encrypt(rng, plaintext.as_bytes(), key, config)?;
    Ok(Base64::encode_string(&ciphertext))
}

/// [`smart_decrypt`] of Base64 input, returning the plaintext as UTF-8.
pub fn smart_decrypt_str<K: KeyHandle + ?Sized>(
    rng: &mut dyn CryptoRngCore,
    ciphertext: &str,
    key: &K,
    config: &Configuration,
) -> Result<String> {
    let ciphertext = decode_base64(ciphertext)?;
    let plaintext = Zeroizing::new(smart_decrypt(rng, &ciphertext, key, config)?);
    Ok(String::from(core::str::from_utf8(&plaintext)?))
}

/// Signs `data` with the private `key`.
pub fn sign<K: KeyHandle + ?Sized>(
    rng: &mut dyn CryptoRngCore,
    data: &[u8],
    key: &K,
    algorithm: SignatureAlgorithm,
) -> Result<Vec<u8>> {
    key.key_class().require(KeyClass::Private)?;
    debug!("signing {} bytes, {algorithm}", data.len());
    key.sign(rng, algorithm, data)
}

/// Checks `signature` over `data` with the public `key`.
///
/// A signature that does not match is `Ok(false)`; errors are reserved for
/// using the wrong key class or an unusable algorithm.
pub fn verify<K: KeyHandle + ?Sized>(
    data: &[u8],
    signature: &[u8],
    key: &K,
    algorithm: SignatureAlgorithm,
) -> Result<bool> {
    key.key_class().require(KeyClass::Public)?;

    match key.verify(algorithm, data, signature) {
        Ok(()) => Ok(true),
        Err(Error::Verification) => {
            debug!("signature over {} bytes does not match", data.len());
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// [`sign`], returning standard padded Base64.
pub fn sign_base64<K: KeyHandle + ?Sized>(
    rng: &mut dyn CryptoRngCore,
    data: &[u8],
    key: &K,
    algorithm: SignatureAlgorithm,
) -> Result<String> {
    sign(rng, data, key, algorithm).map(|signature| Base64::encode_string(&signature))
}

/// [`verify`] of a Base64 signature.
pub fn verify_base64<K: KeyHandle + ?Sized>(
    data: &[u8],
    signature: &str,
    key: &K,
    algorithm: SignatureAlgorithm,
) -> Result<bool> {
    let signature = decode_base64(signature)?;
    verify(data, &signature, key, algorithm)
}
