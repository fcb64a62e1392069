//! `EME-OAEP` encoding, [RFC8017 § 7.1], with an empty label.
//!
//! The same digest is used for the label hash and for MGF1.
//!
//! [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use alloc::vec::Vec;

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

/// Bytes of every block taken by the encoding for digest `D`.
pub(crate) fn overhead<D: Digest>() -> usize {
    2 * <D as Digest>::output_size() + 2
}

/// `EM = 0x00 ‖ maskedSeed ‖ maskedDB` where `DB = lHash ‖ PS ‖ 0x01 ‖ M`.
pub(crate) fn encrypt_pad<R, D>(rng: &mut R, msg: &[u8], k: usize) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();
    if msg.len() + overhead::<D>() > k {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0u8; k]);
    let (seed, db) = em[1..].split_at_mut(h_size);
    rng.fill_bytes(seed);

    let db_len = db.len();
    db[..h_size].copy_from_slice(&D::digest(b""));
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    let mut mgf_digest = D::new();
    mgf1_xor(db, &mut mgf_digest, seed);
    mgf1_xor(seed, &mut mgf_digest, db);

    Ok(em)
}

/// Reverses [`encrypt_pad`].
///
/// Validity of the padding is accumulated in constant time. Whether this
/// returns an error still discloses one bit about the plaintext to anyone who
/// can observe it.
pub(crate) fn decrypt_unpad<D>(em: &mut [u8], k: usize) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();
    if k < overhead::<D>() || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (seed, db) = em[1..].split_at_mut(h_size);
    let mut mgf_digest = D::new();
    mgf1_xor(seed, &mut mgf_digest, db);
    mgf1_xor(db, &mut mgf_digest, seed);

    let hash_are_equal = db[..h_size].ct_eq(D::digest(b"").as_slice());

    // After lHash: zero or more 0x00, then 0x01, then the message.
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().enumerate().skip(h_size) {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;
    if !bool::from(valid) {
        return Err(Error::Decryption);
    }

    Ok(db[index as usize + 1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha2::Sha256;

    #[test]
    fn test_overhead() {
        assert_eq!(overhead::<Sha256>(), 66);
    }

    #[test]
    fn test_pad_unpad() {
        let mut rng = ChaCha8Rng::from_seed([3; 32]);
        for len in [0, 1, 40, 62] {
            let msg = vec![0x42u8; len];
            let mut em = encrypt_pad::<_, Sha256>(&mut rng, &msg, 128).unwrap();
            assert_eq!(em[0], 0);
            assert_eq!(decrypt_unpad::<Sha256>(&mut em, 128).unwrap(), msg);
        }
    }

    #[test]
    fn test_message_too_long() {
        let mut rng = ChaCha8Rng::from_seed([3; 32]);
        assert_eq!(
            encrypt_pad::<_, Sha256>(&mut rng, &[0u8; 63], 128),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_tampered_block_is_rejected() {
        let mut rng = ChaCha8Rng::from_seed([3; 32]);
        let mut em = encrypt_pad::<_, Sha256>(&mut rng, b"payload", 128).unwrap();
        em[40] ^= 1;
        assert_eq!(
            decrypt_unpad::<Sha256>(&mut em, 128),
            Err(Error::Decryption)
        );
    }
}
