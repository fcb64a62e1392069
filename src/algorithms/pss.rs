//! `EMSA-PSS` encoding, [RFC8017 § 9.1], with MGF1 over the message digest
//! and a salt as long as that digest.
//!
//! [RFC8017 § 9.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.1

use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset};
use subtle::{Choice, ConstantTimeEq};

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

/// `H = Hash(0x00 * 8 ‖ mHash ‖ salt)`.
fn salted_hash<D: Digest>(m_hash: &[u8], salt: &[u8]) -> digest::Output<D> {
    let mut hash = D::new();
    Digest::update(&mut hash, [0u8; 8]);
    Digest::update(&mut hash, m_hash);
    Digest::update(&mut hash, salt);
    hash.finalize()
}

/// Encodes `m_hash` into an `em_bits` wide block.
pub(crate) fn emsa_pss_encode<D>(m_hash: &[u8], em_bits: usize, salt: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let h_len = <D as Digest>::output_size();
    let s_len = salt.len();
    let em_len = (em_bits + 7) / 8;

    if m_hash.len() != h_len {
        return Err(Error::Internal);
    }
    if em_len < h_len + s_len + 2 {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0; em_len];
    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let (h, trailer) = rest.split_at_mut(h_len);

    h.copy_from_slice(&salted_hash::<D>(m_hash, salt));

    // DB = PS ‖ 0x01 ‖ salt
    db[em_len - s_len - h_len - 2] = 0x01;
    db[em_len - s_len - h_len - 1..].copy_from_slice(salt);

    mgf1_xor(db, &mut D::new(), h);
    db[0] &= 0xFF >> (8 * em_len - em_bits);
    trailer[0] = 0xBC;

    Ok(em)
}

/// Checks `em`, a full `key_bits` wide signature representative, against
/// `m_hash` with a salt of exactly `s_len` bytes.
pub(crate) fn emsa_pss_verify<D>(
    m_hash: &[u8],
    em: &mut [u8],
    s_len: usize,
    key_bits: usize,
) -> Result<()>
where
    D: Digest + FixedOutputReset,
{
    let em_bits = key_bits - 1;
    let em_len = (em_bits + 7) / 8;
    let key_len = (key_bits + 7) / 8;
    let h_len = <D as Digest>::output_size();

    if m_hash.len() != h_len || em.len() != key_len || em_len < h_len + s_len + 2 {
        return Err(Error::Verification);
    }

    // when em_bits is a multiple of 8 the representative has a leading zero byte
    if key_len > em_len && em[0] != 0 {
        return Err(Error::Verification);
    }
    let em = &mut em[key_len - em_len..];

    if em[em_len - 1] != 0xBC {
        return Err(Error::Verification);
    }

    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &rest[..h_len];

    let unused_bits = 8 * em_len - em_bits;
    if unused_bits > 0 && db[0] >> (8 - unused_bits) != 0 {
        return Err(Error::Verification);
    }

    mgf1_xor(db, &mut D::new(), h);
    db[0] &= 0xFF >> unused_bits;

    let (zeroes, rest) = db.split_at(em_len - h_len - s_len - 2);
    let padding_valid = zeroes
        .iter()
        .fold(Choice::from(1u8), |acc, el| acc & el.ct_eq(&0x00))
        & rest[0].ct_eq(&0x01);

    let salt = &rest[1..];
    let expected = salted_hash::<D>(m_hash, salt);

    if (padding_valid & expected.as_slice().ct_eq(h)).into() {
        Ok(())
    } else {
        Err(Error::Verification)
    }
}
