//! `EME-PKCS1-v1_5` and `EMSA-PKCS1-v1_5` encodings, [RFC8017 § 7.2] and
//! [RFC8017 § 9.2].
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 9.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

use alloc::vec::Vec;
use const_oid::AssociatedOid;
use digest::Digest;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Bytes of every encryption block taken by `0x00 ‖ 0x02 ‖ PS ‖ 0x00` with
/// the minimum eight byte `PS`.
pub(crate) const ENCRYPTION_OVERHEAD: usize = 11;

/// Fills `data` with random non-zero bytes.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// `EM = 0x00 ‖ 0x02 ‖ PS ‖ 0x00 ‖ M` for a `k` byte modulus.
pub(crate) fn encrypt_pad<R>(rng: &mut R, msg: &[u8], k: usize) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + ENCRYPTION_OVERHEAD > k {
        return Err(Error::MessageTooLong);
    }

    let ps_end = k - msg.len() - 1;
    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..ps_end]);
    em[ps_end + 1..].copy_from_slice(msg);
    Ok(em)
}

/// Strips the encryption padding.
///
/// The scan over `em` runs in constant time; only the final accept or reject
/// branches on secret data.
pub(crate) fn encrypt_unpad(em: &[u8], k: usize) -> Result<Vec<u8>> {
    if k < ENCRYPTION_OVERHEAD || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let second_byte_is_two = em[1].ct_eq(&2u8);

    // looking_for_index: 1 until the zero separator has been seen
    // index: position of that separator
    let mut looking_for_index = 1u8;
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), Choice::from(looking_for_index) & equals0);
        looking_for_index.conditional_assign(&0u8, equals0);
    }

    // PS starts at offset 2 and must span at least 8 bytes, so index >= 10.
    let short_ps = Choice::from((((index as i64 - 10) >> 63) & 1) as u8);
    let valid =
        first_byte_is_zero & second_byte_is_two & Choice::from(!looking_for_index & 1) & !short_ps;

    if !bool::from(valid) {
        return Err(Error::Decryption);
    }

    Ok(em[index as usize + 1..].to_vec())
}

/// `EM = 0x00 ‖ 0x01 ‖ PS ‖ 0x00 ‖ T` where `T = prefix ‖ hashed`.
pub(crate) fn sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let t_len = prefix.len() + hashed.len();
    if k < t_len + ENCRYPTION_OVERHEAD {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hashed.len()].copy_from_slice(prefix);
    em[k - hashed.len()..].copy_from_slice(hashed);
    Ok(em)
}

/// Compares `em` to the encoding [`sign_pad`] would produce.
pub(crate) fn sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8], k: usize) -> Result<()> {
    match sign_pad(prefix, hashed, k) {
        Ok(expected) if expected.len() == em.len() && bool::from(expected.as_slice().ct_eq(em)) => Ok(()),
        _ => Err(Error::Verification),
    }
}

/// DER `DigestInfo` header preceding the hash in `T`:
///
/// ```text
/// 30 (oid_len + 8 + digest_len) 30 (oid_len + 4) 06 oid_len <oid> 05 00 04 digest_len
/// ```
pub(crate) fn digest_info_prefix<D>() -> Vec<u8>
where
    D: Digest + AssociatedOid,
{
    let oid = D::OID.as_bytes();
    let oid_len = oid.len() as u8;
    let digest_len = <D as Digest>::output_size() as u8;

    let mut v = Vec::with_capacity(oid.len() + 10);
    v.extend_from_slice(&[0x30, oid_len + 8 + digest_len, 0x30, oid_len + 4, 0x06, oid_len]);
    v.extend_from_slice(oid);
    v.extend_from_slice(&[0x05, 0x00, 0x04, digest_len]);
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha2::{Sha256, Sha512};

    #[test]
    fn test_non_zero_bytes() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for _ in 0..10 {
            let mut b = vec![0u8; 512];
            non_zero_random_bytes(&mut rng, &mut b);
            assert!(b.iter().all(|&el| el != 0));
        }
    }

    #[test]
    fn test_encrypt_tiny_no_crash() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let res = encrypt_pad(&mut rng, &[1u8; 4], 8);
        assert_eq!(res, Err(Error::MessageTooLong));
    }

    #[test]
    fn test_encrypt_unpad() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        for len in [0, 1, 50, 117] {
            let msg = vec![0xa5u8; len];
            let em = encrypt_pad(&mut rng, &msg, 128).unwrap();
            assert_eq!(em[..2], [0, 2]);
            assert_eq!(encrypt_unpad(&em, 128).unwrap(), msg);
        }
        assert_eq!(
            encrypt_pad(&mut rng, &[0u8; 118], 128),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_encrypt_unpad_rejects_short_ps() {
        // separator after only seven bytes of PS
        let mut em = vec![0x11u8; 32];
        em[0] = 0;
        em[1] = 2;
        em[9] = 0;
        assert_eq!(encrypt_unpad(&em, 32), Err(Error::Decryption));

        em[9] = 0x11;
        em[10] = 0;
        assert_eq!(encrypt_unpad(&em, 32).unwrap(), [0x11u8; 21]);
    }

    #[test]
    fn test_encrypt_unpad_rejects_bad_header() {
        let mut em = vec![0x11u8; 32];
        em[0] = 0;
        em[1] = 1;
        em[20] = 0;
        assert_eq!(encrypt_unpad(&em, 32), Err(Error::Decryption));

        // no separator at all
        em[1] = 2;
        em[20] = 0x11;
        assert_eq!(encrypt_unpad(&em, 32), Err(Error::Decryption));
    }

    #[test]
    fn test_digest_info_prefix() {
        assert_eq!(
            digest_info_prefix::<Sha256>(),
            hex!("3031300d060960864801650304020105000420")
        );
        assert_eq!(
            digest_info_prefix::<Sha512>(),
            hex!("3051300d060960864801650304020305000440")
        );
    }

    #[test]
    fn test_sign_pad_unpad() {
        let prefix = digest_info_prefix::<Sha256>();
        let hashed = Sha256::digest(b"abc");
        let em = sign_pad(&prefix, &hashed, 128).unwrap();
        assert_eq!(em[..3], [0, 1, 0xff]);
        assert!(sign_unpad(&prefix, &hashed, &em, 128).is_ok());

        let mut tampered = em.clone();
        tampered[5] = 0xfe;
        assert_eq!(
            sign_unpad(&prefix, &hashed, &tampered, 128),
            Err(Error::Verification)
        );
    }
}
