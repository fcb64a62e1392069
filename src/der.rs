//! Minimal DER encoder for RSA public keys.
//!
//! Only the productions needed for PKCS#1 `RSAPublicKey` and X.509
//! `SubjectPublicKeyInfo` are supported: `SEQUENCE`, `INTEGER`,
//! `BIT STRING`, `OBJECT IDENTIFIER` and `NULL`. Decoding is limited to
//! locating the `rsaEncryption` OID inside a buffer; full parsing is left to
//! the `pkcs1`/`spki` crates.

use alloc::vec::Vec;
use const_oid::ObjectIdentifier;

/// `SEQUENCE` tag (constructed).
pub const TAG_SEQUENCE: u8 = 0x30;

/// `INTEGER` tag.
pub const TAG_INTEGER: u8 = 0x02;

/// `BIT STRING` tag.
pub const TAG_BIT_STRING: u8 = 0x03;

/// `NULL` tag.
pub const TAG_NULL: u8 = 0x05;

/// `OBJECT IDENTIFIER` tag.
pub const TAG_OBJECT_IDENTIFIER: u8 = 0x06;

/// `rsaEncryption` Object Identifier (OID)
pub const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// Encodes a DER length field.
///
/// Lengths below 128 use the short form. Longer lengths use the long form:
/// `0x80 | k` followed by the `k` big-endian bytes of `len`, with no leading
/// zero byte.
pub fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }

    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];

    let mut out = Vec::with_capacity(1 + significant.len());
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}

/// Encodes `tag ‖ length ‖ content`.
pub fn encode_tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let length = encode_length(content.len());
    let mut out = Vec::with_capacity(1 + length.len() + content.len());
    out.push(tag);
    out.extend_from_slice(&length);
    out.extend_from_slice(content);
    out
}

/// Encodes an unsigned big-endian magnitude as a DER `INTEGER`.
///
/// Redundant leading zeros are dropped, and a single `0x00` is prepended when
/// the most significant bit is set so the value stays positive.
pub fn encode_integer(magnitude: &[u8]) -> Vec<u8> {
    let skip = magnitude.iter().take_while(|&&b| b == 0).count();
    let magnitude = &magnitude[skip..];

    match magnitude.first() {
        None => encode_tlv(TAG_INTEGER, &[0]),
        Some(&msb) if msb & 0x80 != 0 => {
            let mut content = Vec::with_capacity(magnitude.len() + 1);
            content.push(0);
            content.extend_from_slice(magnitude);
            encode_tlv(TAG_INTEGER, &content)
        }
        Some(_) => encode_tlv(TAG_INTEGER, magnitude),
    }
}

/// Encodes a `BIT STRING` whose length is a whole number of bytes.
pub fn encode_bit_string(bytes: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(bytes.len() + 1);
    // unused bits
    content.push(0);
    content.extend_from_slice(bytes);
    encode_tlv(TAG_BIT_STRING, &content)
}

/// Encodes a `SEQUENCE` from already encoded elements.
pub fn encode_sequence(elements: &[&[u8]]) -> Vec<u8> {
    encode_tlv(TAG_SEQUENCE, &elements.concat())
}

/// Encodes an `OBJECT IDENTIFIER`.
pub fn encode_oid(oid: &ObjectIdentifier) -> Vec<u8> {
    encode_tlv(TAG_OBJECT_IDENTIFIER, oid.as_bytes())
}

/// Encodes `NULL`.
pub fn encode_null() -> Vec<u8> {
    encode_tlv(TAG_NULL, &[])
}

/// The 15-byte RSA `AlgorithmIdentifier`: `SEQUENCE { rsaEncryption, NULL }`.
pub fn rsa_algorithm_identifier() -> Vec<u8> {
    let oid = encode_oid(&RSA_ENCRYPTION);
    let null = encode_null();
    encode_sequence(&[oid.as_slice(), null.as_slice()])
}

/// Returns `true` if the content bytes of the `rsaEncryption` OID occur
/// anywhere in `der`.
pub fn contains_rsa_oid(der: &[u8]) -> bool {
    let oid = RSA_ENCRYPTION.as_bytes();
    der.windows(oid.len()).any(|window| window == oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_short_form_length() {
        assert_eq!(encode_length(0), [0x00]);
        assert_eq!(encode_length(5), [0x05]);
        assert_eq!(encode_length(127), [0x7f]);
    }

    #[test]
    fn test_long_form_length() {
        assert_eq!(encode_length(128), [0x81, 0x80]);
        assert_eq!(encode_length(255), [0x81, 0xff]);
        assert_eq!(encode_length(256), [0x82, 0x01, 0x00]);
        assert_eq!(encode_length(270), [0x82, 0x01, 0x0e]);
        assert_eq!(encode_length(0x01_00_00), [0x83, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_tlv() {
        assert_eq!(encode_tlv(TAG_NULL, &[]), [0x05, 0x00]);
        let long = encode_tlv(TAG_SEQUENCE, &[0xaa; 200]);
        assert_eq!(&long[..3], &[0x30, 0x81, 0xc8]);
        assert_eq!(long.len(), 203);
    }

    #[test]
    fn test_integer() {
        assert_eq!(encode_integer(&[]), hex!("020100"));
        assert_eq!(encode_integer(&[0, 0]), hex!("020100"));
        assert_eq!(encode_integer(&hex!("010001")), hex!("0203010001"));
        assert_eq!(encode_integer(&hex!("00010001")), hex!("0203010001"));
        assert_eq!(encode_integer(&hex!("80")), hex!("02020080"));
        assert_eq!(encode_integer(&hex!("ff01")), hex!("020300ff01"));
    }

    #[test]
    fn test_bit_string() {
        assert_eq!(encode_bit_string(&hex!("3000")), hex!("0303003000"));
    }

    #[test]
    fn test_algorithm_identifier() {
        let alg_id = rsa_algorithm_identifier();
        assert_eq!(alg_id.len(), 15);
        assert_eq!(alg_id, hex!("300d06092a864886f70d0101010500"));
    }

    #[test]
    fn test_oid_matches_pkcs1() {
        assert_eq!(RSA_ENCRYPTION, pkcs1::ALGORITHM_OID);
        assert_eq!(RSA_ENCRYPTION.as_bytes(), hex!("2a864886f70d010101"));
    }

    #[test]
    fn test_contains_rsa_oid() {
        assert!(contains_rsa_oid(&rsa_algorithm_identifier()));
        assert!(!contains_rsa_oid(&[]));
        assert!(!contains_rsa_oid(&hex!("3006020101020103")));
        assert!(!contains_rsa_oid(&hex!("2a864886f70d0101")));
    }
}
