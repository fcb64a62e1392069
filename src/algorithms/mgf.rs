//! Mask generation function common to both PSS and OAEP padding

use digest::{Digest, FixedOutputReset};

/// MGF1 as defined in RFC 8017 B.2.1, XORed into `out`.
///
/// Panics if out is larger than 2**32.
pub(crate) fn mgf1_xor<D>(out: &mut [u8], digest: &mut D, seed: &[u8])
where
    D: Digest + FixedOutputReset,
{
    const MAX_LEN: u64 = u32::MAX as u64 + 1;
    assert!(out.len() as u64 <= MAX_LEN);

    let mut counter = [0u8; 4];
    for block in out.chunks_mut(<D as Digest>::output_size()) {
        Digest::update(digest, seed);
        Digest::update(digest, counter);

        let mask = digest.finalize_reset();
        for (o, m) in block.iter_mut().zip(mask.iter()) {
            *o ^= m;
        }
        inc_counter(&mut counter);
    }
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}
