//! Two-prime key generation.

use alloc::vec::Vec;
use num_bigint::{BigUint, RandPrime};
use rand_core::CryptoRngCore;

use crate::algorithms::rsa::{compute_modulus, compute_private_exponent_euler_totient};
use crate::errors::{Error, Result};

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: Vec<BigUint>,
}

/// Smallest modulus for which two distinct primes with the top two bits set
/// reliably exist.
const MIN_BIT_SIZE: usize = 64;

/// Generates `p` and `q` of roughly `bit_size / 2` bits each such that
/// `n = p * q` is exactly `bit_size` bits wide and `e` is invertible modulo
/// the totient.
pub(crate) fn generate_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<RsaPrivateKeyComponents> {
    if bit_size < MIN_BIT_SIZE {
        return Err(Error::KeyGeneration);
    }

    loop {
        // gen_prime sets the top two bits, so the product of a
        // bits_p and a bits_q prime has exactly bits_p + bits_q bits
        let bits_p = bit_size / 2;
        let p = rng.gen_prime(bits_p);
        let q = rng.gen_prime(bit_size - bits_p);

        if p == q {
            continue;
        }

        let primes = vec![p, q];
        let n = compute_modulus(&primes);
        if n.bits() != bit_size {
            continue;
        }

        if let Ok(d) = compute_private_exponent_euler_totient(&primes, exp) {
            return Ok(RsaPrivateKeyComponents {
                n,
                e: exp.clone(),
                d,
                primes,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    const EXP: u64 = 65537;

    #[test]
    fn test_impossible_keys() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let exp = BigUint::from(EXP);
        for i in 0..MIN_BIT_SIZE {
            assert!(generate_key_with_exp(&mut rng, i, &exp).is_err());
        }
    }

    macro_rules! key_generation {
        ($name:ident, $size:expr, $count:expr) => {
            #[test]
            fn $name() {
                let mut rng = ChaCha8Rng::from_seed([42; 32]);
                let exp = BigUint::from(EXP);
                for _ in 0..$count {
                    let components = generate_key_with_exp(&mut rng, $size, &exp).unwrap();
                    assert_eq!(components.n.bits(), $size);
                    assert_eq!(components.primes.len(), 2);
                    assert_eq!(components.e, exp);
                    assert_eq!(&components.primes[0] * &components.primes[1], components.n);
                }
            }
        };
    }

    key_generation!(key_generation_128, 128, 10);
    key_generation!(key_generation_513, 513, 3);
    key_generation!(key_generation_1024, 1024, 2);
}
