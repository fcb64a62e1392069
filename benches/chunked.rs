#![feature(test)]

extern crate test;

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_interchange::{
    chunked, manager, Configuration, RsaPrivateKey, RsaPublicKey, SignatureAlgorithm,
};
use test::Bencher;

const PRIVATE_PEM: &str = include_str!("../tests/examples/pkcs1/rsa2048-priv.pem");
const PUBLIC_PEM: &str = include_str!("../tests/examples/pkcs8/rsa2048-pub.pem");

fn keys() -> (RsaPublicKey, RsaPrivateKey) {
    (
        manager::import_public_key_pem(PUBLIC_PEM).unwrap(),
        manager::import_private_key_pem(PRIVATE_PEM).unwrap(),
    )
}

#[bench]
fn bench_import_public_key_pem(b: &mut Bencher) {
    b.iter(|| {
        test::black_box(manager::import_public_key_pem(PUBLIC_PEM).unwrap());
    });
}

#[bench]
fn bench_smart_encrypt_4k_pkcs1v15(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let (public_key, _) = keys();
    let plaintext = vec![0x5a; 4096];

    b.iter(|| {
        let res =
            chunked::smart_encrypt(&mut rng, &plaintext, &public_key, &Configuration::PKCS1);
        test::black_box(res).unwrap();
    });
}

#[bench]
fn bench_smart_decrypt_4k_oaep(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let (public_key, private_key) = keys();
    let ciphertext =
        chunked::smart_encrypt(&mut rng, &[0x5a; 4096], &public_key, &Configuration::OAEP)
            .unwrap();

    b.iter(|| {
        let res =
            chunked::smart_decrypt(&mut rng, &ciphertext, &private_key, &Configuration::OAEP);
        test::black_box(res).unwrap();
    });
}

#[bench]
fn bench_sign_pss_sha256(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let (_, private_key) = keys();

    b.iter(|| {
        let res = chunked::sign(
            &mut rng,
            b"hello world",
            &private_key,
            SignatureAlgorithm::PssSha256,
        );
        test::black_box(res).unwrap();
    });
}
