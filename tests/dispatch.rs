//! Background encryption delivered to the calling thread.

#![cfg(feature = "std")]

use std::sync::{Arc, Mutex};

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_interchange::{
    chunked,
    dispatch::{smart_encrypt_async, CallerQueue, WorkerThread},
    manager, Configuration, Error, RsaPrivateKey,
};

const PRIVATE_PEM: &str = include_str!("examples/pkcs1/rsa1024-priv.pem");

fn private_key() -> RsaPrivateKey {
    manager::import_private_key_pem(PRIVATE_PEM).unwrap()
}

#[test]
fn completions_run_on_the_draining_thread() {
    let private_key = private_key();
    let public_key = Arc::new(private_key.to_public_key());
    let queue = CallerQueue::new();
    let results = Arc::new(Mutex::new(Vec::new()));

    let messages: Vec<Vec<u8>> = (0..3u8).map(|i| vec![i; 100 * usize::from(i)]).collect();
    let mut tasks = Vec::new();
    for (i, msg) in messages.iter().enumerate() {
        let sink = results.clone();
        let caller = std::thread::current().id();
        tasks.push(
            smart_encrypt_async(
                ChaCha8Rng::from_seed([i as u8; 32]),
                msg.clone(),
                public_key.clone(),
                Configuration::PKCS1,
                queue.context(),
                move |result| {
                    assert_eq!(std::thread::current().id(), caller);
                    sink.lock().unwrap().push((i, result));
                },
            )
            .unwrap(),
        );
    }

    for task in tasks {
        task.join().unwrap();
    }
    assert!(results.lock().unwrap().is_empty());
    assert_eq!(queue.run_pending(), 3);
    assert_eq!(queue.run_pending(), 0);

    let mut rng = ChaCha8Rng::from_seed([9; 32]);
    let mut results = results.lock().unwrap();
    results.sort_by_key(|(i, _)| *i);
    for ((_, result), msg) in results.drain(..).zip(&messages) {
        let ciphertext = result.unwrap();
        let plaintext =
            chunked::smart_decrypt(&mut rng, &ciphertext, &private_key, &Configuration::PKCS1)
                .unwrap();
        assert_eq!(&plaintext, msg);
    }
}

#[test]
fn errors_reach_the_callback() {
    let private_key = Arc::new(private_key());
    let slot = Arc::new(Mutex::new(None));
    let sink = slot.clone();

    let task = smart_encrypt_async(
        ChaCha8Rng::from_seed([1; 32]),
        b"private keys do not encrypt".to_vec(),
        private_key,
        Configuration::OAEP,
        WorkerThread,
        move |result| {
            *sink.lock().unwrap() = Some(result);
        },
    )
    .unwrap();
    task.join().unwrap();

    assert_eq!(slot.lock().unwrap().take(), Some(Err(Error::InvalidKeyHandle)));
}
