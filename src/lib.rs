#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Layout
//!
//! - [`der`]: the handful of DER productions needed to build RSA public keys
//! - [`format`]: PEM armor, Base64, and PKCS#1 ⇄ X.509 conversion
//! - [`manager`]: key generation, import and export
//! - [`chunked`]: multi-block encryption and single-shot signatures
//! - `dispatch` (requires `std`): background encryption with completion
//!   callbacks
//!
//! Keys are used through the [`KeyHandle`] trait, which exposes one-block
//! operations over the padding schemes of [RFC8017]:
//!
//! - PKCS#1 v1.5 and OAEP (SHA-256) encryption
//! - PKCS#1 v1.5 (SHA-256, SHA-384, SHA-512) and PSS (SHA-256) signatures
//!
//! # Usage
//!
//! ## Exchanging a public key
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsa_interchange::{manager, Configuration};
//!
//! let mut rng = ChaCha8Rng::from_seed([0; 32]);
//! let config = Configuration::PKCS1.with_key_size(1024);
//! let (public_key, _private_key) = manager::generate_key_pair(&mut rng, &config)?;
//!
//! let pem = manager::export_public_key_pem(&public_key)?;
//! assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
//! assert_eq!(manager::import_public_key_pem(&pem)?, public_key);
//! # Ok::<(), rsa_interchange::Error>(())
//! ```
//!
//! ## Signatures
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsa_interchange::{chunked, RsaPrivateKey, SignatureAlgorithm};
//!
//! let mut rng = ChaCha8Rng::from_seed([0; 32]);
//! let private_key = RsaPrivateKey::new(&mut rng, 1024)?;
//! let public_key = private_key.to_public_key();
//!
//! let algorithm = SignatureAlgorithm::PssSha256;
//! let signature = chunked::sign(&mut rng, b"hello world", &private_key, algorithm)?;
//! assert!(chunked::verify(b"hello world", &signature, &public_key, algorithm)?);
//! assert!(!chunked::verify(b"hello world!", &signature, &public_key, algorithm)?);
//! # Ok::<(), rsa_interchange::Error>(())
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod chunked;
pub mod config;
pub mod der;
#[cfg(feature = "std")]
pub mod dispatch;
pub mod errors;
pub mod format;
pub mod manager;
pub mod traits;

mod encoding;
mod key;
mod oaep;
mod pkcs1v15;
mod pss;

pub use pkcs1;
pub use pkcs8;

pub use crate::{
    config::{Configuration, EncryptionPadding, SignatureAlgorithm},
    errors::{Error, Result},
    format::KeyFormat,
    key::{RsaPrivateKey, RsaPublicKey},
    traits::{KeyClass, KeyHandle, PrivateKeyParts, PublicKeyParts},
};
