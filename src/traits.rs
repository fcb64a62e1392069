//! RSA-related trait definitions.

mod handle;
mod keys;

pub use handle::{KeyClass, KeyHandle};
pub use keys::{PrivateKeyParts, PublicKeyParts};
