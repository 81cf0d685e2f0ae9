//! Value types shared by the key handle and device adapters
//!
//! These wrap raw bytes so that lengths and identities are checked once, at
//! the edge, instead of at every call site.

pub mod curve;
mod key_id;
mod public_key;
mod signature;
mod slot_config;

pub use curve::{DIGEST_LEN, FIELD_ELEMENT_LEN, PUBLIC_KEY_LEN, SIGNATURE_LEN};
pub use key_id::KeyId;
pub use public_key::PublicKey;
pub use signature::Signature;
pub use slot_config::{KeyUsage, SimulatorConfig, SlotConfig};
