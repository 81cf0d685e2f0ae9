//! Key handles for ECC key pairs held in an ATECC-class secure element
//!
//! The private key of a slot never leaves the device. A [`KeyHandle`] pairs a
//! borrowed device with a slot id and a copy of that slot's public key, and
//! offers signing (on the device) and verification (offloaded to the device's
//! accelerator).
//!
//! ```
//! use atca_key::{open_key_handle, KeyId, SimulatedElement, SlotConfig, DIGEST_LEN};
//!
//! let device = SimulatedElement::new();
//! device.generate(KeyId::new(2), SlotConfig::signing())?;
//!
//! let handle = open_key_handle(&device, KeyId::new(2))?;
//! let digest = [0u8; DIGEST_LEN];
//! let signature = handle.sign(&digest)?;
//! handle.verify(&digest, signature.as_bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adapters;
pub mod error;
mod key_handle;
pub mod model;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use adapters::{DeviceFault, SimulatedElement};
pub use error::{AtcaError, AtcaResult, DeviceError, DeviceErrorKind, DeviceResult, InvalidArgument};
pub use key_handle::KeyHandle;
pub use model::{
    KeyId, KeyUsage, PublicKey, Signature, SimulatorConfig, SlotConfig, DIGEST_LEN,
    FIELD_ELEMENT_LEN, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};
pub use ports::SecureElement;
pub use use_cases::{check_key_binding, open_key_handle};
