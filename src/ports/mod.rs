//! Ports (traits) for secure element operations
//!
//! These traits define the capabilities a secure element driver must offer.
//! They are ports in hexagonal architecture: the key handle depends on these
//! abstractions, never on a concrete bus or chip.
//!
//! All methods take `&self`. The device is a shared resource and serializing
//! access to it is the adapter's job.

mod device_signer;
mod device_verifier;
mod public_key_reader;


pub use device_signer::DeviceSigner;
pub use device_verifier::DeviceVerifier;
pub use public_key_reader::PublicKeyReader;

/// Combined trait for all secure element operations
///
/// A device driver typically implements every capability.
pub trait SecureElement: DeviceSigner + DeviceVerifier + PublicKeyReader {}

// Blanket implementation for types that implement all operation traits
impl<T> SecureElement for T where T: DeviceSigner + DeviceVerifier + PublicKeyReader + ?Sized {}
