//! DeviceVerifier trait - capability to verify on the device's accelerator

use std::sync::Arc;

use crate::error::DeviceResult;
use crate::model::PublicKey;

/// Capability to verify a signature with an externally supplied public key
///
/// The public key travels to the device as a command parameter. A pass only
/// says the signature is valid for that key; the device is used as an
/// accelerator, not as a root of trust.
pub trait DeviceVerifier {
    /// Verify `signature` over `hash` under `public_key`
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::SignatureMismatch` if the device ran the check and
    /// the signature is not valid. Every other error means the check did not
    /// complete.
    fn device_verify(
        &self,
        hash: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> DeviceResult<()>;
}

impl<T: DeviceVerifier + ?Sized> DeviceVerifier for &T {
    fn device_verify(
        &self,
        hash: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> DeviceResult<()> {
        (**self).device_verify(hash, signature, public_key)
    }
}

impl<T: DeviceVerifier + ?Sized> DeviceVerifier for Box<T> {
    fn device_verify(
        &self,
        hash: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> DeviceResult<()> {
        (**self).device_verify(hash, signature, public_key)
    }
}

impl<T: DeviceVerifier + ?Sized> DeviceVerifier for Arc<T> {
    fn device_verify(
        &self,
        hash: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> DeviceResult<()> {
        (**self).device_verify(hash, signature, public_key)
    }
}
