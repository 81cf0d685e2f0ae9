//! DeviceSigner trait - capability to sign with a hardware-resident key

use std::sync::Arc;

use crate::error::DeviceResult;
use crate::model::KeyId;

/// Capability to sign a digest with a private key that never leaves the device
pub trait DeviceSigner {
    /// Sign `hash` with the private key stored in slot `key_id`
    ///
    /// # Returns
    ///
    /// The signature bytes exactly as the device produced them. Callers must
    /// validate the length; a faulty channel can return anything.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The device cannot be reached or is busy
    /// - The slot is locked, empty, or configured for verification only
    fn device_sign(&self, key_id: KeyId, hash: &[u8]) -> DeviceResult<Vec<u8>>;
}

impl<T: DeviceSigner + ?Sized> DeviceSigner for &T {
    fn device_sign(&self, key_id: KeyId, hash: &[u8]) -> DeviceResult<Vec<u8>> {
        (**self).device_sign(key_id, hash)
    }
}

impl<T: DeviceSigner + ?Sized> DeviceSigner for Box<T> {
    fn device_sign(&self, key_id: KeyId, hash: &[u8]) -> DeviceResult<Vec<u8>> {
        (**self).device_sign(key_id, hash)
    }
}

impl<T: DeviceSigner + ?Sized> DeviceSigner for Arc<T> {
    fn device_sign(&self, key_id: KeyId, hash: &[u8]) -> DeviceResult<Vec<u8>> {
        (**self).device_sign(key_id, hash)
    }
}
