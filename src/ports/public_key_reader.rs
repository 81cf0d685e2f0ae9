use std::sync::Arc;

use crate::error::DeviceResult;
use crate::model::{KeyId, PublicKey};

/// Capability to read (or recompute) the public key of a slot
pub trait PublicKeyReader {
    fn read_public_key(&self, key_id: KeyId) -> DeviceResult<PublicKey>;
}

impl<T: PublicKeyReader + ?Sized> PublicKeyReader for &T {
    fn read_public_key(&self, key_id: KeyId) -> DeviceResult<PublicKey> {
        (**self).read_public_key(key_id)
    }
}

impl<T: PublicKeyReader + ?Sized> PublicKeyReader for Box<T> {
    fn read_public_key(&self, key_id: KeyId) -> DeviceResult<PublicKey> {
        (**self).read_public_key(key_id)
    }
}

impl<T: PublicKeyReader + ?Sized> PublicKeyReader for Arc<T> {
    fn read_public_key(&self, key_id: KeyId) -> DeviceResult<PublicKey> {
        (**self).read_public_key(key_id)
    }
}
