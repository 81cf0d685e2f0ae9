//! Open key handle use case
//!
//! Reads a slot's public key from the device and builds a [`KeyHandle`] from it.

use tracing::debug;

use crate::error::{AtcaError, AtcaResult};
use crate::key_handle::KeyHandle;
use crate::model::KeyId;
use crate::ports::SecureElement;

/// Build a key handle for slot `key_id`, fetching its public key first
///
/// This is the one fallible step before construction:
/// 1. Read the slot's public key from the device
/// 2. Assemble the handle (cannot fail)
///
/// # Errors
///
/// Returns errors if:
/// - The device cannot be reached (`DeviceUnavailable`)
/// - The slot does not exist or holds no key (`DeviceRejected`)
/// - The device answers with something other than a public key (`DeviceUnavailable`)
pub fn open_key_handle<D>(device: &D, key_id: KeyId) -> AtcaResult<KeyHandle<'_, D>>
where
    D: SecureElement + ?Sized,
{
    let public_key = device
        .read_public_key(key_id)
        .map_err(|e| AtcaError::from(e.outside_verify("public key read")))?;
    debug!(key_id = %key_id, public_key = %public_key, "public key read from device");

    Ok(KeyHandle::new(device, key_id, &public_key))
}
