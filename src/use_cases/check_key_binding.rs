//! Check key binding use case
//!
//! A handle trusts that its slot and public key belong to the same key pair.
//! This flow proves it with one sign and one verify.

use tracing::{info, warn};

use crate::error::{AtcaError, AtcaResult};
use crate::key_handle::KeyHandle;
use crate::model::DIGEST_LEN;
use crate::ports::SecureElement;

const PROBE_DIGEST: [u8; DIGEST_LEN] = [0u8; DIGEST_LEN];

/// Sign a fixed digest in the handle's slot and verify it with the handle's public key
///
/// Costs two device operations; never run implicitly.
///
/// # Errors
///
/// - `VerificationFailed` if the public key does not belong to the slot
/// - Any error from the sign or verify step, unchanged
pub fn check_key_binding<D>(handle: &KeyHandle<'_, D>) -> AtcaResult<()>
where
    D: SecureElement + ?Sized,
{
    let signature = handle.sign(&PROBE_DIGEST)?;

    match handle.verify_signature(&PROBE_DIGEST, &signature) {
        Ok(()) => {
            info!(key_id = %handle.key_id(), "public key matches slot");
            Ok(())
        }
        Err(AtcaError::VerificationFailed) => {
            warn!(key_id = %handle.key_id(), "public key does not belong to slot");
            Err(AtcaError::VerificationFailed)
        }
        Err(e) => Err(e),
    }
}
