//! Handle to an ECC key pair whose private half lives in a secure element

use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::{AtcaError, AtcaResult, DeviceError, InvalidArgument};
use crate::model::{KeyId, PublicKey, Signature, DIGEST_LEN, SIGNATURE_LEN};
use crate::ports::SecureElement;

/// Key pair stored in a secure element slot
///
/// Signing runs on the device with the private key in slot `key_id`.
/// Verification sends the stored public key to the device as a command
/// parameter, so the device acts as an off-chip accelerator there.
///
/// The handle borrows the device and owns only a copy of the public key.
/// Dropping it does nothing to the slot.
///
/// `key_id` and `public_key` are trusted to belong together. Fetch the public
/// key with [`PublicKeyReader::read_public_key`](crate::ports::PublicKeyReader)
/// before constructing, or use [`open_key_handle`](crate::use_cases::open_key_handle).
pub struct KeyHandle<'a, D: SecureElement + ?Sized> {
    device: &'a D,
    key_id: KeyId,
    public_key: PublicKey,
}

impl<'a, D: SecureElement + ?Sized> KeyHandle<'a, D> {
    /// Assemble a handle from a device, a slot id and that slot's public key
    ///
    /// Performs no I/O and cannot fail. The public key bytes are copied.
    pub fn new(device: &'a D, key_id: KeyId, public_key: &PublicKey) -> Self {
        trace!(key_id = %key_id, "key handle created");
        Self {
            device,
            key_id,
            public_key: *public_key,
        }
    }

    /// Slot holding the private key
    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    /// Public key of the slot, X and Y concatenated
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign a digest with the slot's private key
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `hash` is not [`DIGEST_LEN`] bytes (device not contacted)
    /// - `DeviceUnavailable` on transport failure or a malformed device answer
    /// - `DeviceRejected` if the slot cannot sign
    pub fn sign(&self, hash: &[u8]) -> AtcaResult<Signature> {
        check_digest(hash)?;

        debug!(key_id = %self.key_id, "signing digest");
        let raw = self
            .device
            .device_sign(self.key_id, hash)
            .map_err(|e| self.device_failure("sign", e.outside_verify("sign")))?;

        Signature::from_slice(&raw).map_err(|_| {
            let err = DeviceError::InvalidResponse {
                reason: format!(
                    "signature of {} bytes, expected {}",
                    raw.len(),
                    SIGNATURE_LEN
                ),
            };
            self.device_failure("sign", err)
        })
    }

    /// Sign a digest into a caller buffer, returning the number of bytes written
    ///
    /// Both arguments are checked before the device is contacted; on error
    /// `out` is left untouched. On success exactly [`SIGNATURE_LEN`] bytes of
    /// raw R||S are written at the start of `out`.
    pub fn sign_into(&self, hash: &[u8], out: &mut [u8]) -> AtcaResult<usize> {
        check_digest(hash)?;
        if out.len() < SIGNATURE_LEN {
            return Err(InvalidArgument::BufferTooSmall {
                required: SIGNATURE_LEN,
                capacity: out.len(),
            }
            .into());
        }

        let signature = self.sign(hash)?;
        out[..SIGNATURE_LEN].copy_from_slice(signature.as_bytes());
        Ok(SIGNATURE_LEN)
    }

    /// Verify a raw R||S signature over a digest against this handle's public key
    ///
    /// `Ok(())` means exactly "valid for this digest under this public key".
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a digest or signature of the wrong length
    /// - `VerificationFailed` if the device ran the check and it did not match
    /// - `DeviceUnavailable` / `DeviceRejected` if the check did not complete
    pub fn verify(&self, hash: &[u8], signature: &[u8]) -> AtcaResult<()> {
        check_digest(hash)?;
        let signature = Signature::from_slice(signature)?;
        self.verify_signature(hash, &signature)
    }

    /// Verify an already parsed [`Signature`]; errors as for [`verify`](Self::verify)
    pub fn verify_signature(&self, hash: &[u8], signature: &Signature) -> AtcaResult<()> {
        check_digest(hash)?;

        debug!(key_id = %self.key_id, "verifying signature");
        match self
            .device
            .device_verify(hash, signature.as_bytes(), &self.public_key)
        {
            Ok(()) => Ok(()),
            Err(DeviceError::SignatureMismatch) => {
                debug!(key_id = %self.key_id, "signature does not match");
                Err(AtcaError::VerificationFailed)
            }
            Err(e) => Err(self.device_failure("verify", e)),
        }
    }

    fn device_failure(&self, op: &str, err: DeviceError) -> AtcaError {
        warn!(key_id = %self.key_id, op, error = %err, "secure element operation failed");
        err.into()
    }
}

fn check_digest(hash: &[u8]) -> Result<(), InvalidArgument> {
    if hash.len() != DIGEST_LEN {
        return Err(InvalidArgument::HashLength {
            expected: DIGEST_LEN,
            actual: hash.len(),
        });
    }
    Ok(())
}

impl<D: SecureElement + ?Sized> Clone for KeyHandle<'_, D> {
    fn clone(&self) -> Self {
        Self {
            device: self.device,
            key_id: self.key_id,
            public_key: self.public_key,
        }
    }
}

impl<D: SecureElement + ?Sized> fmt::Debug for KeyHandle<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("key_id", &self.key_id)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
