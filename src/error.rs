//! Error types for atca-key
//!
//! Two layers:
//! - [`DeviceError`] is what a secure element adapter reports.
//! - [`AtcaError`] is what a [`KeyHandle`](crate::KeyHandle) reports to its caller.
//!
//! Device errors are routed into exactly one of the caller-facing kinds by
//! [`DeviceError::kind`]. A transport fault can never become
//! [`AtcaError::VerificationFailed`] and a bad signature can never become
//! [`AtcaError::DeviceUnavailable`].

use thiserror::Error;

use crate::model::KeyId;

/// Result type alias for key handle operations
pub type AtcaResult<T> = Result<T, AtcaError>;

/// Result type alias for secure element adapters
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Top-level error type for key handle operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtcaError {
    /// Caller supplied a malformed argument; the device was not contacted
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// Transport or bus failure, device busy, absent or not answering
    #[error("Secure element unavailable: {0}")]
    DeviceUnavailable(DeviceError),

    /// Device understood the request and refused it
    #[error("Secure element rejected the request: {0}")]
    DeviceRejected(DeviceError),

    /// Device completed verification and the signature does not match
    #[error("Signature verification failed")]
    VerificationFailed,
}

impl AtcaError {
    /// Whether the failure may clear up on its own (bus contention, timeout).
    ///
    /// Nothing in this crate retries. This only helps callers that want a retry
    /// policy of their own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AtcaError::DeviceUnavailable(DeviceError::Busy | DeviceError::Timeout)
        )
    }
}

impl From<DeviceError> for AtcaError {
    fn from(err: DeviceError) -> Self {
        match err.kind() {
            DeviceErrorKind::Unavailable => AtcaError::DeviceUnavailable(err),
            DeviceErrorKind::Rejected => AtcaError::DeviceRejected(err),
            DeviceErrorKind::Mismatch => AtcaError::VerificationFailed,
        }
    }
}

/// Argument errors detected before any device round trip
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("digest must be {expected} bytes, got {actual}")]
    HashLength { expected: usize, actual: usize },

    #[error("signature must be {expected} bytes, got {actual}")]
    SignatureLength { expected: usize, actual: usize },

    #[error("signature buffer holds {capacity} bytes, {required} required")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("public key must be {expected} bytes, got {actual}")]
    PublicKeyLength { expected: usize, actual: usize },
}

/// Errors reported by a secure element adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Device is executing another command
    #[error("device busy")]
    Busy,

    /// No device answered on the bus
    #[error("device not present")]
    NotPresent,

    /// Device did not answer within the adapter's timeout
    #[error("device timed out")]
    Timeout,

    /// Bus level failure
    #[error("communication failure: {reason}")]
    Communication { reason: String },

    /// Response frame was malformed (bad CRC, wrong length)
    #[error("invalid response from device: {reason}")]
    InvalidResponse { reason: String },

    #[error("slot {key_id} is locked")]
    SlotLocked { key_id: KeyId },

    /// Slot holds no private key usable for the requested operation
    #[error("slot {key_id} does not hold a signing key")]
    WrongKeyType { key_id: KeyId },

    #[error("slot {key_id} is configured for verification only")]
    VerifyOnly { key_id: KeyId },

    #[error("slot {key_id} does not exist on this device")]
    SlotOutOfRange { key_id: KeyId },

    /// Command parameter the device cannot accept (digest size, encoding)
    #[error("invalid command parameter: {reason}")]
    InvalidParameter { reason: String },

    /// Public key supplied to verify is not a point on the curve
    #[error("public key is not a valid curve point")]
    InvalidPublicKey,

    #[error("device configuration mismatch: {reason}")]
    ConfigMismatch { reason: String },

    /// Verify ran to completion and the signature did not match
    #[error("signature does not match")]
    SignatureMismatch,
}

/// Classification of a [`DeviceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceErrorKind {
    Unavailable,
    Rejected,
    Mismatch,
}

impl DeviceError {
    pub fn kind(&self) -> DeviceErrorKind {
        match self {
            DeviceError::Busy
            | DeviceError::NotPresent
            | DeviceError::Timeout
            | DeviceError::Communication { .. }
            | DeviceError::InvalidResponse { .. } => DeviceErrorKind::Unavailable,
            DeviceError::SlotLocked { .. }
            | DeviceError::WrongKeyType { .. }
            | DeviceError::VerifyOnly { .. }
            | DeviceError::SlotOutOfRange { .. }
            | DeviceError::InvalidParameter { .. }
            | DeviceError::InvalidPublicKey
            | DeviceError::ConfigMismatch { .. } => DeviceErrorKind::Rejected,
            DeviceError::SignatureMismatch => DeviceErrorKind::Mismatch,
        }
    }

    /// Reclassify an error reported by an operation other than verify
    ///
    /// Only a completed verify can report a mismatch. From sign or a public key
    /// read it is a malformed answer and becomes `InvalidResponse`.
    pub(crate) fn outside_verify(self, op: &str) -> Self {
        match self.kind() {
            DeviceErrorKind::Mismatch => DeviceError::InvalidResponse {
                reason: format!("{op} answered with a signature mismatch"),
            },
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AtcaError::DeviceUnavailable(DeviceError::NotPresent);
        assert!(err.to_string().contains("not present"));

        let err = AtcaError::from(InvalidArgument::HashLength {
            expected: 32,
            actual: 20,
        });
        assert!(err.to_string().contains("32 bytes, got 20"));
    }

    #[test]
    fn test_transport_faults_are_unavailable() {
        let faults = [
            DeviceError::Busy,
            DeviceError::NotPresent,
            DeviceError::Timeout,
            DeviceError::Communication {
                reason: "nack".to_string(),
            },
            DeviceError::InvalidResponse {
                reason: "bad crc".to_string(),
            },
        ];
        for fault in faults {
            assert!(matches!(
                AtcaError::from(fault),
                AtcaError::DeviceUnavailable(_)
            ));
        }
    }

    #[test]
    fn test_refusals_are_rejected() {
        let key_id = KeyId::new(3);
        let refusals = [
            DeviceError::SlotLocked { key_id },
            DeviceError::WrongKeyType { key_id },
            DeviceError::VerifyOnly { key_id },
            DeviceError::SlotOutOfRange { key_id },
            DeviceError::InvalidParameter {
                reason: "digest length".to_string(),
            },
            DeviceError::InvalidPublicKey,
            DeviceError::ConfigMismatch {
                reason: "zone unlocked".to_string(),
            },
        ];
        for refusal in refusals {
            assert!(matches!(
                AtcaError::from(refusal),
                AtcaError::DeviceRejected(_)
            ));
        }
    }

    #[test]
    fn test_mismatch_is_verification_failed() {
        assert_eq!(
            AtcaError::from(DeviceError::SignatureMismatch),
            AtcaError::VerificationFailed
        );
    }

    #[test]
    fn test_mismatch_outside_verify_is_invalid_response() {
        let err = DeviceError::SignatureMismatch.outside_verify("sign");
        assert_eq!(
            err,
            DeviceError::InvalidResponse {
                reason: "sign answered with a signature mismatch".to_string()
            }
        );
        assert!(matches!(
            AtcaError::from(err),
            AtcaError::DeviceUnavailable(DeviceError::InvalidResponse { .. })
        ));

        assert_eq!(DeviceError::Busy.outside_verify("sign"), DeviceError::Busy);
    }

    #[test]
    fn test_is_transient() {
        assert!(AtcaError::DeviceUnavailable(DeviceError::Busy).is_transient());
        assert!(AtcaError::DeviceUnavailable(DeviceError::Timeout).is_transient());
        assert!(!AtcaError::DeviceUnavailable(DeviceError::NotPresent).is_transient());
        assert!(!AtcaError::VerificationFailed.is_transient());
    }

    #[test]
    fn test_result_type_alias() {
        let result: AtcaResult<i32> = Ok(42);
        assert_eq!(result.unwrap(), 42);

        let result: AtcaResult<i32> = Err(AtcaError::VerificationFailed);
        assert!(result.is_err());
    }
}
