use std::fmt;

use super::curve::{FIELD_ELEMENT_LEN, SIGNATURE_LEN};
use crate::error::InvalidArgument;

/// Raw ECDSA signature: R and S concatenated, each [`FIELD_ELEMENT_LEN`] bytes
///
/// This is the wire form of ATECC-class devices. Use [`Signature::to_der`]
/// where an X.509 or TLS stack wants ASN.1.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        let array: [u8; SIGNATURE_LEN] =
            bytes
                .try_into()
                .map_err(|_| InvalidArgument::SignatureLength {
                    expected: SIGNATURE_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..FIELD_ELEMENT_LEN]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[FIELD_ELEMENT_LEN..]
    }

    /// ASN.1 DER `ECDSA-Sig-Value`
    ///
    /// Returns `None` when R or S is zero or not below the curve order, which
    /// a device never produces for a successful sign.
    pub fn to_der(&self) -> Option<Vec<u8>> {
        let sig = p256::ecdsa::Signature::from_slice(&self.0).ok()?;
        Some(sig.to_der().as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = InvalidArgument;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}
