use std::fmt;

use super::curve::{FIELD_ELEMENT_LEN, PUBLIC_KEY_LEN};
use crate::error::InvalidArgument;

/// SEC1 tag for an uncompressed point
const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// ECC public key as the secure element exports it: X and Y concatenated
///
/// The length is part of the type, so a value of this type always holds
/// exactly [`PUBLIC_KEY_LEN`] bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        let array: [u8; PUBLIC_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| InvalidArgument::PublicKeyLength {
                    expected: PUBLIC_KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Parse an uncompressed SEC1 point (`0x04 || X || Y`)
    pub fn from_sec1_uncompressed(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        match bytes.split_first() {
            Some((&SEC1_UNCOMPRESSED_TAG, rest)) => Self::from_slice(rest),
            _ => Err(InvalidArgument::PublicKeyLength {
                expected: PUBLIC_KEY_LEN + 1,
                actual: bytes.len(),
            }),
        }
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn x(&self) -> &[u8] {
        &self.0[..FIELD_ELEMENT_LEN]
    }

    pub fn y(&self) -> &[u8] {
        &self.0[FIELD_ELEMENT_LEN..]
    }

    /// Uncompressed SEC1 encoding, the form certificate tooling expects
    pub fn to_sec1_uncompressed(&self) -> [u8; PUBLIC_KEY_LEN + 1] {
        let mut out = [0u8; PUBLIC_KEY_LEN + 1];
        out[0] = SEC1_UNCOMPRESSED_TAG;
        out[1..].copy_from_slice(&self.0);
        out
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = InvalidArgument;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}..)", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
