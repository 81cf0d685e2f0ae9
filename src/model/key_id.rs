use std::fmt;

/// Identifier of a key slot inside the secure element
///
/// Opaque to this crate: the valid range and what a slot may do are decided
/// by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(u8);

impl KeyId {
    /// Number of key slots on an ATECC508/608 data zone
    pub const ATECC_SLOT_COUNT: u8 = 16;

    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for KeyId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_id_roundtrip() {
        let id = KeyId::new(2);
        assert_eq!(id.value(), 2);
        assert_eq!(KeyId::from(2u8), id);
    }

    #[test]
    fn test_key_id_is_not_range_checked() {
        // Slot range belongs to the device
        assert_eq!(KeyId::new(200).value(), 200);
    }

    #[test]
    fn test_key_id_display() {
        assert_eq!(KeyId::new(7).to_string(), "7");
    }
}
