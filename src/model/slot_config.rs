//! Slot configuration for secure element adapters

use super::KeyId;

/// What the private key in a slot may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    /// Key may sign digests
    Sign,
    /// Slot only holds a public key; signing is refused
    VerifyOnly,
}

/// Configuration of one key slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotConfig {
    /// Permitted usage of the slot's key
    pub usage: KeyUsage,
    /// Locked slots refuse signing and re-provisioning
    pub locked: bool,
}

impl SlotConfig {
    pub fn signing() -> Self {
        Self {
            usage: KeyUsage::Sign,
            locked: false,
        }
    }

    pub fn verify_only() -> Self {
        Self {
            usage: KeyUsage::VerifyOnly,
            locked: false,
        }
    }

    pub fn locked(self) -> Self {
        Self {
            locked: true,
            ..self
        }
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::signing()
    }
}

/// Configuration of a simulated secure element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Number of key slots; ids at or above this are refused.
    /// `u16` so that a device using the full `KeyId` range (256 slots) fits.
    pub slot_count: u16,
}

impl SimulatorConfig {
    pub fn contains(&self, key_id: KeyId) -> bool {
        u16::from(key_id.value()) < self.slot_count
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            slot_count: u16::from(KeyId::ATECC_SLOT_COUNT),
        }
    }
}
