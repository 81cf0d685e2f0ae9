//! In-process model of an ATECC608-class secure element
//!
//! Keys are held inside the adapter and only public keys and signatures come
//! out, which is the boundary a real chip enforces. Transport faults can be
//! queued with [`SimulatedElement::inject_fault`] to exercise error paths.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::error::{DeviceError, DeviceResult};
use crate::model::{KeyId, KeyUsage, PublicKey, SimulatorConfig, SlotConfig, DIGEST_LEN};
use crate::ports::{DeviceSigner, DeviceVerifier, PublicKeyReader};

/// Fault the simulated device reports on its next operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFault {
    Busy,
    NotPresent,
    Timeout,
    /// Bus NACK
    Communication,
    /// Response frame cut short; a sign returns fewer bytes than a signature
    TruncatedResponse,
}

impl DeviceFault {
    fn into_error(self) -> DeviceError {
        match self {
            DeviceFault::Busy => DeviceError::Busy,
            DeviceFault::NotPresent => DeviceError::NotPresent,
            DeviceFault::Timeout => DeviceError::Timeout,
            DeviceFault::Communication => DeviceError::Communication {
                reason: "no acknowledge from device".to_string(),
            },
            DeviceFault::TruncatedResponse => DeviceError::InvalidResponse {
                reason: "response frame truncated".to_string(),
            },
        }
    }
}

enum SlotKey {
    Private(SigningKey),
    Public(PublicKey),
}

struct Slot {
    key: SlotKey,
    config: SlotConfig,
}

impl Slot {
    fn public_key(&self) -> DeviceResult<PublicKey> {
        match &self.key {
            SlotKey::Private(key) => export_public_key(key.verifying_key()),
            SlotKey::Public(pk) => Ok(*pk),
        }
    }
}

#[derive(Default)]
struct State {
    slots: HashMap<KeyId, Slot>,
    faults: VecDeque<DeviceFault>,
    operations: u64,
}

/// Software secure element with ATECC608-style slots
///
/// Access is serialized through an internal mutex, so one instance can be
/// shared by many key handles and threads.
pub struct SimulatedElement {
    config: SimulatorConfig,
    state: Mutex<State>,
}

impl SimulatedElement {
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
        }
    }

    pub fn config(&self) -> SimulatorConfig {
        self.config
    }

    /// Write a private key into a slot and return its public key
    ///
    /// # Errors
    ///
    /// - `SlotOutOfRange` for an id the device does not have
    /// - `SlotLocked` if the slot is already provisioned and locked
    /// - `InvalidParameter` if `secret` is not a valid P-256 scalar
    pub fn provision(
        &self,
        key_id: KeyId,
        secret: &[u8; 32],
        config: SlotConfig,
    ) -> DeviceResult<PublicKey> {
        let key = SigningKey::from_slice(secret).map_err(|_| DeviceError::InvalidParameter {
            reason: "secret is not a valid P-256 scalar".to_string(),
        })?;
        self.store(key_id, SlotKey::Private(key), config)
    }

    /// Generate a fresh private key inside a slot and return its public key
    pub fn generate(&self, key_id: KeyId, config: SlotConfig) -> DeviceResult<PublicKey> {
        let key = loop {
            let mut secret = [0u8; 32];
            rand::rng().fill_bytes(&mut secret);
            // Rejects zero and values at or above the group order
            if let Ok(key) = SigningKey::from_slice(&secret) {
                break key;
            }
        };
        self.store(key_id, SlotKey::Private(key), config)
    }

    /// Store a bare public key; the slot can never sign
    pub fn load_public_key(&self, key_id: KeyId, public_key: &PublicKey) -> DeviceResult<()> {
        self.store(
            key_id,
            SlotKey::Public(*public_key),
            SlotConfig::verify_only(),
        )
        .map(|_| ())
    }

    /// Queue a fault for the next device operation
    pub fn inject_fault(&self, fault: DeviceFault) {
        self.lock().faults.push_back(fault);
    }

    /// Number of sign, verify and public key operations attempted so far
    pub fn operations(&self) -> u64 {
        self.lock().operations
    }

    fn store(&self, key_id: KeyId, key: SlotKey, config: SlotConfig) -> DeviceResult<PublicKey> {
        self.check_range(key_id)?;
        let mut state = self.lock();

        if let Some(existing) = state.slots.get(&key_id) {
            if existing.config.locked {
                return Err(DeviceError::SlotLocked { key_id });
            }
        }

        let slot = Slot { key, config };
        let public_key = slot.public_key()?;
        state.slots.insert(key_id, slot);

        info!(key_id = %key_id, usage = ?config.usage, locked = config.locked, "slot provisioned");
        Ok(public_key)
    }

    fn check_range(&self, key_id: KeyId) -> DeviceResult<()> {
        if self.config.contains(key_id) {
            Ok(())
        } else {
            Err(DeviceError::SlotOutOfRange { key_id })
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a device operation: count it and take the next queued fault
    fn begin(&self, op: &str) -> (MutexGuard<'_, State>, Option<DeviceFault>) {
        let mut state = self.lock();
        state.operations += 1;
        let fault = state.faults.pop_front();
        if let Some(fault) = fault {
            warn!(op, ?fault, "simulated device fault");
        }
        (state, fault)
    }
}

impl Default for SimulatedElement {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimulatedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        let mut slots: Vec<_> = state.slots.keys().map(|id| id.value()).collect();
        slots.sort_unstable();
        f.debug_struct("SimulatedElement")
            .field("config", &self.config)
            .field("provisioned_slots", &slots)
            .field("operations", &state.operations)
            .finish()
    }
}

impl DeviceSigner for SimulatedElement {
    fn device_sign(&self, key_id: KeyId, hash: &[u8]) -> DeviceResult<Vec<u8>> {
        let (state, fault) = self.begin("sign");
        let truncate = match fault {
            Some(DeviceFault::TruncatedResponse) => true,
            Some(fault) => return Err(fault.into_error()),
            None => false,
        };

        self.check_range(key_id)?;
        check_digest(hash)?;

        let slot = state
            .slots
            .get(&key_id)
            .ok_or(DeviceError::WrongKeyType { key_id })?;
        if slot.config.locked {
            return Err(DeviceError::SlotLocked { key_id });
        }
        let key = match (&slot.key, slot.config.usage) {
            (SlotKey::Private(key), KeyUsage::Sign) => key,
            _ => return Err(DeviceError::VerifyOnly { key_id }),
        };

        let signature: EcdsaSignature =
            key.sign_prehash(hash)
                .map_err(|e| DeviceError::InvalidParameter {
                    reason: format!("sign rejected digest: {e}"),
                })?;
        let mut bytes = signature.to_bytes().to_vec();
        if truncate {
            bytes.truncate(bytes.len() / 2);
        }

        debug!(key_id = %key_id, "digest signed");
        Ok(bytes)
    }
}

impl DeviceVerifier for SimulatedElement {
    fn device_verify(
        &self,
        hash: &[u8],
        signature: &[u8],
        public_key: &PublicKey,
    ) -> DeviceResult<()> {
        let (_state, fault) = self.begin("verify");
        if let Some(fault) = fault {
            return Err(fault.into_error());
        }

        check_digest(hash)?;

        let key = VerifyingKey::from_sec1_bytes(&public_key.to_sec1_uncompressed())
            .map_err(|_| DeviceError::InvalidPublicKey)?;
        // An R or S outside the scalar field cannot match any digest
        let signature =
            EcdsaSignature::from_slice(signature).map_err(|_| DeviceError::SignatureMismatch)?;

        key.verify_prehash(hash, &signature)
            .map_err(|_| DeviceError::SignatureMismatch)?;

        debug!("signature verified");
        Ok(())
    }
}

impl PublicKeyReader for SimulatedElement {
    fn read_public_key(&self, key_id: KeyId) -> DeviceResult<PublicKey> {
        let (state, fault) = self.begin("read_public_key");
        if let Some(fault) = fault {
            return Err(fault.into_error());
        }

        self.check_range(key_id)?;
        state
            .slots
            .get(&key_id)
            .ok_or(DeviceError::WrongKeyType { key_id })?
            .public_key()
    }
}

fn check_digest(hash: &[u8]) -> DeviceResult<()> {
    if hash.len() != DIGEST_LEN {
        return Err(DeviceError::InvalidParameter {
            reason: format!("digest must be {DIGEST_LEN} bytes, got {}", hash.len()),
        });
    }
    Ok(())
}

fn export_public_key(key: &VerifyingKey) -> DeviceResult<PublicKey> {
    let point = key.as_affine().to_encoded_point(false);
    PublicKey::from_sec1_uncompressed(point.as_bytes()).map_err(|e| {
        DeviceError::InvalidResponse {
            reason: format!("public key export: {e}"),
        }
    })
}
