use atca_key::{
    check_key_binding, open_key_handle, AtcaError, DeviceError, DeviceFault, InvalidArgument,
    KeyHandle, KeyId, PublicKey, SimulatedElement, SlotConfig, DIGEST_LEN, SIGNATURE_LEN,
};
use atca_key::ports::PublicKeyReader;
use sha2::{Digest, Sha256};

fn device_with_slot(key_id: KeyId) -> (SimulatedElement, PublicKey) {
    let device = SimulatedElement::new();
    let pk = device.generate(key_id, SlotConfig::signing()).unwrap();
    (device, pk)
}

#[test]
fn test_sign_zero_digest_verify_and_flip_bit() {
    let key_id = KeyId::new(2);
    let (device, _) = device_with_slot(key_id);
    let public_key = device.read_public_key(key_id).unwrap();
    assert_eq!(public_key.as_bytes().len(), 64);

    let handle = KeyHandle::new(&device, key_id, &public_key);
    let hash = [0u8; DIGEST_LEN];
    let mut signature = [0u8; 64];

    let len = handle.sign_into(&hash, &mut signature).unwrap();
    assert!(len <= 64);
    assert_eq!(handle.verify(&hash, &signature[..len]), Ok(()));

    signature[len - 1] ^= 0x80;
    assert_eq!(
        handle.verify(&hash, &signature[..len]),
        Err(AtcaError::VerificationFailed)
    );
}

#[test]
fn test_sign_sha256_of_message() {
    let (device, _) = device_with_slot(KeyId::new(0));
    let handle = open_key_handle(&device, KeyId::new(0)).unwrap();

    let digest = Sha256::digest(b"certificate signing request");
    let signature = handle.sign(&digest).unwrap();

    assert_eq!(handle.verify_signature(&digest, &signature), Ok(()));
    let other = Sha256::digest(b"another request");
    assert_eq!(
        handle.verify_signature(&other, &signature),
        Err(AtcaError::VerificationFailed)
    );
}

#[test]
fn test_signature_converts_to_der() {
    let (device, _) = device_with_slot(KeyId::new(0));
    let handle = open_key_handle(&device, KeyId::new(0)).unwrap();

    let signature = handle.sign(&[1u8; DIGEST_LEN]).unwrap();
    let der = signature.to_der().unwrap();

    assert_eq!(der[0], 0x30);
    assert!(der.len() <= 72);
}

#[test]
fn test_sha384_digest_is_rejected_before_device() {
    let (device, _) = device_with_slot(KeyId::new(0));
    let handle = open_key_handle(&device, KeyId::new(0)).unwrap();
    let before = device.operations();

    let result = handle.sign(&[0u8; 48]);

    assert!(matches!(
        result,
        Err(AtcaError::InvalidArgument(InvalidArgument::HashLength { actual: 48, .. }))
    ));
    assert_eq!(device.operations(), before);
}

#[test]
fn test_transport_fault_differs_from_bad_signature() {
    let (device, _) = device_with_slot(KeyId::new(1));
    let handle = open_key_handle(&device, KeyId::new(1)).unwrap();
    let hash = [7u8; DIGEST_LEN];
    let signature = handle.sign(&hash).unwrap();

    device.inject_fault(DeviceFault::Communication);
    let fault = handle.verify_signature(&hash, &signature).unwrap_err();

    let mut forged = *signature.as_bytes();
    forged[0] ^= 0x01;
    let mismatch = handle.verify(&hash, &forged).unwrap_err();

    assert!(matches!(fault, AtcaError::DeviceUnavailable(_)));
    assert_eq!(mismatch, AtcaError::VerificationFailed);
    assert_ne!(fault, mismatch);
}

#[test]
fn test_sign_fault_during_sign_into_leaves_buffer() {
    let (device, _) = device_with_slot(KeyId::new(1));
    let handle = open_key_handle(&device, KeyId::new(1)).unwrap();
    let mut out = [0xaau8; SIGNATURE_LEN];

    device.inject_fault(DeviceFault::NotPresent);
    let result = handle.sign_into(&[0u8; DIGEST_LEN], &mut out);

    assert_eq!(result, Err(AtcaError::DeviceUnavailable(DeviceError::NotPresent)));
    assert!(out.iter().all(|&b| b == 0xaa));
}

#[test]
fn test_many_handles_share_one_device() {
    let device = SimulatedElement::new();
    for id in 0..4 {
        device.generate(KeyId::new(id), SlotConfig::signing()).unwrap();
    }

    let handles: Vec<_> = (0..4)
        .map(|id| open_key_handle(&device, KeyId::new(id)).unwrap())
        .collect();

    for handle in &handles {
        assert_eq!(check_key_binding(handle), Ok(()));
    }

    // Signature from slot 0 does not verify under slot 1's key
    let hash = [3u8; DIGEST_LEN];
    let signature = handles[0].sign(&hash).unwrap();
    assert_eq!(
        handles[1].verify_signature(&hash, &signature),
        Err(AtcaError::VerificationFailed)
    );
}

#[test]
fn test_handle_drop_leaves_slot_intact() {
    let (device, pk) = device_with_slot(KeyId::new(4));
    {
        let handle = open_key_handle(&device, KeyId::new(4)).unwrap();
        handle.sign(&[0u8; DIGEST_LEN]).unwrap();
    }
    assert_eq!(device.read_public_key(KeyId::new(4)), Ok(pk));
}

#[test]
fn test_handle_used_from_threads() {
    let (device, _) = device_with_slot(KeyId::new(0));
    let handle = open_key_handle(&device, KeyId::new(0)).unwrap();

    std::thread::scope(|scope| {
        for i in 0..4u8 {
            let handle = handle.clone();
            scope.spawn(move || {
                let hash = [i; DIGEST_LEN];
                let signature = handle.sign(&hash).unwrap();
                handle.verify_signature(&hash, &signature).unwrap();
            });
        }
    });
}
