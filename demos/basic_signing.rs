// Example demonstrating a key handle over a secure element
//
// Run with: cargo run --example basic_signing
//
// Uses the in-process simulated element, so no hardware is needed

use anyhow::Context;
use atca_key::{check_key_binding, open_key_handle, KeyId, SimulatedElement, SlotConfig};
use sha2::{Digest, Sha256};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Secure Element Signing Example");
    println!("==============================\n");

    let device = SimulatedElement::new();
    let key_id = KeyId::new(2);

    println!("Generating key in slot {key_id}...");
    device
        .generate(key_id, SlotConfig::signing())
        .context("failed to generate key")?;

    // Public key is fetched before the handle is built
    let handle = open_key_handle(&device, key_id).context("failed to open key handle")?;
    println!("✓ Key handle opened");
    println!("  Public key: {}\n", handle.public_key());

    check_key_binding(&handle).context("slot and public key do not match")?;
    println!("✓ Slot and public key belong together\n");

    let message = b"Hello, secure element!";
    println!("Signing message: {:?}", String::from_utf8_lossy(message));
    let digest = Sha256::digest(message);
    let signature = handle.sign(&digest)?;
    println!("✓ Message signed");
    println!("  Signature: {}\n", hex::encode(signature.as_bytes()));

    println!("Verifying signature...");
    match handle.verify_signature(&digest, &signature) {
        Ok(()) => println!("✓ Signature verified successfully!"),
        Err(e) => println!("✗ Signature verification failed: {e}"),
    }

    Ok(())
}
