//! Keystore file handling.

use governor_wallets::*;
use tempfile::TempDir;

#[test]
fn test_save_then_load_and_unlock() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keystore.json");

    let wallet = KeyWallet::generate();
    Keystore::encrypt(&wallet, "p@ssw0rd", ScryptParameters::fast())
        .unwrap()
        .save(&path)
        .unwrap();

    let keystore = Keystore::load(&path).unwrap();
    assert_eq!(keystore.address, wallet.address());

    let unlocked = keystore.decrypt("p@ssw0rd").unwrap();
    assert_eq!(TransactionSigner::address(&unlocked), wallet.address());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Keystore::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(WalletError::KeystoreNotFound(_))));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"address\": 1}").unwrap();
    assert!(matches!(Keystore::load(&path), Err(WalletError::Json(_))));
}

#[test]
fn test_signer_trait_object() {
    let wallet = KeyWallet::from_private_key(&[9u8; 32]).unwrap();
    let signer: &dyn TransactionSigner = &wallet;

    let hash = [0x42u8; 32];
    let signature = signer.sign(&hash).unwrap();
    assert_eq!(signature.len(), SIGNATURE_SIZE);
    assert!(signature[64] <= 3);
    assert_eq!(signature, wallet.sign_recoverable(&hash));
}
