//! secp256k1 key wallet.

use crate::{Result, WalletError};
use governor_core::Address;
use secp256k1::{ecdsa::RecoveryId, Message, PublicKey, SecretKey, SECP256K1};
use std::fmt;

/// Length of a recoverable signature: 64 compact bytes and the recovery id.
pub const SIGNATURE_SIZE: usize = 65;

/// Anything able to sign transaction hashes on behalf of an address.
pub trait TransactionSigner: Send + Sync {
    /// Address the signatures are made for.
    fn address(&self) -> Address;

    /// Signs a 32 byte transaction hash.
    fn sign(&self, hash: &[u8; 32]) -> Result<[u8; SIGNATURE_SIZE]>;
}

/// A single unlocked private key.
pub struct KeyWallet {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyWallet {
    /// Creates a wallet with a fresh random key.
    pub fn generate() -> Self {
        let secret = SecretKey::new(&mut rand::thread_rng());
        Self::from_secret(secret)
    }

    /// Loads a wallet from a raw 32 byte private key.
    pub fn from_private_key(bytes: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_slice(bytes).map_err(|_| WalletError::InvalidPrivateKey)?;
        Ok(Self::from_secret(secret))
    }

    fn from_secret(secret: SecretKey) -> Self {
        let public = PublicKey::from_secret_key_global(&secret);
        Self { secret, public }
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key())
    }

    /// Uncompressed public key (`0x04` tag followed by X and Y).
    pub fn public_key(&self) -> [u8; 65] {
        self.public.serialize_uncompressed()
    }

    pub fn private_key(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// Signs `hash`, returning the compact signature followed by the
    /// recovery id.
    pub fn sign_recoverable(&self, hash: &[u8; 32]) -> [u8; SIGNATURE_SIZE] {
        let message = Message::from_digest(*hash);
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();

        let mut out = [0u8; SIGNATURE_SIZE];
        out[..64].copy_from_slice(&compact);
        out[64] = recovery_id_byte(recovery_id);
        out
    }
}

fn recovery_id_byte(id: RecoveryId) -> u8 {
    // Recovery ids are always in 0..=3.
    id.to_i32() as u8
}

impl TransactionSigner for KeyWallet {
    fn address(&self) -> Address {
        KeyWallet::address(self)
    }

    fn sign(&self, hash: &[u8; 32]) -> Result<[u8; SIGNATURE_SIZE]> {
        Ok(self.sign_recoverable(hash))
    }
}

/// An address without its key, for step estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOnlyAccount {
    address: Address,
}

impl WatchOnlyAccount {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl TransactionSigner for WatchOnlyAccount {
    fn address(&self) -> Address {
        self.address
    }

    fn sign(&self, _hash: &[u8; 32]) -> Result<[u8; SIGNATURE_SIZE]> {
        Err(WalletError::WatchOnly(self.address))
    }
}

impl fmt::Debug for KeyWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyWallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp256k1::ecdsa::RecoverableSignature;
    use sha3::{Digest, Sha3_256};

    #[test]
    fn rejects_invalid_private_keys() {
        assert!(matches!(
            KeyWallet::from_private_key(&[0u8; 32]),
            Err(WalletError::InvalidPrivateKey)
        ));
        assert!(KeyWallet::from_private_key(&[1u8; 31]).is_err());
    }

    #[test]
    fn address_is_derived_from_public_key() {
        let wallet = KeyWallet::from_private_key(&[7u8; 32]).unwrap();
        let public = wallet.public_key();
        assert_eq!(public[0], 0x04);

        let digest = Sha3_256::digest(&public[1..]);
        assert_eq!(
            wallet.address().to_string(),
            format!("hx{}", hex::encode(&digest[12..]))
        );
    }

    #[test]
    fn signature_recovers_signer() {
        let wallet = KeyWallet::generate();
        let hash: [u8; 32] = Sha3_256::digest(b"icx_sendTransaction.nid.0x1").into();

        let signature = wallet.sign_recoverable(&hash);
        let recovery_id = RecoveryId::from_i32(signature[64] as i32).unwrap();
        let recoverable = RecoverableSignature::from_compact(&signature[..64], recovery_id).unwrap();
        let recovered = SECP256K1
            .recover_ecdsa(&Message::from_digest(hash), &recoverable)
            .unwrap();

        assert_eq!(recovered.serialize_uncompressed(), wallet.public_key());
    }

    #[test]
    fn watch_only_account_refuses_to_sign() {
        let address = KeyWallet::generate().address();
        let account = WatchOnlyAccount::new(address);
        assert_eq!(TransactionSigner::address(&account), address);
        assert!(matches!(
            account.sign(&[0u8; 32]),
            Err(WalletError::WatchOnly(a)) if a == address
        ));
    }

    #[test]
    fn debug_hides_the_key() {
        let wallet = KeyWallet::from_private_key(&[7u8; 32]).unwrap();
        let text = format!("{wallet:?}");
        assert!(text.contains(&wallet.address().to_string()));
        assert!(!text.contains(&hex::encode(wallet.private_key())));
    }
}
