//! Version 3 JSON keystore.
//!
//! The private key is encrypted with AES-128-CTR under the first half of an
//! scrypt-derived key. The second half authenticates the ciphertext:
//! `mac = keccak256(derived[16..32] ++ ciphertext)`.

use crate::key_wallet::KeyWallet;
use crate::scrypt_parameters::ScryptParameters;
use crate::{Result, WalletError};
use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use governor_core::Address;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

const KEYSTORE_VERSION: u32 = 3;
const COIN_TYPE: &str = "icx";
const CIPHER: &str = "aes-128-ctr";
const KDF: &str = "scrypt";

/// On-disk keystore document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keystore {
    pub address: Address,
    pub crypto: CryptoSection,
    pub id: String,
    pub version: u32,
    pub coin_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoSection {
    pub cipher: String,
    pub cipherparams: CipherParams,
    pub ciphertext: String,
    pub kdf: String,
    pub kdfparams: KdfParams,
    pub mac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    pub iv: String,
}

/// Scrypt parameters plus the salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    #[serde(flatten)]
    pub scrypt: ScryptParameters,
    pub salt: String,
}

impl Keystore {
    /// Reads and parses a keystore file without decrypting it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(WalletError::KeystoreNotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "loading keystore");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let keystore: Keystore = serde_json::from_str(text)?;
        if keystore.version != KEYSTORE_VERSION {
            return Err(WalletError::InvalidKeystore(format!(
                "unsupported version {}",
                keystore.version
            )));
        }
        if keystore.coin_type != COIN_TYPE {
            return Err(WalletError::InvalidKeystore(format!(
                "unsupported coin type {}",
                keystore.coin_type
            )));
        }
        Ok(keystore)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Unlocks the key with `password`.
    pub fn decrypt(&self, password: &str) -> Result<KeyWallet> {
        let crypto = &self.crypto;
        if crypto.kdf != KDF {
            return Err(WalletError::UnsupportedCrypto(crypto.kdf.clone()));
        }
        if crypto.cipher != CIPHER {
            return Err(WalletError::UnsupportedCrypto(crypto.cipher.clone()));
        }

        let salt = decode_hex("salt", &crypto.kdfparams.salt)?;
        let iv = decode_hex("iv", &crypto.cipherparams.iv)?;
        let ciphertext = decode_hex("ciphertext", &crypto.ciphertext)?;
        let mac = decode_hex("mac", &crypto.mac)?;

        let derived = derive_key(password, &salt, &crypto.kdfparams.scrypt)?;
        if mac_of(&derived, &ciphertext).as_slice() != mac.as_slice() {
            return Err(WalletError::InvalidPassword);
        }

        let mut private_key = Zeroizing::new(ciphertext);
        apply_cipher(&derived, &iv, &mut private_key)?;
        let wallet = KeyWallet::from_private_key(&private_key)?;

        let actual = wallet.address();
        if actual != self.address {
            return Err(WalletError::AddressMismatch {
                expected: self.address,
                actual,
            });
        }
        Ok(wallet)
    }

    /// Encrypts `wallet` under `password`.
    pub fn encrypt(wallet: &KeyWallet, password: &str, params: ScryptParameters) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; 32];
        let mut iv = [0u8; 16];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut iv);

        let derived = derive_key(password, &salt, &params)?;
        let mut ciphertext = wallet.private_key().to_vec();
        apply_cipher(&derived, &iv, &mut ciphertext)?;
        let mac = mac_of(&derived, &ciphertext);

        Ok(Self {
            address: wallet.address(),
            crypto: CryptoSection {
                cipher: CIPHER.to_string(),
                cipherparams: CipherParams {
                    iv: hex::encode(iv),
                },
                ciphertext: hex::encode(&ciphertext),
                kdf: KDF.to_string(),
                kdfparams: KdfParams {
                    scrypt: params,
                    salt: hex::encode(salt),
                },
                mac: hex::encode(mac),
            },
            id: uuid::Uuid::new_v4().to_string(),
            version: KEYSTORE_VERSION,
            coin_type: COIN_TYPE.to_string(),
        })
    }
}

fn decode_hex(field: &str, text: &str) -> Result<Vec<u8>> {
    hex::decode(text.trim_start_matches("0x"))
        .map_err(|e| WalletError::InvalidKeystore(format!("{field}: {e}")))
}

fn derive_key(
    password: &str,
    salt: &[u8],
    params: &ScryptParameters,
) -> Result<Zeroizing<Vec<u8>>> {
    let scrypt_params = params.to_scrypt_params()?;
    let mut derived = Zeroizing::new(vec![0u8; params.dklen as usize]);
    scrypt::scrypt(password.as_bytes(), salt, &scrypt_params, &mut derived)
        .map_err(|e| WalletError::Scrypt(e.to_string()))?;
    Ok(derived)
}

fn mac_of(derived: &[u8], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(&derived[16..32]);
    hasher.update(ciphertext);
    hasher.finalize().into()
}

fn apply_cipher(derived: &[u8], iv: &[u8], buffer: &mut [u8]) -> Result<()> {
    let mut cipher = Aes128Ctr::new_from_slices(&derived[..16], iv)
        .map_err(|_| WalletError::InvalidKeystore("iv must be 16 bytes".to_string()))?;
    cipher.apply_keystream(buffer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_json() {
        let wallet = KeyWallet::generate();
        let keystore = Keystore::encrypt(&wallet, "qwer1234!", ScryptParameters::fast()).unwrap();

        let parsed = Keystore::from_json(&keystore.to_json().unwrap()).unwrap();
        assert_eq!(parsed, keystore);

        let unlocked = parsed.decrypt("qwer1234!").unwrap();
        assert_eq!(unlocked.address(), wallet.address());
        assert_eq!(unlocked.private_key(), wallet.private_key());
    }

    #[test]
    fn json_layout() {
        let wallet = KeyWallet::from_private_key(&[3u8; 32]).unwrap();
        let keystore = Keystore::encrypt(&wallet, "pw", ScryptParameters::fast()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&keystore.to_json().unwrap()).unwrap();

        assert_eq!(json["coinType"], "icx");
        assert_eq!(json["version"], 3);
        assert_eq!(json["crypto"]["kdf"], "scrypt");
        assert_eq!(json["crypto"]["kdfparams"]["n"], 16);
        assert_eq!(json["crypto"]["kdfparams"]["dklen"], 32);
        assert_eq!(json["address"], wallet.address().to_string());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let wallet = KeyWallet::generate();
        let keystore = Keystore::encrypt(&wallet, "right", ScryptParameters::fast()).unwrap();
        assert!(matches!(
            keystore.decrypt("wrong"),
            Err(WalletError::InvalidPassword)
        ));
    }

    #[test]
    fn unsupported_kdf_is_rejected() {
        let wallet = KeyWallet::generate();
        let mut keystore = Keystore::encrypt(&wallet, "pw", ScryptParameters::fast()).unwrap();
        keystore.crypto.kdf = "pbkdf2".to_string();
        assert!(matches!(
            keystore.decrypt("pw"),
            Err(WalletError::UnsupportedCrypto(kdf)) if kdf == "pbkdf2"
        ));
    }

    #[test]
    fn address_mismatch_is_detected() {
        let wallet = KeyWallet::generate();
        let mut keystore = Keystore::encrypt(&wallet, "pw", ScryptParameters::fast()).unwrap();
        keystore.address = KeyWallet::generate().address();
        assert!(matches!(
            keystore.decrypt("pw"),
            Err(WalletError::AddressMismatch { .. })
        ));
    }

    #[test]
    fn wrong_coin_type_is_rejected() {
        let wallet = KeyWallet::generate();
        let mut keystore = Keystore::encrypt(&wallet, "pw", ScryptParameters::fast()).unwrap();
        keystore.coin_type = "eth".to_string();
        let text = keystore.to_json().unwrap();
        assert!(matches!(
            Keystore::from_json(&text),
            Err(WalletError::InvalidKeystore(_))
        ));
    }
}
