//! Scrypt parameters for keystore encryption.

use crate::{Result, WalletError};
use serde::{Deserialize, Serialize};

/// Scrypt key derivation parameters as stored in a keystore's `kdfparams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParameters {
    /// CPU/memory cost parameter (N).
    pub n: u32,

    /// Block size parameter (r).
    pub r: u32,

    /// Parallelization parameter (p).
    pub p: u32,

    /// Derived key length.
    pub dklen: u32,
}

impl ScryptParameters {
    /// Creates new scrypt parameters with a 32 byte derived key.
    pub fn new(n: u32, r: u32, p: u32) -> Result<Self> {
        let params = Self { n, r, p, dklen: 32 };
        params.validate()?;
        Ok(params)
    }

    /// Parameters written by the reference wallet software.
    pub fn default_keystore() -> Self {
        Self {
            n: 16384, // 2^14
            r: 8,
            p: 1,
            dklen: 32,
        }
    }

    /// Gets fast scrypt parameters (for testing).
    pub fn fast() -> Self {
        Self {
            n: 16, // 2^4
            r: 1,
            p: 1,
            dklen: 32,
        }
    }

    /// Validates the scrypt parameters.
    pub fn validate(&self) -> Result<()> {
        // N must be a power of 2 and greater than 1
        if self.n <= 1 || !self.n.is_power_of_two() {
            return Err(WalletError::Scrypt(
                "N must be a power of 2 greater than 1".to_string(),
            ));
        }

        if self.r == 0 || self.p == 0 {
            return Err(WalletError::Scrypt(
                "R and P must be greater than 0".to_string(),
            ));
        }

        if self.r > u32::MAX / 128 || self.n > u32::MAX / (128 * self.r) {
            return Err(WalletError::Scrypt("N or R parameter is too large".to_string()));
        }

        // The MAC and cipher key are both cut from the first 32 bytes.
        if self.dklen < 32 {
            return Err(WalletError::Scrypt(
                "Derived key length must be at least 32".to_string(),
            ));
        }

        Ok(())
    }

    /// Gets the log2 of N parameter.
    pub fn log_n(&self) -> u8 {
        self.n.trailing_zeros() as u8
    }

    /// Converts to scrypt crate parameters.
    pub fn to_scrypt_params(&self) -> Result<scrypt::Params> {
        self.validate()?;
        scrypt::Params::new(self.log_n(), self.r, self.p, self.dklen as usize)
            .map_err(|e| WalletError::Scrypt(e.to_string()))
    }
}

impl Default for ScryptParameters {
    fn default() -> Self {
        Self::default_keystore()
    }
}

impl std::fmt::Display for ScryptParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScryptParameters(N={}, r={}, p={}, dklen={})",
            self.n, self.r, self.p, self.dklen
        )
    }
}
