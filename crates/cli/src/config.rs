//! Configuration for the governor CLI
//!
//! Settings come from three places, highest priority first: command-line
//! flags, the TOML configuration file and the built-in network presets.

use crate::args::{parse_integer, GlobalArgs};
use crate::{CliError, Result};
use anyhow::Context;
use governor_core::BigInt;
use governor_rpc_client::invoker::DEFAULT_STEP_LIMIT;
use governor_rpc_client::DEFAULT_TIMEOUT;
use num_traits::Signed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Name of the configuration file inside the user config directory.
pub const CONFIG_FILE_NAME: &str = "governor.toml";

/// Network used when neither a flag nor the file names one.
pub const DEFAULT_NETWORK: &str = "localhost";

/// A well-known ICON network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPreset {
    pub name: &'static str,
    pub url: &'static str,
    pub nid: u64,
}

pub const NETWORK_PRESETS: &[NetworkPreset] = &[
    NetworkPreset {
        name: "mainnet",
        url: "https://ctz.solidwallet.io",
        nid: 0x1,
    },
    NetworkPreset {
        name: "lisbon",
        url: "https://lisbon.net.solidwallet.io",
        nid: 0x2,
    },
    NetworkPreset {
        name: "berlin",
        url: "https://berlin.net.solidwallet.io",
        nid: 0x7,
    },
    NetworkPreset {
        name: "sejong",
        url: "https://sejong.net.solidwallet.io",
        nid: 0x53,
    },
    NetworkPreset {
        name: "localhost",
        url: "http://localhost:9000",
        nid: 0x3,
    },
];

impl NetworkPreset {
    /// Finds a preset by name, or by the scheme, host and port of a url.
    ///
    /// The path is ignored since the client always talks to `/api/v3`.
    pub fn lookup(url_or_name: &str) -> Option<&'static NetworkPreset> {
        if let Some(preset) = NETWORK_PRESETS.iter().find(|p| p.name == url_or_name) {
            return Some(preset);
        }
        let origin = Url::parse(url_or_name).ok()?.origin();
        NETWORK_PRESETS
            .iter()
            .find(|preset| Url::parse(preset.url).is_ok_and(|url| url.origin() == origin))
    }
}

/// Integer settings may be written as TOML integers or as strings
/// (`"0x53"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegerSetting {
    Number(u64),
    Text(String),
}

impl IntegerSetting {
    fn parse(&self, name: &str) -> Result<BigInt> {
        match self {
            IntegerSetting::Number(value) => Ok(BigInt::from(*value)),
            IntegerSetting::Text(text) => parse_integer(text)
                .ok_or_else(|| CliError::validation(format!("Invalid {name}: {text}"))),
        }
    }
}

/// `[network]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSection {
    /// Node url or preset name
    pub url: Option<String>,
    pub nid: Option<IntegerSetting>,
}

/// `[wallet]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletSection {
    /// Default keystore file
    pub keystore: Option<PathBuf>,
}

/// `[transaction]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionSection {
    pub step_limit: Option<IntegerSetting>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Contents of `governor.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub network: NetworkSection,
    pub wallet: WalletSection,
    pub transaction: TransactionSection,
}

impl FileConfig {
    /// `<config dir>/governor/governor.toml`
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("governor").join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration.
    ///
    /// An explicitly named file must exist. Without one the default path is
    /// tried and a missing file there yields the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads and parses one configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Effective settings of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    /// `None` when neither a flag, the file nor a preset supplies it.
    pub nid: Option<BigInt>,
    pub keystore: Option<PathBuf>,
    pub password: Option<String>,
    pub step_limit: BigInt,
    pub timeout: Duration,
    pub estimate: bool,
    pub yes: bool,
}

impl Settings {
    /// Merges flags over the file over the presets.
    pub fn resolve(args: &GlobalArgs, file: &FileConfig) -> Result<Self> {
        let url_or_name = args
            .url
            .as_deref()
            .or(file.network.url.as_deref())
            .unwrap_or(DEFAULT_NETWORK);
        let preset = NetworkPreset::lookup(url_or_name);
        let url = preset.map_or(url_or_name, |preset| preset.url).to_string();

        let nid = match (&args.nid, &file.network.nid) {
            (Some(text), _) => Some(parse_nid(text)?),
            (None, Some(setting)) => Some(positive("nid", setting.parse("nid")?)?),
            (None, None) => preset.map(|preset| BigInt::from(preset.nid)),
        };

        let step_limit = match (&args.step_limit, &file.transaction.step_limit) {
            (Some(text), _) => parse_step_limit(text)?,
            (None, Some(setting)) => non_negative("step limit", setting.parse("step limit")?)?,
            (None, None) => BigInt::from(DEFAULT_STEP_LIMIT),
        };

        let timeout = file
            .transaction
            .timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self {
            url,
            nid,
            keystore: args.keystore.clone().or_else(|| file.wallet.keystore.clone()),
            password: args.password.clone(),
            step_limit,
            timeout,
            estimate: args.estimate,
            yes: args.yes,
        })
    }

    /// The network id, required by write commands.
    pub fn require_nid(&self) -> Result<BigInt> {
        self.nid.clone().ok_or_else(|| {
            CliError::validation(format!("nid is required for {}; use --nid", self.url))
        })
    }

    /// The keystore path, required by write commands.
    pub fn require_keystore(&self) -> Result<&Path> {
        self.keystore
            .as_deref()
            .ok_or_else(|| CliError::validation("keystore is required; use --keystore"))
    }
}

fn parse_nid(text: &str) -> Result<BigInt> {
    let nid =
        parse_integer(text).ok_or_else(|| CliError::validation(format!("Invalid nid: {text}")))?;
    positive("nid", nid)
}

fn parse_step_limit(text: &str) -> Result<BigInt> {
    let step_limit = parse_integer(text)
        .ok_or_else(|| CliError::validation(format!("Invalid step limit: {text}")))?;
    non_negative("step limit", step_limit)
}

fn positive(name: &str, value: BigInt) -> Result<BigInt> {
    if value.is_positive() {
        Ok(value)
    } else {
        Err(CliError::validation(format!("Invalid {name}: {value}")))
    }
}

fn non_negative(name: &str, value: BigInt) -> Result<BigInt> {
    if value.is_negative() {
        Err(CliError::validation(format!("Invalid {name}: {value}")))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GlobalArgs {
        GlobalArgs::default()
    }

    #[test]
    fn test_defaults_point_at_localhost() {
        let settings = Settings::resolve(&args(), &FileConfig::default()).unwrap();
        assert_eq!(settings.url, "http://localhost:9000");
        assert_eq!(settings.nid, Some(BigInt::from(3)));
        assert_eq!(settings.step_limit, BigInt::from(DEFAULT_STEP_LIMIT));
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.keystore, None);
    }

    #[test]
    fn test_preset_names_resolve() {
        let mut args = args();
        args.url = Some("sejong".into());
        let settings = Settings::resolve(&args, &FileConfig::default()).unwrap();
        assert_eq!(settings.url, "https://sejong.net.solidwallet.io");
        assert_eq!(settings.nid, Some(BigInt::from(0x53)));

        args.url = Some("https://ctz.solidwallet.io/".into());
        let settings = Settings::resolve(&args, &FileConfig::default()).unwrap();
        assert_eq!(settings.nid, Some(BigInt::from(1)));

        args.url = Some("https://ctz.solidwallet.io/api/v3".into());
        let settings = Settings::resolve(&args, &FileConfig::default()).unwrap();
        assert_eq!(settings.nid, Some(BigInt::from(1)));
        assert!(settings.require_nid().is_ok());
    }

    #[test]
    fn test_preset_urls_match_on_origin() {
        for url in [
            "https://ctz.solidwallet.io/api/v3",
            "https://ctz.solidwallet.io:443/api/v3/",
            "HTTPS://CTZ.solidwallet.io",
        ] {
            assert_eq!(NetworkPreset::lookup(url).map(|p| p.name), Some("mainnet"), "{url}");
        }
        assert_eq!(
            NetworkPreset::lookup("http://localhost:9000/api/v3d").map(|p| p.nid),
            Some(0x3)
        );

        assert_eq!(NetworkPreset::lookup("http://ctz.solidwallet.io"), None);
        assert_eq!(NetworkPreset::lookup("http://localhost:9080"), None);
        assert_eq!(NetworkPreset::lookup("nowhere"), None);
    }

    #[test]
    fn test_unknown_url_has_no_nid() {
        let mut args = args();
        args.url = Some("http://10.0.0.5:9000".into());
        let settings = Settings::resolve(&args, &FileConfig::default()).unwrap();
        assert_eq!(settings.url, "http://10.0.0.5:9000");
        assert_eq!(settings.nid, None);
        assert!(settings.require_nid().unwrap_err().is_validation());
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig::from_toml(
            r#"
            [network]
            url = "berlin"
            nid = "0x7"

            [wallet]
            keystore = "/keys/file.json"

            [transaction]
            step_limit = 3000000
            timeout_secs = 5
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(&args(), &file).unwrap();
        assert_eq!(settings.url, "https://berlin.net.solidwallet.io");
        assert_eq!(settings.nid, Some(BigInt::from(7)));
        assert_eq!(settings.keystore, Some(PathBuf::from("/keys/file.json")));
        assert_eq!(settings.step_limit, BigInt::from(3_000_000));
        assert_eq!(settings.timeout, Duration::from_secs(5));

        let mut args = args();
        args.nid = Some("83".into());
        args.step_limit = Some("0x100".into());
        args.keystore = Some(PathBuf::from("other.json"));
        let settings = Settings::resolve(&args, &file).unwrap();
        assert_eq!(settings.nid, Some(BigInt::from(83)));
        assert_eq!(settings.step_limit, BigInt::from(256));
        assert_eq!(settings.keystore, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn test_invalid_numbers_are_validation_errors() {
        let mut args = args();
        args.nid = Some("zero".into());
        assert!(Settings::resolve(&args, &FileConfig::default())
            .unwrap_err()
            .is_validation());

        let mut args = GlobalArgs::default();
        args.nid = Some("0".into());
        assert!(Settings::resolve(&args, &FileConfig::default()).is_err());

        let mut args = GlobalArgs::default();
        args.step_limit = Some("-1".into());
        assert!(Settings::resolve(&args, &FileConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(FileConfig::from_toml("[network]\nport = 1\n").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = FileConfig::load(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[network]\nurl = \"lisbon\"\n").unwrap();
        let config = FileConfig::load(Some(&path)).unwrap();
        assert_eq!(config.network.url.as_deref(), Some("lisbon"));
        assert_eq!(config.transaction, TransactionSection::default());
    }
}
