//! Configuration for the [`PendingAuthorizationStore`](crate::PendingAuthorizationStore).
use crate::error::{Error, Result};
use crate::store::default_attribute_name;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration data struct for the [`PendingAuthorizationStore`](crate::PendingAuthorizationStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Keep every pending request of a session instead of only the latest one.
    #[serde(default)]
    pub allow_multiple: bool,
    /// The session attribute the pending requests are stored under.
    ///
    /// Must not be blank, and must not be shared with any other session attribute.
    #[serde(default = "default_attribute_name")]
    pub attribute_name: String,
}

impl Config {
    /// Checks that the configuration can back a store.
    pub fn validate(&self) -> Result<()> {
        if self.attribute_name.trim().is_empty() {
            return Err(Error::InvalidArgument(String::from(
                "session attribute name cannot be empty",
            )));
        }
        Ok(())
    }
    /// Reads and validates a configuration file.
    ///
    /// The format is chosen by the file extension: `.json`, or `.toml` with the
    /// `config-toml` feature. Fields missing from the file take their default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::of(path).map_err(Error::ConfigLoad)?;
        let contents =
            std::fs::read_to_string(path).map_err(|err| Error::ConfigLoad(Box::new(err)))?;
        let config = format.parse(&contents).map_err(Error::ConfigLoad)?;
        config.validate()?;
        Ok(config)
    }
    /// Validates the configuration and writes it to a file, in the format of its extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        let contents = Format::of(path)
            .and_then(|format| format.render(self))
            .map_err(Error::ConfigSave)?;
        std::fs::write(path, contents).map_err(|err| Error::ConfigSave(Box::new(err)))
    }
}

impl Default for Config {
    /// Creates a new default configuration.
    ///
    /// The default configuration keeps a single pending request per session, stored under
    /// [`DEFAULT_ATTRIBUTE_NAME`](crate::store::DEFAULT_ATTRIBUTE_NAME).
    fn default() -> Self {
        Self { allow_multiple: false, attribute_name: default_attribute_name() }
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

enum Format {
    Json,
    #[cfg(feature = "config-toml")]
    Toml,
}

impl Format {
    fn of(path: &Path) -> core::result::Result<Self, BoxError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            #[cfg(feature = "config-toml")]
            Some("toml") => Ok(Self::Toml),
            _ => Err(anyhow!("unsupported config file format: {}", path.display()).into()),
        }
    }
    fn parse(&self, contents: &str) -> core::result::Result<Config, BoxError> {
        match self {
            Self::Json => Ok(serde_json::from_str(contents)?),
            #[cfg(feature = "config-toml")]
            Self::Toml => Ok(toml::from_str(contents)?),
        }
    }
    fn render(&self, config: &Config) -> core::result::Result<String, BoxError> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(config)?),
            #[cfg(feature = "config-toml")]
            Self::Toml => Ok(toml::to_string_pretty(config)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_ATTRIBUTE_NAME;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert!(!config.allow_multiple);
        assert_eq!(config.attribute_name, DEFAULT_ATTRIBUTE_NAME);
        assert_eq!(
            DEFAULT_ATTRIBUTE_NAME,
            "oauth_pending::store::PendingAuthorizationStore.AUTHORIZATION_REQUEST"
        );
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config =
            serde_json::from_str(r#"{"allow_multiple":true}"#).expect("failed to deserialize");
        assert!(config.allow_multiple);
        assert_eq!(config.attribute_name, DEFAULT_ATTRIBUTE_NAME);

        let config: Config = serde_json::from_str(r#"{"attribute_name":"pending"}"#)
            .expect("failed to deserialize");
        assert!(!config.allow_multiple);
        assert_eq!(config.attribute_name, "pending");
    }

    #[test]
    fn test_validate_blank_attribute_name() {
        for name in ["", "  "] {
            let config = Config { allow_multiple: false, attribute_name: String::from(name) };
            assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pending.json");
        let config = Config { allow_multiple: true, attribute_name: String::from("pending") };
        config.to_file(&path).expect("failed to save config");
        assert_eq!(Config::from_file(&path).expect("failed to load config"), config);
    }

    #[test]
    fn test_file_with_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pending.json");
        std::fs::write(&path, "{}").expect("failed to write config");
        assert_eq!(Config::from_file(&path).expect("failed to load config"), Config::default());
    }

    #[test]
    fn test_file_rejects_empty_attribute_name() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pending.json");
        std::fs::write(&path, r#"{"allow_multiple":true,"attribute_name":""}"#)
            .expect("failed to write config");
        assert!(matches!(Config::from_file(&path), Err(Error::InvalidArgument(_))));

        let config = Config { allow_multiple: true, attribute_name: String::new() };
        let out = dir.path().join("out.json");
        assert!(matches!(config.to_file(&out), Err(Error::InvalidArgument(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        assert!(matches!(
            Config::from_file(dir.path().join("missing.json")),
            Err(Error::ConfigLoad(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pending.json");
        std::fs::write(&path, r#"{"allow_multiple":"yes"}"#).expect("failed to write config");
        assert!(matches!(Config::from_file(&path), Err(Error::ConfigLoad(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pending.ini");
        assert!(matches!(Config::default().to_file(&path), Err(Error::ConfigSave(_))));
        std::fs::write(&path, "allow_multiple = true").expect("failed to write config");
        assert!(matches!(Config::from_file(&path), Err(Error::ConfigLoad(_))));
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pending.toml");
        std::fs::write(&path, "allow_multiple = true\n").expect("failed to write config");
        let config = Config::from_file(&path).expect("failed to load config");
        assert!(config.allow_multiple);
        assert_eq!(config.attribute_name, DEFAULT_ATTRIBUTE_NAME);
    }
}
