use crate::encoding::base64_bytes;
use crate::{CardError, CardValidator, Verifier};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vouch_crypto::{CryptoProvider, PublicKey};

/// A trusted signer as written in configuration; the key is base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    pub id: String,
    #[serde(with = "base64_bytes")]
    pub public_key: Vec<u8>,
}

impl From<&VerifierConfig> for Verifier {
    fn from(cfg: &VerifierConfig) -> Self {
        Verifier::new(cfg.id.clone(), PublicKey::from_bytes(cfg.public_key.clone()))
    }
}

/// Validator policy, typically loaded from a TOML file:
///
/// ```toml
/// require_default_verifiers = true
///
/// [[verifiers]]
/// id = "my-app"
/// public_key = "base64..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Make the default verifiers mandatory (strict mode).
    #[serde(default)]
    pub require_default_verifiers: bool,

    /// Verifiers whose signatures every card must carry.
    #[serde(default)]
    pub verifiers: Vec<VerifierConfig>,

    /// Replaces the built-in hosted service as the default verifier set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_verifiers: Option<Vec<VerifierConfig>>,
}

impl ValidatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, CardError> {
        toml::from_str(s).map_err(|e| CardError::Config(e.to_string()))
    }

    /// Read and parse a TOML policy file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read validator config: {:?}", path))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse validator config: {:?}", path))?;
        Ok(config)
    }
}

impl<C: CryptoProvider> CardValidator<C> {
    /// Build a validator configured by `config`.
    pub fn from_config(crypto: C, config: &ValidatorConfig) -> Result<Self, CardError> {
        let mut validator = match &config.default_verifiers {
            Some(defaults) => {
                if defaults.iter().any(|v| v.id.is_empty() || v.public_key.is_empty()) {
                    return Err(CardError::Config(
                        "default verifier with empty id or public key".to_string(),
                    ));
                }
                Self::with_default_verifiers(crypto, defaults.iter().map(Verifier::from).collect())
            }
            None => Self::new(crypto),
        };

        for verifier in &config.verifiers {
            validator.add_verifier(
                verifier.id.clone(),
                PublicKey::from_bytes(verifier.public_key.clone()),
            )?;
        }

        if config.require_default_verifiers {
            validator.add_default_verifiers();
        }

        Ok(validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SERVICE_CARD_ID;
    use assert_matches::assert_matches;
    use std::io::Write;
    use vouch_crypto::Ed25519Crypto;

    const POLICY: &str = r#"
require_default_verifiers = true

[[verifiers]]
id = "my-app"
public_key = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA="
"#;

    #[test]
    fn parses_policy() {
        let config = ValidatorConfig::from_toml_str(POLICY).unwrap();
        assert!(config.require_default_verifiers);
        assert_eq!(config.verifiers.len(), 1);
        assert_eq!(config.verifiers[0].id, "my-app");
        assert_eq!(config.verifiers[0].public_key, (1u8..=32).collect::<Vec<_>>());
        assert!(config.default_verifiers.is_none());
    }

    #[test]
    fn empty_config_is_lenient() {
        let config = ValidatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ValidatorConfig::default());

        let validator = CardValidator::from_config(Ed25519Crypto::new(), &config).unwrap();
        assert!(!validator.requires_default_verifiers());
        assert_eq!(validator.verifiers().count(), 0);
    }

    #[test]
    fn builds_strict_validator() {
        let config = ValidatorConfig::from_toml_str(POLICY).unwrap();
        let validator = CardValidator::from_config(Ed25519Crypto::new(), &config).unwrap();

        let ids: Vec<_> = validator.verifiers().map(|(id, _)| id.to_string()).collect();
        assert!(validator.requires_default_verifiers());
        assert!(ids.contains(&"my-app".to_string()));
        assert!(ids.contains(&SERVICE_CARD_ID.to_string()));
    }

    #[test]
    fn default_verifiers_can_be_overridden() {
        let config = ValidatorConfig::from_toml_str(
            r#"
require_default_verifiers = true

[[default_verifiers]]
id = "private-service"
public_key = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA="
"#,
        )
        .unwrap();
        let validator = CardValidator::from_config(Ed25519Crypto::new(), &config).unwrap();

        let ids: Vec<_> = validator.verifiers().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["private-service"]);
    }

    #[test]
    fn rejects_bad_base64_key() {
        let result = ValidatorConfig::from_toml_str(
            r#"
[[verifiers]]
id = "my-app"
public_key = "***"
"#,
        );
        assert_matches!(result, Err(CardError::Config(_)));
    }

    #[test]
    fn rejects_empty_verifier_id() {
        let config = ValidatorConfig {
            verifiers: vec![VerifierConfig {
                id: String::new(),
                public_key: vec![1u8; 32],
            }],
            ..Default::default()
        };
        assert_matches!(
            CardValidator::from_config(Ed25519Crypto::new(), &config),
            Err(CardError::InvalidArgument(_))
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(POLICY.as_bytes()).unwrap();

        let config = ValidatorConfig::load(file.path()).unwrap();
        assert_eq!(config.verifiers.len(), 1);

        let missing = ValidatorConfig::load(Path::new("/nonexistent/validator.toml"));
        assert!(missing.is_err());
    }
}
