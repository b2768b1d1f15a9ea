//! Verifier configuration
//!
//! Loaded from a JSON file such as:
//!
//! ```json
//! {
//!   "max_proof_size": 4194304,
//!   "disabled_verifiers": ["risc0"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{Result, VerifierError};
use crate::types::ProvingSystemId;

pub const DEFAULT_MAX_PROOF_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Largest accepted proof, in bytes
    #[serde(default = "default_max_proof_size")]
    pub max_proof_size: usize,
    /// Proving systems rejected before any decoding
    #[serde(default)]
    pub disabled_verifiers: Vec<ProvingSystemId>,
}

fn default_max_proof_size() -> usize {
    DEFAULT_MAX_PROOF_SIZE
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { max_proof_size: DEFAULT_MAX_PROOF_SIZE, disabled_verifiers: Vec::new() }
    }
}

impl VerifierConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| VerifierError::invalid_config(format!("failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_proof_size == 0 {
            return Err(VerifierError::invalid_config("max_proof_size must be greater than zero"));
        }
        Ok(())
    }

    pub fn is_enabled(&self, proving_system: ProvingSystemId) -> bool {
        !self.disabled_verifiers.contains(&proving_system)
    }

    pub fn disable(&mut self, proving_system: ProvingSystemId) {
        if self.is_enabled(proving_system) {
            self.disabled_verifiers.push(proving_system);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_enables_everything() {
        let config = VerifierConfig::default();
        assert_eq!(config.max_proof_size, DEFAULT_MAX_PROOF_SIZE);
        for id in ProvingSystemId::ALL {
            assert!(config.is_enabled(id));
        }
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = VerifierConfig::from_json("{}").unwrap();
        assert_eq!(config, VerifierConfig::default());
    }

    #[test]
    fn test_from_json_disabled_verifiers() {
        let config = VerifierConfig::from_json(
            r#"{"max_proof_size": 1024, "disabled_verifiers": ["sp1", "plonk-bn254"]}"#,
        )
        .unwrap();
        assert_eq!(config.max_proof_size, 1024);
        assert!(!config.is_enabled(ProvingSystemId::SP1));
        assert!(!config.is_enabled(ProvingSystemId::PlonkBn254));
        assert!(config.is_enabled(ProvingSystemId::Groth16Bn254));
    }

    #[test]
    fn test_unknown_proving_system_rejected() {
        let result = VerifierConfig::from_json(r#"{"disabled_verifiers": ["stark"]}"#);
        assert!(matches!(result, Err(VerifierError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_max_proof_size_rejected() {
        let result = VerifierConfig::from_json(r#"{"max_proof_size": 0}"#);
        assert!(matches!(result, Err(VerifierError::InvalidConfig(_))));
    }

    #[test]
    fn test_disable_is_idempotent() {
        let mut config = VerifierConfig::default();
        config.disable(ProvingSystemId::Risc0);
        config.disable(ProvingSystemId::Risc0);
        assert_eq!(config.disabled_verifiers, vec![ProvingSystemId::Risc0]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"disabled_verifiers": ["risc0"]}}"#).unwrap();

        let config = VerifierConfig::from_file(file.path()).unwrap();
        assert!(!config.is_enabled(ProvingSystemId::Risc0));
    }

    #[test]
    fn test_from_missing_file() {
        let result = VerifierConfig::from_file("/nonexistent/polyverify.json");
        assert!(matches!(result, Err(VerifierError::Io(_))));
    }
}
