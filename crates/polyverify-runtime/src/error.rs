//! Error types for polyverify

use thiserror::Error;

use crate::types::ProvingSystemId;

/// Result type alias for polyverify operations
pub type Result<T> = std::result::Result<T, VerifierError>;

/// Main error type for proof verification
///
/// A proof that is well formed but does not satisfy the verification equation
/// is not an error: it is reported as `Ok(false)`. `VerificationFailed` exists
/// for callers that want to fold a rejection into the error channel.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// Proof bytes could not be decoded for the selected scheme
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// Public input bytes could not be decoded for the selected scheme
    #[error("Malformed public input: {0}")]
    MalformedPublicInput(String),

    /// Verifying key bytes could not be decoded for the selected scheme
    #[error("Malformed verifying key: {0}")]
    MalformedVerifyingKey(String),

    /// The proof was decoded but rejected by the verification equation
    #[error("Proof verification failed")]
    VerificationFailed,

    /// A verification engine panicked or reported an internal fault
    #[error("Verifier fault: {0}")]
    VerifierFault(String),

    /// A mandatory buffer was empty or missing
    #[error("Empty required input: {0}")]
    EmptyRequiredInput(&'static str),

    /// The proving system is disabled by configuration
    #[error("Proving system {0} is disabled")]
    DisabledProvingSystem(ProvingSystemId),

    /// The proof exceeds the configured size limit
    #[error("Proof too large: {size} bytes (max {max})")]
    ProofTooLarge { size: usize, max: usize },

    /// No external engine is registered for a zkVM proving system
    #[error("No verification engine registered for {0}")]
    EngineUnavailable(ProvingSystemId),

    /// Invalid configuration file or value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VerifierError {
    pub fn malformed_proof(msg: impl Into<String>) -> Self {
        Self::MalformedProof(msg.into())
    }

    pub fn malformed_public_input(msg: impl Into<String>) -> Self {
        Self::MalformedPublicInput(msg.into())
    }

    pub fn malformed_verifying_key(msg: impl Into<String>) -> Self {
        Self::MalformedVerifyingKey(msg.into())
    }

    pub fn fault(msg: impl Into<String>) -> Self {
        Self::VerifierFault(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns true for errors raised by a faulting engine rather than by bad input
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::VerifierFault(_))
    }

    /// Returns true for decode failures of any of the three buffers
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedProof(_) | Self::MalformedPublicInput(_) | Self::MalformedVerifyingKey(_)
        )
    }
}
