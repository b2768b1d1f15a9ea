//! SP1 proof verification
//!
//! Like RISC Zero, the cryptographic check runs in an external engine. The
//! engine answers with an [`EngineStatus`] that mirrors the `i32` code of the
//! C ABI, so a fault inside the engine stays distinguishable from a proof
//! that simply does not verify.

use tracing::{debug, error};

use crate::barrier;
use polyverify_runtime::{Result, VerifierError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EngineStatus {
    Fault = -1,
    Rejected = 0,
    Verified = 1,
}

impl EngineStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<bool> for EngineStatus {
    fn from(verified: bool) -> Self {
        if verified {
            EngineStatus::Verified
        } else {
            EngineStatus::Rejected
        }
    }
}

/// External verifier for SP1 proofs.
pub trait Sp1Engine: Send + Sync {
    fn verify_proof(&self, proof: &[u8], public_input: &[u8], elf: &[u8]) -> EngineStatus;
}

impl<F> Sp1Engine for F
where
    F: Fn(&[u8], &[u8], &[u8]) -> EngineStatus + Send + Sync,
{
    fn verify_proof(&self, proof: &[u8], public_input: &[u8], elf: &[u8]) -> EngineStatus {
        self(proof, public_input, elf)
    }
}

/// Verifies an SP1 proof against the program `elf`.
///
/// Empty `proof` or `elf` short-circuit to `Ok(false)` without calling the
/// engine. An engine panic or a `Fault` status is an `Err(VerifierFault)`.
pub fn verify_sp1_proof(
    engine: &dyn Sp1Engine,
    proof: &[u8],
    public_input: &[u8],
    elf: &[u8],
) -> Result<bool> {
    if proof.is_empty() || elf.is_empty() {
        debug!(proof_len = proof.len(), elf_len = elf.len(), "sp1 proof or elf missing");
        return Ok(false);
    }

    match barrier::guard("sp1", || engine.verify_proof(proof, public_input, elf))? {
        EngineStatus::Verified => Ok(true),
        EngineStatus::Rejected => Ok(false),
        EngineStatus::Fault => {
            error!("sp1 engine reported a fault");
            Err(VerifierError::fault("sp1 engine reported a fault"))
        }
    }
}

#[cfg(feature = "sp1")]
pub use engine::Sp1ProverEngine;

#[cfg(feature = "sp1")]
mod engine {
    use std::sync::OnceLock;

    use sp1_sdk::{EnvProver, ProverClient, SP1ProofWithPublicValues};
    use tracing::{debug, warn};

    use super::{EngineStatus, Sp1Engine};

    static PROVER_CLIENT: OnceLock<EnvProver> = OnceLock::new();

    /// Verifies bincode-encoded `SP1ProofWithPublicValues` with a lazily
    /// built, process-wide prover client.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Sp1ProverEngine;

    impl Sp1Engine for Sp1ProverEngine {
        fn verify_proof(&self, proof: &[u8], public_input: &[u8], elf: &[u8]) -> EngineStatus {
            let proof: SP1ProofWithPublicValues = match bincode::deserialize(proof) {
                Ok(proof) => proof,
                Err(e) => {
                    debug!(error = %e, "failed to decode sp1 proof");
                    return EngineStatus::Rejected;
                }
            };
            if proof.public_values.as_slice() != public_input {
                warn!("sp1 public values do not match public input");
                return EngineStatus::Rejected;
            }

            let client = PROVER_CLIENT.get_or_init(ProverClient::from_env);
            let (_pk, vk) = client.setup(elf);
            EngineStatus::from(client.verify(&proof, &vk).is_ok())
        }
    }
}
