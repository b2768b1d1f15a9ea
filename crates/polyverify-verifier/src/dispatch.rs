//! Request-level dispatch
//!
//! [`Verifier`] takes a [`VerificationData`], applies the configured limits
//! and routes the buffers to the adapter of the requested proving system.

use std::fmt;

use ark_bls12_381::Bls12_381;
use tracing::{debug, error, warn};

use crate::risc_zero::{self, ReceiptEngine};
use crate::sp1::{self, Sp1Engine};
use crate::{circom, gnark, groth16, plonk};
use polyverify_runtime::{ProvingSystemId, Result, VerificationData, VerifierConfig, VerifierError};

pub struct Verifier {
    config: VerifierConfig,
    risc0: Option<Box<dyn ReceiptEngine>>,
    sp1: Option<Box<dyn Sp1Engine>>,
}

impl Verifier {
    /// A verifier with no zkVM engine registered.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config, risc0: None, sp1: None }
    }

    pub fn with_risc0_engine<E: ReceiptEngine + 'static>(mut self, engine: E) -> Self {
        self.risc0 = Some(Box::new(engine));
        self
    }

    pub fn with_sp1_engine<E: Sp1Engine + 'static>(mut self, engine: E) -> Self {
        self.sp1 = Some(Box::new(engine));
        self
    }

    /// Registers the zkVM engines compiled into this build.
    #[allow(unused_mut)]
    pub fn with_default_engines(mut self) -> Self {
        #[cfg(feature = "risc0")]
        {
            self = self.with_risc0_engine(risc_zero::RiscZeroEngine);
        }
        #[cfg(feature = "sp1")]
        {
            self = self.with_sp1_engine(sp1::Sp1ProverEngine);
        }
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn has_engine(&self, proving_system: ProvingSystemId) -> bool {
        match proving_system {
            ProvingSystemId::Risc0 => self.risc0.is_some(),
            ProvingSystemId::SP1 => self.sp1.is_some(),
            _ => true,
        }
    }

    pub fn verify(&self, data: &VerificationData) -> Result<bool> {
        let system = data.proving_system;
        let outcome = self.check_request(data).and_then(|()| self.dispatch(data));
        settle(system, &outcome);
        outcome
    }

    fn check_request(&self, data: &VerificationData) -> Result<()> {
        let system = data.proving_system;
        if !self.config.is_enabled(system) {
            return Err(VerifierError::DisabledProvingSystem(system));
        }
        if data.proof.len() > self.config.max_proof_size {
            return Err(VerifierError::ProofTooLarge {
                size: data.proof.len(),
                max: self.config.max_proof_size,
            });
        }
        required(&data.proof, "proof")?;
        if system.is_zkvm() {
            required(data.program(), "program")?;
        } else {
            required(data.verifying_key(), "verifying key")?;
        }
        Ok(())
    }

    fn dispatch(&self, data: &VerificationData) -> Result<bool> {
        let proof = data.proof.as_slice();
        let public_input = data.public_input();
        let vk = data.verifying_key();

        match data.proving_system {
            ProvingSystemId::Groth16Bn254 => gnark::try_verify_groth16(proof, public_input, vk),
            ProvingSystemId::Groth16Bls12_381 => {
                groth16::try_verify::<Bls12_381>(proof, public_input, vk)
            }
            ProvingSystemId::PlonkBn254 => plonk::try_verify_bn254(proof, public_input, vk),
            ProvingSystemId::PlonkBls12_381 => plonk::try_verify_bls12_381(proof, public_input, vk),
            ProvingSystemId::CircomGroth16Bn128 => circom::try_verify(proof, public_input, vk),
            ProvingSystemId::Risc0 => {
                let engine = self
                    .risc0
                    .as_deref()
                    .ok_or(VerifierError::EngineUnavailable(ProvingSystemId::Risc0))?;
                risc_zero::try_verify_risc_zero_receipt(engine, proof, data.program(), public_input)
            }
            ProvingSystemId::SP1 => {
                let engine = self
                    .sp1
                    .as_deref()
                    .ok_or(VerifierError::EngineUnavailable(ProvingSystemId::SP1))?;
                sp1::verify_sp1_proof(engine, proof, public_input, data.program())
            }
        }
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(VerifierConfig::default())
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("config", &self.config)
            .field("risc0_engine", &self.risc0.is_some())
            .field("sp1_engine", &self.sp1.is_some())
            .finish()
    }
}

fn required(bytes: &[u8], what: &'static str) -> Result<()> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput(what));
    }
    Ok(())
}

fn settle(system: ProvingSystemId, outcome: &Result<bool>) {
    match outcome {
        Ok(true) => debug!(%system, "proof verified"),
        Ok(false) => warn!(%system, "proof rejected"),
        Err(e) if e.is_fault() => error!(%system, error = %e, "verifier fault"),
        Err(e) => warn!(%system, error = %e, "verification request refused"),
    }
}
