//! Proof verification adapters for heterogeneous proving systems
//!
//! Each adapter takes three opaque byte buffers (proof, public input and a
//! verifying key or program), decodes them for one fixed scheme and curve,
//! and answers whether the proof verifies.
//!
//! Two surfaces are offered for every scheme:
//! - `try_verify_*` returns the typed [`Result`], so callers can tell a
//!   malformed buffer from a rejected proof;
//! - `verify_*` collapses everything that is not a valid proof to `false`.
//!
//! The [`ffi`] module exposes the same operations over the C ABI.

pub mod barrier;
pub mod buffer;
pub mod circom;
pub mod dispatch;
pub mod ffi;
pub mod gnark;
pub mod groth16;
pub mod plonk;
pub mod risc_zero;
pub mod sp1;

use ark_bls12_381::Bls12_381;
use tracing::{debug, error};

pub use buffer::ListRef;
pub use dispatch::Verifier;
pub use polyverify_runtime::{
    Curve, ProvingSystemId, Result, VerificationData, VerifierConfig, VerifierError,
};
pub use risc_zero::{try_verify_risc_zero_receipt, verify_risc_zero_receipt, ReceiptEngine};
pub use sp1::{verify_sp1_proof, EngineStatus, Sp1Engine};

#[cfg(feature = "risc0")]
pub use risc_zero::RiscZeroEngine;
#[cfg(feature = "sp1")]
pub use sp1::Sp1ProverEngine;

/// BN254 artifacts are gnark's, BLS12-381 artifacts are arkworks'.
/// See [`gnark`] and [`groth16`] for the encodings.
pub fn try_verify_groth16(
    curve: Curve,
    proof: &[u8],
    public_input: &[u8],
    vk: &[u8],
) -> Result<bool> {
    match curve {
        Curve::Bn254 => gnark::try_verify_groth16(proof, public_input, vk),
        Curve::Bls12_381 => groth16::try_verify::<Bls12_381>(proof, public_input, vk),
    }
}

pub fn verify_groth16(curve: Curve, proof: &[u8], public_input: &[u8], vk: &[u8]) -> bool {
    to_verdict("groth16", try_verify_groth16(curve, proof, public_input, vk))
}

pub fn try_verify_plonk(curve: Curve, proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    match curve {
        Curve::Bn254 => plonk::try_verify_bn254(proof, public_input, vk),
        Curve::Bls12_381 => plonk::try_verify_bls12_381(proof, public_input, vk),
    }
}

pub fn verify_plonk(curve: Curve, proof: &[u8], public_input: &[u8], vk: &[u8]) -> bool {
    to_verdict("plonk", try_verify_plonk(curve, proof, public_input, vk))
}

/// `proof` and `vk` are snarkjs JSON documents, `public_input` a JSON array
/// of decimal strings.
pub fn try_verify_circom_groth16(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    circom::try_verify(proof, public_input, vk)
}

pub fn verify_circom_groth16(proof: &[u8], public_input: &[u8], vk: &[u8]) -> bool {
    to_verdict("circom-groth16", try_verify_circom_groth16(proof, public_input, vk))
}

/// Collapses a typed outcome to the boolean surface.
pub(crate) fn to_verdict(scheme: &str, outcome: Result<bool>) -> bool {
    match outcome {
        Ok(verified) => verified,
        Err(e) if e.is_fault() => {
            error!(scheme, error = %e, "verification aborted");
            false
        }
        Err(e) => {
            debug!(scheme, error = %e, "proof not accepted");
            false
        }
    }
}
