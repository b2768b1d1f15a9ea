//! PLONK verification over BN254 and BLS12-381
//!
//! BN254 proofs and verifying keys are gnark artifacts and are handled by
//! [`crate::gnark`], with a gnark public witness as public input.
//!
//! BLS12-381 proofs and verifying keys are dusk-plonk `Proof` and `Verifier`
//! bytes. Public inputs are concatenated 32-byte little-endian scalars, and an
//! empty buffer means "no public inputs".

use dusk_bytes::Serializable;
use dusk_plonk::prelude::{BlsScalar, Proof, Verifier};
use tracing::debug;

use crate::{barrier, gnark};
use polyverify_runtime::{Result, VerifierError};

const SCALAR_LEN: usize = 32;

/// Verifies a gnark PLONK proof over BN254.
pub fn try_verify_bn254(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    gnark::try_verify_plonk(proof, public_input, vk)
}

fn bls_from_le_bytes_strict(chunk: &[u8]) -> Result<BlsScalar> {
    let mut bytes = [0u8; SCALAR_LEN];
    bytes.copy_from_slice(chunk);
    let scalar = Option::<BlsScalar>::from(BlsScalar::from_bytes(&bytes))
        .ok_or_else(|| VerifierError::malformed_public_input("bls12-381 scalar not canonical"))?;
    if scalar.to_bytes() != bytes {
        return Err(VerifierError::malformed_public_input("bls12-381 scalar not canonical"));
    }
    Ok(scalar)
}

pub fn decode_bls12_381_public_inputs(bytes: &[u8]) -> Result<Vec<BlsScalar>> {
    if bytes.len() % SCALAR_LEN != 0 {
        return Err(VerifierError::malformed_public_input(format!(
            "length {} is not a multiple of {}",
            bytes.len(),
            SCALAR_LEN
        )));
    }
    bytes.chunks(SCALAR_LEN).map(bls_from_le_bytes_strict).collect()
}

pub fn decode_bls12_381_proof(bytes: &[u8]) -> Result<Proof> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    let array: [u8; Proof::SIZE] = bytes.try_into().map_err(|_| {
        VerifierError::malformed_proof(format!(
            "expected {} bytes, got {}",
            Proof::SIZE,
            bytes.len()
        ))
    })?;
    Proof::from_bytes(&array).map_err(|e| VerifierError::malformed_proof(format!("{:?}", e)))
}

pub fn decode_bls12_381_verifier(bytes: &[u8]) -> Result<Verifier> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }
    Verifier::try_from_bytes(bytes)
        .map_err(|e| VerifierError::malformed_verifying_key(format!("{:?}", e)))
}

/// Verifies a dusk-plonk proof over BLS12-381.
pub fn try_verify_bls12_381(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    if proof.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    if vk.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }

    let proof = decode_bls12_381_proof(proof)?;
    let public_inputs = decode_bls12_381_public_inputs(public_input)?;
    let verifier = decode_bls12_381_verifier(vk)?;

    let outcome = barrier::guard("plonk-bls12-381", || verifier.verify(&proof, &public_inputs))?;
    match outcome {
        Ok(()) => Ok(true),
        Err(e) => {
            debug!(error = ?e, "plonk bls12-381 proof rejected");
            Ok(false)
        }
    }
}
