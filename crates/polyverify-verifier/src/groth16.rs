//! arkworks Groth16 verification
//!
//! BLS12-381 Groth16 artifacts, and Circom proofs once decoded from JSON, are
//! checked here. BN254 binary artifacts come from gnark and go through
//! [`crate::gnark`] instead.
//!
//! Artifacts use the arkworks canonical compressed encoding:
//! - proof: `Proof<E>` (128 bytes on BN254, 192 bytes on BLS12-381)
//! - verifying key: `VerifyingKey<E>`
//! - public input: u64 little-endian count followed by compressed scalars.
//!   An empty buffer means the circuit has no public inputs.
//!
//! Curve points are validated (on curve, prime-order subgroup) and trailing
//! bytes are rejected, so artifacts for the other curve or another proving
//! system fail to decode instead of producing a wrong-but-parseable value.

use ark_ec::pairing::Pairing;
use ark_ff::Zero;
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use tracing::debug;

use polyverify_runtime::{Result, VerifierError};

const COUNT_PREFIX_LEN: usize = 8;

fn decode_exact<T: CanonicalDeserialize>(bytes: &[u8]) -> std::result::Result<T, String> {
    let mut reader = bytes;
    let value = T::deserialize_with_mode(&mut reader, Compress::Yes, Validate::Yes)
        .map_err(|e| e.to_string())?;
    if !reader.is_empty() {
        return Err(format!("{} trailing bytes", reader.len()));
    }
    Ok(value)
}

pub fn decode_proof<E: Pairing>(bytes: &[u8]) -> Result<Proof<E>> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    decode_exact(bytes).map_err(VerifierError::malformed_proof)
}

pub fn decode_verifying_key<E: Pairing>(bytes: &[u8]) -> Result<VerifyingKey<E>> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }
    decode_exact(bytes).map_err(VerifierError::malformed_verifying_key)
}

pub fn decode_public_inputs<E: Pairing>(bytes: &[u8]) -> Result<Vec<E::ScalarField>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    if bytes.len() < COUNT_PREFIX_LEN {
        return Err(VerifierError::malformed_public_input("missing element count"));
    }

    let (prefix, body) = bytes.split_at(COUNT_PREFIX_LEN);
    let mut count_bytes = [0u8; COUNT_PREFIX_LEN];
    count_bytes.copy_from_slice(prefix);
    let count = u64::from_le_bytes(count_bytes);

    // The count is checked against the body length before anything is
    // allocated, so a forged prefix cannot request a huge buffer.
    let scalar_len = E::ScalarField::zero().compressed_size();
    if body.len() % scalar_len != 0 || (body.len() / scalar_len) as u64 != count {
        return Err(VerifierError::malformed_public_input(format!(
            "declared {} scalars but found {} bytes",
            count,
            body.len()
        )));
    }

    body.chunks(scalar_len)
        .map(|chunk| {
            decode_exact::<E::ScalarField>(chunk).map_err(VerifierError::malformed_public_input)
        })
        .collect()
}

/// Runs the Groth16 pairing check on decoded artifacts.
pub fn verify_decoded<E: Pairing>(
    proof: &Proof<E>,
    public_inputs: &[E::ScalarField],
    vk: VerifyingKey<E>,
) -> Result<bool> {
    let expected = vk.gamma_abc_g1.len().saturating_sub(1);
    if vk.gamma_abc_g1.is_empty() {
        return Err(VerifierError::malformed_verifying_key("empty gamma_abc_g1"));
    }
    if public_inputs.len() != expected {
        return Err(VerifierError::malformed_public_input(format!(
            "expected {} public inputs, got {}",
            expected,
            public_inputs.len()
        )));
    }

    let pvk = PreparedVerifyingKey::from(vk);
    Groth16::<E>::verify_proof(&pvk, proof, public_inputs)
        .map_err(|e| VerifierError::malformed_verifying_key(e.to_string()))
}

/// Decodes the three artifacts for curve `E` and verifies the proof.
pub fn try_verify<E: Pairing>(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    if proof.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    if vk.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }

    let proof = decode_proof::<E>(proof)?;
    let public_inputs = decode_public_inputs::<E>(public_input)?;
    let vk = decode_verifying_key::<E>(vk)?;

    let verified = verify_decoded(&proof, &public_inputs, vk)?;
    debug!(verified, public_inputs = public_inputs.len(), "groth16 pairing check done");
    Ok(verified)
}
