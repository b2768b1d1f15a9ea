//! gnark artifacts over BN254
//!
//! Groth16 and PLONK proofs and verifying keys produced by gnark's `WriteTo`
//! are checked by `gnark-bn254-verifier`. Public inputs for both schemes are
//! a gnark public witness:
//!
//! ```text
//! u32 BE nbPublic | u32 BE nbSecret (0) | u32 BE len (= nbPublic) | len x 32-byte BE scalars
//! ```
//!
//! The backend indexes its buffers directly and unwraps its point decoders,
//! so every artifact is walked here first. A buffer that is too short for the
//! lengths it declares never reaches the backend, and a panic raised while it
//! decodes points is reported as malformed input.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use gnark_bn254_verifier::ProvingSystem;
use tracing::debug;

use crate::barrier;
use polyverify_runtime::{Result, VerifierError};

const SCALAR_LEN: usize = 32;
const G1_COMPRESSED_LEN: usize = 32;
const G1_UNCOMPRESSED_LEN: usize = 64;
const G2_COMPRESSED_LEN: usize = 64;
const WITNESS_HEADER_LEN: usize = 12;

/// Ar, Bs, Krs.
const GROTH16_PROOF_POINTS_LEN: usize = 2 * G1_COMPRESSED_LEN + G2_COMPRESSED_LEN;
/// alpha, beta (G1 and G2), gamma, delta (G1 and G2).
const GROTH16_VK_HEADER_LEN: usize = 3 * G1_COMPRESSED_LEN + 3 * G2_COMPRESSED_LEN;

/// Eight G1 commitments (LRO, Z, H, batched opening).
const PLONK_PROOF_HEADER_LEN: usize = 8 * G1_UNCOMPRESSED_LEN;
/// size, size_inv, generator, nb_public, coset_shift, S and Q commitments.
const PLONK_VK_HEADER_LEN: usize = 8 + 32 + 32 + 8 + 32 + 8 * G1_COMPRESSED_LEN;
/// KZG G1 and two G2 points, then the precomputed lines the backend skips.
const PLONK_VK_KZG_LEN: usize = G1_COMPRESSED_LEN + 2 * G2_COMPRESSED_LEN + 33788;

/// Bounds-checked reader over an artifact.
struct Walk<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Walk<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn skip(&mut self, len: usize) -> std::result::Result<(), String> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                format!("needs {} bytes at offset {}, has {}", len, self.offset, self.bytes.len())
            })?;
        self.offset = end;
        Ok(())
    }

    fn skip_items(&mut self, count: usize, item_len: usize) -> std::result::Result<(), String> {
        let len = count
            .checked_mul(item_len)
            .ok_or_else(|| format!("{} items overflow the buffer", count))?;
        self.skip(len)
    }

    fn u32(&mut self) -> std::result::Result<u32, String> {
        let start = self.offset;
        self.skip(4)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[start..start + 4]);
        Ok(u32::from_be_bytes(word))
    }

    fn u64(&mut self) -> std::result::Result<u64, String> {
        let start = self.offset;
        self.skip(8)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.bytes[start..start + 8]);
        Ok(u64::from_be_bytes(word))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}

fn count(value: u64) -> std::result::Result<usize, String> {
    usize::try_from(value).map_err(|_| format!("count {} does not fit in memory", value))
}

fn read_u32_be(bytes: &[u8], off: usize) -> u32 {
    u32::from_be_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]])
}

fn fr_from_be_bytes_strict(bytes: &[u8]) -> Result<Fr> {
    let fr = Fr::from_be_bytes_mod_order(bytes);
    if fr.into_bigint().to_bytes_be() != bytes {
        return Err(VerifierError::malformed_public_input("bn254 scalar not canonical"));
    }
    Ok(fr)
}

/// Decodes a gnark public witness over the BN254 scalar field.
///
/// An empty buffer means no public inputs.
pub fn decode_public_witness(bytes: &[u8]) -> Result<Vec<Fr>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    if bytes.len() < WITNESS_HEADER_LEN {
        return Err(VerifierError::malformed_public_input("witness header truncated"));
    }

    let nb_public = read_u32_be(bytes, 0) as usize;
    let nb_secret = read_u32_be(bytes, 4);
    let len = read_u32_be(bytes, 8) as usize;
    if nb_secret != 0 {
        return Err(VerifierError::malformed_public_input(format!(
            "public witness carries {} secret values",
            nb_secret
        )));
    }
    if len != nb_public {
        return Err(VerifierError::malformed_public_input(format!(
            "witness declares {} public values but holds {}",
            nb_public, len
        )));
    }

    let body = &bytes[WITNESS_HEADER_LEN..];
    if body.len() % SCALAR_LEN != 0 || body.len() / SCALAR_LEN != len {
        return Err(VerifierError::malformed_public_input(format!(
            "expected {} scalars, found {} bytes",
            len,
            body.len()
        )));
    }

    body.chunks(SCALAR_LEN).map(fr_from_be_bytes_strict).collect()
}

/// Checks the layout of a gnark Groth16 proof: Ar, Bs, Krs, then an
/// optional commitment list and its proof of knowledge.
fn check_groth16_proof(bytes: &[u8]) -> std::result::Result<(), String> {
    let mut walk = Walk::new(bytes);
    walk.skip(GROTH16_PROOF_POINTS_LEN)?;
    if walk.remaining() == 0 {
        return Ok(());
    }
    let commitments = walk.u32()? as usize;
    if commitments != 0 {
        return Err(format!("{} commitments are not supported", commitments));
    }
    walk.skip(G1_COMPRESSED_LEN)?;
    if walk.remaining() != 0 {
        return Err(format!("{} trailing bytes", walk.remaining()));
    }
    Ok(())
}

/// Checks the layout of a gnark Groth16 verifying key and returns the
/// number of public inputs it expects.
fn check_groth16_vk(bytes: &[u8]) -> std::result::Result<usize, String> {
    let mut walk = Walk::new(bytes);
    walk.skip(GROTH16_VK_HEADER_LEN)?;
    let k = walk.u32()? as usize;
    if k == 0 {
        return Err("verifying key has no K points".to_string());
    }
    walk.skip_items(k, G1_COMPRESSED_LEN)?;
    let committed = walk.u32()?;
    for _ in 0..committed {
        let indexes = walk.u32()? as usize;
        walk.skip_items(indexes, 4)?;
    }
    walk.skip(2 * G2_COMPRESSED_LEN)?;
    Ok(k - 1)
}

fn check_plonk_proof(bytes: &[u8]) -> std::result::Result<(), String> {
    let mut walk = Walk::new(bytes);
    walk.skip(PLONK_PROOF_HEADER_LEN)?;
    let claimed = walk.u32()? as usize;
    walk.skip_items(claimed, SCALAR_LEN)?;
    walk.skip(G1_UNCOMPRESSED_LEN + SCALAR_LEN)?;
    let bsb22 = walk.u32()? as usize;
    walk.skip_items(bsb22, G1_UNCOMPRESSED_LEN)
}

fn check_plonk_vk(bytes: &[u8]) -> std::result::Result<(), String> {
    let mut walk = Walk::new(bytes);
    walk.skip(PLONK_VK_HEADER_LEN)?;
    let qcp = walk.u32()? as usize;
    walk.skip_items(qcp, G1_COMPRESSED_LEN)?;
    walk.skip(PLONK_VK_KZG_LEN)?;
    let indexes = count(walk.u64()?)?;
    walk.skip_items(indexes, 8)
}

fn required(proof: &[u8], vk: &[u8]) -> Result<()> {
    if proof.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    if vk.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }
    Ok(())
}

/// Hands checked artifacts to the backend.
fn run_backend(
    label: &str,
    proof: &[u8],
    vk: &[u8],
    inputs: &[Fr],
    system: ProvingSystem,
) -> Result<bool> {
    let verified = barrier::catch(|| gnark_bn254_verifier::verify(proof, vk, inputs, system))
        .map_err(|reason| {
            debug!(scheme = label, %reason, "gnark backend could not decode artifacts");
            VerifierError::malformed_proof(format!(
                "{} artifacts could not be decoded: {}",
                label, reason
            ))
        })?;
    debug!(scheme = label, verified, public_inputs = inputs.len(), "gnark check done");
    Ok(verified)
}

/// Verifies a gnark Groth16 proof over BN254.
pub fn try_verify_groth16(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    required(proof, vk)?;
    check_groth16_proof(proof).map_err(VerifierError::malformed_proof)?;
    let expected = check_groth16_vk(vk).map_err(VerifierError::malformed_verifying_key)?;
    let inputs = decode_public_witness(public_input)?;
    if inputs.len() != expected {
        return Err(VerifierError::malformed_public_input(format!(
            "expected {} public inputs, got {}",
            expected,
            inputs.len()
        )));
    }
    run_backend("groth16-bn254", proof, vk, &inputs, ProvingSystem::Groth16)
}

/// Verifies a gnark PLONK proof over BN254.
pub fn try_verify_plonk(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    required(proof, vk)?;
    check_plonk_proof(proof).map_err(VerifierError::malformed_proof)?;
    check_plonk_vk(vk).map_err(VerifierError::malformed_verifying_key)?;
    let inputs = decode_public_witness(public_input)?;
    run_backend("plonk-bn254", proof, vk, &inputs, ProvingSystem::Plonk)
}
