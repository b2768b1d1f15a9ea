//! Shared fixtures: real Groth16 proofs produced in-test with arkworks
#![allow(dead_code)]

use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, Field, PrimeField};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_relations::lc;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError, Variable};
use ark_serialize::CanonicalSerialize;
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use ark_std::rand::{rngs::StdRng, SeedableRng};

/// Proves knowledge of a non-zero `x` (via its inverse). No public inputs.
#[derive(Clone, Copy)]
pub struct NonZeroCircuit<F: PrimeField> {
    pub x: Option<F>,
}

impl<F: PrimeField> ConstraintSynthesizer<F> for NonZeroCircuit<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let x = cs.new_witness_variable(|| self.x.ok_or(SynthesisError::AssignmentMissing))?;
        let inv = cs.new_witness_variable(|| {
            self.x.and_then(|x| x.inverse()).ok_or(SynthesisError::AssignmentMissing)
        })?;
        cs.enforce_constraint(lc!() + x, lc!() + inv, lc!() + Variable::One)?;
        Ok(())
    }
}

/// Proves knowledge of `x` with `x * x = y`, `y` public.
#[derive(Clone, Copy)]
pub struct SquareCircuit<F: PrimeField> {
    pub x: Option<F>,
    pub y: Option<F>,
}

impl<F: PrimeField> ConstraintSynthesizer<F> for SquareCircuit<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let y = cs.new_input_variable(|| self.y.ok_or(SynthesisError::AssignmentMissing))?;
        let x = cs.new_witness_variable(|| self.x.ok_or(SynthesisError::AssignmentMissing))?;
        cs.enforce_constraint(lc!() + x, lc!() + x, lc!() + y)?;
        Ok(())
    }
}

pub struct Groth16Fixture<E: Pairing> {
    pub proof: Proof<E>,
    pub vk: VerifyingKey<E>,
    pub inputs: Vec<E::ScalarField>,
}

impl<E: Pairing> Groth16Fixture<E> {
    pub fn proof_bytes(&self) -> Vec<u8> {
        compressed(&self.proof)
    }

    pub fn vk_bytes(&self) -> Vec<u8> {
        compressed(&self.vk)
    }

    /// Empty when the circuit has no public inputs.
    pub fn public_input_bytes(&self) -> Vec<u8> {
        if self.inputs.is_empty() {
            return Vec::new();
        }
        encode_public_inputs::<E>(&self.inputs)
    }
}

/// The same proofs in gnark's `WriteTo` form, as a gnark prover would
/// write `.proof`, `.vk` and `.pub` files.
impl Groth16Fixture<Bn254> {
    /// Ar, Bs, Krs, an empty commitment list and the identity as its proof
    /// of knowledge.
    pub fn gnark_proof_bytes(&self) -> Vec<u8> {
        let mut out = gnark_g1(&self.proof.a);
        out.extend(gnark_g2(&self.proof.b));
        out.extend(gnark_g1(&self.proof.c));
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend(gnark_g1(&G1Affine::identity()));
        out
    }

    /// gnark keys also carry beta and delta in G1, which the pairing check
    /// does not read, and a Pedersen commitment key. The generators stand in
    /// for both.
    pub fn gnark_vk_bytes(&self) -> Vec<u8> {
        let mut out = gnark_g1(&self.vk.alpha_g1);
        out.extend(gnark_g1(&G1Affine::generator()));
        out.extend(gnark_g2(&self.vk.beta_g2));
        out.extend(gnark_g2(&self.vk.gamma_g2));
        out.extend(gnark_g1(&G1Affine::generator()));
        out.extend(gnark_g2(&self.vk.delta_g2));
        out.extend_from_slice(&(self.vk.gamma_abc_g1.len() as u32).to_be_bytes());
        for point in &self.vk.gamma_abc_g1 {
            out.extend(gnark_g1(point));
        }
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend(gnark_g2(&G2Affine::generator()));
        out.extend(gnark_g2(&G2Affine::generator()));
        out
    }

    pub fn gnark_public_witness(&self) -> Vec<u8> {
        gnark_public_witness(&self.inputs)
    }
}

/// nbPublic, nbSecret = 0, vector length, then big-endian scalars.
pub fn gnark_public_witness(inputs: &[Fr]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(inputs.len() as u32).to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&(inputs.len() as u32).to_be_bytes());
    for input in inputs {
        out.extend(input.into_bigint().to_bytes_be());
    }
    out
}

/// gnark compresses a point as its big-endian x with two flag bits on top:
/// `10` smallest y, `11` largest y, `01` infinity. arkworks stores the same x
/// little-endian with `00`, `10` and `01` in its last byte.
fn gnark_from_ark_compressed(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.reverse();
    let flags = bytes[0] & 0b1100_0000;
    let gnark_flags = match flags {
        0b0100_0000 => 0b0100_0000,
        0b1000_0000 => 0b1100_0000,
        _ => 0b1000_0000,
    };
    bytes[0] = (bytes[0] & 0b0011_1111) | gnark_flags;
    bytes
}

fn gnark_g1(point: &G1Affine) -> Vec<u8> {
    gnark_from_ark_compressed(compressed(point))
}

fn gnark_g2(point: &G2Affine) -> Vec<u8> {
    gnark_from_ark_compressed(compressed(point))
}

pub fn compressed<T: CanonicalSerialize>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.serialize_compressed(&mut out).expect("serialization into a Vec cannot fail");
    out
}

/// u64 little-endian count followed by compressed scalars.
pub fn encode_public_inputs<E: Pairing>(inputs: &[E::ScalarField]) -> Vec<u8> {
    compressed(&inputs.to_vec())
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn setup<E: Pairing, C: ConstraintSynthesizer<E::ScalarField>>(
    circuit: C,
    seed: u64,
) -> (ProvingKey<E>, VerifyingKey<E>) {
    Groth16::<E>::setup(circuit, &mut rng(seed)).expect("groth16 setup")
}

/// Circuit "x != 0" proved with x = 5.
pub fn non_zero_fixture<E: Pairing>() -> Groth16Fixture<E> {
    let x = E::ScalarField::from(5u64);
    let (pk, vk) = setup::<E, _>(NonZeroCircuit { x: None }, 1);
    let proof = Groth16::<E>::prove(&pk, NonZeroCircuit { x: Some(x) }, &mut rng(2))
        .expect("groth16 prove");
    Groth16Fixture { proof, vk, inputs: Vec::new() }
}

/// Circuit "x * x = y" proved with x = 3, y = 9.
pub fn square_fixture<E: Pairing>() -> Groth16Fixture<E> {
    let x = E::ScalarField::from(3u64);
    let y = x.square();
    let (pk, vk) = setup::<E, _>(SquareCircuit { x: None, y: None }, 3);
    let proof = Groth16::<E>::prove(&pk, SquareCircuit { x: Some(x), y: Some(y) }, &mut rng(4))
        .expect("groth16 prove");
    Groth16Fixture { proof, vk, inputs: vec![y] }
}
