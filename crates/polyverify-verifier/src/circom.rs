//! Circom Groth16 proofs in snarkjs JSON form
//!
//! snarkjs writes BN128 (= BN254) points as projective decimal triples with
//! `z = 1`, or `z = 0` for the point at infinity. G2 coordinates are
//! `[c0, c1]` pairs. Public signals are a JSON array of decimal strings.

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ff::{One, PrimeField, Zero};
use ark_groth16::{Proof, VerifyingKey};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::groth16;
use polyverify_runtime::{Result, VerifierError};

const PROTOCOL: &str = "groth16";
const CURVES: [&str; 2] = ["bn128", "bn254"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsVerifyingKey {
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    #[serde(rename = "nPublic")]
    pub n_public: usize,
    pub vk_alpha_1: Vec<String>,
    pub vk_beta_2: Vec<Vec<String>>,
    pub vk_gamma_2: Vec<Vec<String>>,
    pub vk_delta_2: Vec<Vec<String>>,
    #[serde(rename = "IC")]
    pub ic: Vec<Vec<String>>,
}

impl SnarkjsProof {
    pub fn from_ark(proof: &Proof<Bn254>) -> Self {
        SnarkjsProof {
            pi_a: render_g1(&proof.a),
            pi_b: render_g2(&proof.b),
            pi_c: render_g1(&proof.c),
            protocol: Some(PROTOCOL.to_string()),
            curve: Some(CURVES[0].to_string()),
        }
    }

    pub fn to_ark(&self) -> std::result::Result<Proof<Bn254>, String> {
        check_header(self.protocol.as_deref(), self.curve.as_deref())?;
        Ok(Proof {
            a: parse_g1(&self.pi_a).map_err(|e| format!("pi_a: {}", e))?,
            b: parse_g2(&self.pi_b).map_err(|e| format!("pi_b: {}", e))?,
            c: parse_g1(&self.pi_c).map_err(|e| format!("pi_c: {}", e))?,
        })
    }
}

impl SnarkjsVerifyingKey {
    pub fn from_ark(vk: &VerifyingKey<Bn254>) -> Self {
        SnarkjsVerifyingKey {
            protocol: PROTOCOL.to_string(),
            curve: Some(CURVES[0].to_string()),
            n_public: vk.gamma_abc_g1.len().saturating_sub(1),
            vk_alpha_1: render_g1(&vk.alpha_g1),
            vk_beta_2: render_g2(&vk.beta_g2),
            vk_gamma_2: render_g2(&vk.gamma_g2),
            vk_delta_2: render_g2(&vk.delta_g2),
            ic: vk.gamma_abc_g1.iter().map(render_g1).collect(),
        }
    }

    pub fn to_ark(&self) -> std::result::Result<VerifyingKey<Bn254>, String> {
        check_header(Some(&self.protocol), self.curve.as_deref())?;
        if self.ic.len() != self.n_public + 1 {
            return Err(format!(
                "nPublic is {} but IC holds {} points",
                self.n_public,
                self.ic.len()
            ));
        }
        let gamma_abc_g1 = self
            .ic
            .iter()
            .enumerate()
            .map(|(i, p)| parse_g1(p).map_err(|e| format!("IC[{}]: {}", i, e)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(VerifyingKey {
            alpha_g1: parse_g1(&self.vk_alpha_1).map_err(|e| format!("vk_alpha_1: {}", e))?,
            beta_g2: parse_g2(&self.vk_beta_2).map_err(|e| format!("vk_beta_2: {}", e))?,
            gamma_g2: parse_g2(&self.vk_gamma_2).map_err(|e| format!("vk_gamma_2: {}", e))?,
            delta_g2: parse_g2(&self.vk_delta_2).map_err(|e| format!("vk_delta_2: {}", e))?,
            gamma_abc_g1,
        })
    }
}

fn check_header(protocol: Option<&str>, curve: Option<&str>) -> std::result::Result<(), String> {
    if let Some(protocol) = protocol {
        if protocol != PROTOCOL {
            return Err(format!("unsupported protocol {:?}", protocol));
        }
    }
    if let Some(curve) = curve {
        if !CURVES.contains(&curve.to_ascii_lowercase().as_str()) {
            return Err(format!("unsupported curve {:?}", curve));
        }
    }
    Ok(())
}

fn parse_decimal<F: PrimeField>(s: &str) -> std::result::Result<F, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{:?} is not a decimal integer", s));
    }
    let value = BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| format!("{:?} is not a decimal integer", s))?;
    let modulus: BigUint = F::MODULUS.into();
    if value >= modulus {
        return Err(format!("{} is not below the field modulus", s));
    }
    Ok(F::from(value))
}

fn parse_g1(coords: &[String]) -> std::result::Result<G1Affine, String> {
    let [x, y, z] = coords else {
        return Err(format!("expected 3 coordinates, got {}", coords.len()));
    };
    let (x, y, z) = (parse_decimal::<Fq>(x)?, parse_decimal::<Fq>(y)?, parse_decimal::<Fq>(z)?);
    if z.is_zero() {
        return Ok(G1Affine::identity());
    }
    if !z.is_one() {
        return Err("point is not normalized (z must be 0 or 1)".to_string());
    }
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err("point is not on the curve".to_string());
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err("point is not in the prime-order subgroup".to_string());
    }
    Ok(point)
}

fn parse_fq2(pair: &[String]) -> std::result::Result<Fq2, String> {
    let [c0, c1] = pair else {
        return Err(format!("expected 2 limbs, got {}", pair.len()));
    };
    Ok(Fq2::new(parse_decimal(c0)?, parse_decimal(c1)?))
}

fn parse_g2(coords: &[Vec<String>]) -> std::result::Result<G2Affine, String> {
    let [x, y, z] = coords else {
        return Err(format!("expected 3 coordinates, got {}", coords.len()));
    };
    let (x, y, z) = (parse_fq2(x)?, parse_fq2(y)?, parse_fq2(z)?);
    if z.is_zero() {
        return Ok(G2Affine::identity());
    }
    if !z.is_one() {
        return Err("point is not normalized (z must be 0 or 1)".to_string());
    }
    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err("point is not on the curve".to_string());
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err("point is not in the prime-order subgroup".to_string());
    }
    Ok(point)
}

fn decimal<F: PrimeField>(f: &F) -> String {
    let value: BigUint = f.into_bigint().into();
    value.to_string()
}

fn render_g1(p: &G1Affine) -> Vec<String> {
    if p.infinity {
        return vec!["0".into(), "1".into(), "0".into()];
    }
    vec![decimal(&p.x), decimal(&p.y), "1".into()]
}

fn render_g2(p: &G2Affine) -> Vec<Vec<String>> {
    if p.infinity {
        return vec![
            vec!["0".into(), "0".into()],
            vec!["1".into(), "0".into()],
            vec!["0".into(), "0".into()],
        ];
    }
    vec![
        vec![decimal(&p.x.c0), decimal(&p.x.c1)],
        vec![decimal(&p.y.c0), decimal(&p.y.c1)],
        vec!["1".into(), "0".into()],
    ]
}

/// Renders field elements as snarkjs `public.json` content.
pub fn render_public_signals(signals: &[Fr]) -> Vec<String> {
    signals.iter().map(decimal).collect()
}

pub fn parse_public_signals(bytes: &[u8]) -> Result<Vec<Fr>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let signals: Vec<String> = serde_json::from_slice(bytes)
        .map_err(|e| VerifierError::malformed_public_input(e.to_string()))?;
    signals
        .iter()
        .map(|s| parse_decimal::<Fr>(s).map_err(VerifierError::malformed_public_input))
        .collect()
}

pub fn parse_proof(bytes: &[u8]) -> Result<Proof<Bn254>> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    let proof: SnarkjsProof =
        serde_json::from_slice(bytes).map_err(|e| VerifierError::malformed_proof(e.to_string()))?;
    proof.to_ark().map_err(VerifierError::malformed_proof)
}

pub fn parse_verifying_key(bytes: &[u8]) -> Result<VerifyingKey<Bn254>> {
    if bytes.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }
    let vk: SnarkjsVerifyingKey = serde_json::from_slice(bytes)
        .map_err(|e| VerifierError::malformed_verifying_key(e.to_string()))?;
    vk.to_ark().map_err(VerifierError::malformed_verifying_key)
}

/// Verifies a snarkjs Groth16 proof over BN128.
pub fn try_verify(proof: &[u8], public_input: &[u8], vk: &[u8]) -> Result<bool> {
    if proof.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("proof"));
    }
    if vk.is_empty() {
        return Err(VerifierError::EmptyRequiredInput("verifying key"));
    }

    let proof = parse_proof(proof)?;
    let signals = parse_public_signals(public_input)?;
    let vk = parse_verifying_key(vk)?;

    let verified = groth16::verify_decoded(&proof, &signals, vk)?;
    debug!(verified, public_signals = signals.len(), "circom groth16 check done");
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_decimal_rejects_non_digits() {
        assert!(parse_decimal::<Fr>("-1").is_err());
        assert!(parse_decimal::<Fr>("0x10").is_err());
        assert!(parse_decimal::<Fr>("").is_err());
        assert!(parse_decimal::<Fr>(" 1").is_err());
    }

    #[test]
    fn test_parse_decimal_rejects_modulus() {
        let modulus = BigUint::from(Fr::MODULUS).to_string();
        assert!(parse_decimal::<Fr>(&modulus).is_err());
    }

    #[test]
    fn test_parse_decimal_accepts_largest_element() {
        let max = BigUint::from(Fr::MODULUS) - 1u32;
        let value = parse_decimal::<Fr>(&max.to_string()).unwrap();
        assert_eq!(value, -Fr::one());
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(decimal(&Fr::from(12345u64)), "12345");
        assert_eq!(decimal(&Fq::zero()), "0");
        let max = BigUint::from(Fr::MODULUS) - 1u32;
        assert_eq!(decimal(&-Fr::one()), max.to_string());
    }

    #[test]
    fn test_generator_round_trips_through_json_form() {
        let g = G1Affine::generator();
        assert_eq!(parse_g1(&render_g1(&g)).unwrap(), g);
        let h = G2Affine::generator();
        assert_eq!(parse_g2(&render_g2(&h)).unwrap(), h);
    }

    #[test]
    fn test_infinity_round_trips() {
        let zero = G1Affine::identity();
        assert_eq!(parse_g1(&render_g1(&zero)).unwrap(), zero);
    }

    #[test]
    fn test_off_curve_point_rejected() {
        let result = parse_g1(&strings(&["1", "3", "1"]));
        assert!(result.unwrap_err().contains("not on the curve"));
    }

    #[test]
    fn test_unnormalized_point_rejected() {
        let result = parse_g1(&strings(&["1", "2", "2"]));
        assert!(result.unwrap_err().contains("not normalized"));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert!(parse_g1(&strings(&["1", "2"])).is_err());
        assert!(parse_fq2(&strings(&["1"])).is_err());
    }

    #[test]
    fn test_public_signals_empty_buffer() {
        assert!(parse_public_signals(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_public_signals_values() {
        let signals = parse_public_signals(br#"["33", "0"]"#).unwrap();
        assert_eq!(signals, vec![Fr::from(33u64), Fr::zero()]);
    }

    #[test]
    fn test_public_signals_must_be_strings() {
        let result = parse_public_signals(b"[33]");
        assert!(matches!(result, Err(VerifierError::MalformedPublicInput(_))));
    }

    #[test]
    fn test_wrong_protocol_rejected() {
        assert!(check_header(Some("plonk"), None).is_err());
        assert!(check_header(Some("groth16"), Some("bls12381")).is_err());
        assert!(check_header(Some("groth16"), Some("BN128")).is_ok());
        assert!(check_header(None, None).is_ok());
    }

    #[test]
    fn test_empty_proof() {
        let result = try_verify(&[], b"[]", b"{}");
        assert!(matches!(result, Err(VerifierError::EmptyRequiredInput("proof"))));
    }

    #[test]
    fn test_proof_not_json() {
        let result = parse_proof(b"\x00\x01binary");
        assert!(matches!(result, Err(VerifierError::MalformedProof(_))));
    }
}
