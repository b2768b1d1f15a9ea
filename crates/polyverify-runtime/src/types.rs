//! Core types for polyverify
//!
//! This module defines the closed set of proving systems the adapter can verify,
//! the curves they run on, and the request record handed to the dispatcher.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VerifierError;

/// Pairing-friendly curve a proving system is instantiated over
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Curve {
    #[serde(rename = "bn254")]
    Bn254,
    #[serde(rename = "bls12-381")]
    Bls12_381,
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Bn254 => write!(f, "bn254"),
            Curve::Bls12_381 => write!(f, "bls12-381"),
        }
    }
}

/// Identifier of a supported proving system
///
/// Discriminants are stable: they are used as a one-byte tag by callers that
/// commit to the proving system alongside the verification key or program.
///
/// # Examples
///
/// ```
/// use polyverify_runtime::{Curve, ProvingSystemId};
///
/// let id: ProvingSystemId = "plonk-bls12-381".parse().unwrap();
/// assert_eq!(id, ProvingSystemId::PlonkBls12_381);
/// assert_eq!(id.curve(), Some(Curve::Bls12_381));
/// assert_eq!(id.to_string(), "plonk-bls12-381");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProvingSystemId {
    #[serde(rename = "plonk-bls12-381")]
    PlonkBls12_381 = 0,
    #[serde(rename = "plonk-bn254")]
    PlonkBn254 = 1,
    #[serde(rename = "groth16-bn254")]
    Groth16Bn254 = 2,
    #[serde(rename = "sp1")]
    SP1 = 3,
    #[serde(rename = "risc0")]
    Risc0 = 4,
    #[serde(rename = "circom-groth16-bn128")]
    CircomGroth16Bn128 = 5,
    #[serde(rename = "groth16-bls12-381")]
    Groth16Bls12_381 = 6,
}

impl ProvingSystemId {
    pub const ALL: [ProvingSystemId; 7] = [
        ProvingSystemId::Groth16Bn254,
        ProvingSystemId::Groth16Bls12_381,
        ProvingSystemId::PlonkBn254,
        ProvingSystemId::PlonkBls12_381,
        ProvingSystemId::CircomGroth16Bn128,
        ProvingSystemId::Risc0,
        ProvingSystemId::SP1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProvingSystemId::PlonkBls12_381 => "plonk-bls12-381",
            ProvingSystemId::PlonkBn254 => "plonk-bn254",
            ProvingSystemId::Groth16Bn254 => "groth16-bn254",
            ProvingSystemId::SP1 => "sp1",
            ProvingSystemId::Risc0 => "risc0",
            ProvingSystemId::CircomGroth16Bn128 => "circom-groth16-bn128",
            ProvingSystemId::Groth16Bls12_381 => "groth16-bls12-381",
        }
    }

    pub fn from_u8(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| *id as u8 == tag)
    }

    /// Curve of the pairing check, `None` for zkVM receipts verified by an external engine
    pub fn curve(&self) -> Option<Curve> {
        match self {
            ProvingSystemId::Groth16Bn254
            | ProvingSystemId::PlonkBn254
            | ProvingSystemId::CircomGroth16Bn128 => Some(Curve::Bn254),
            ProvingSystemId::Groth16Bls12_381 | ProvingSystemId::PlonkBls12_381 => {
                Some(Curve::Bls12_381)
            }
            ProvingSystemId::Risc0 | ProvingSystemId::SP1 => None,
        }
    }

    /// zkVM systems take a program (image id or ELF) instead of a verifying key
    pub fn is_zkvm(&self) -> bool {
        matches!(self, ProvingSystemId::Risc0 | ProvingSystemId::SP1)
    }
}

impl fmt::Display for ProvingSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProvingSystemId {
    type Err = VerifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|id| id.as_str() == needle).ok_or_else(|| {
            VerifierError::invalid_config(format!("unknown proving system '{}'", s))
        })
    }
}

/// A single verification request
///
/// `verification_key` carries the verifying key of pairing-based systems.
/// `vm_program_code` carries the program of zkVM systems: the image id for
/// RISC Zero and the ELF for SP1.
///
/// # Examples
///
/// ```
/// use polyverify_runtime::{ProvingSystemId, VerificationData};
///
/// let data = VerificationData::new(ProvingSystemId::SP1, vec![1, 2, 3])
///     .with_program(vec![0x7f, b'E', b'L', b'F']);
/// assert!(data.pub_input.is_none());
/// assert_eq!(data.program(), &[0x7f, b'E', b'L', b'F']);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationData {
    pub proving_system: ProvingSystemId,
    pub proof: Vec<u8>,
    #[serde(default)]
    pub pub_input: Option<Vec<u8>>,
    #[serde(default)]
    pub verification_key: Option<Vec<u8>>,
    #[serde(default)]
    pub vm_program_code: Option<Vec<u8>>,
}

impl VerificationData {
    pub fn new(proving_system: ProvingSystemId, proof: Vec<u8>) -> Self {
        Self {
            proving_system,
            proof,
            pub_input: None,
            verification_key: None,
            vm_program_code: None,
        }
    }

    pub fn with_public_input(mut self, pub_input: Vec<u8>) -> Self {
        self.pub_input = Some(pub_input);
        self
    }

    pub fn with_verification_key(mut self, verification_key: Vec<u8>) -> Self {
        self.verification_key = Some(verification_key);
        self
    }

    pub fn with_program(mut self, vm_program_code: Vec<u8>) -> Self {
        self.vm_program_code = Some(vm_program_code);
        self
    }

    /// Public input bytes, empty when absent
    pub fn public_input(&self) -> &[u8] {
        self.pub_input.as_deref().unwrap_or_default()
    }

    pub fn verifying_key(&self) -> &[u8] {
        self.verification_key.as_deref().unwrap_or_default()
    }

    pub fn program(&self) -> &[u8] {
        self.vm_program_code.as_deref().unwrap_or_default()
    }
}
