//! C ABI entry points
//!
//! The gnark-era symbol names are kept so existing callers keep linking:
//! `VerifyGnarkPlonkProofBLS12_381` now verifies dusk-plonk artifacts.
//!
//! Every function takes its buffers as [`ListRef`]s and copies them before
//! decoding. Nothing is retained after return, and no panic unwinds across the
//! boundary: each body runs inside [`barrier::guard`].
//!
//! # Safety
//!
//! For every `ListRef` argument with a non-zero length, `data` must point to
//! `len` readable bytes that stay valid for the duration of the call. A
//! zero-length argument may carry a null pointer.

#![allow(non_snake_case)]

use crate::barrier;
use crate::buffer::ListRef;
use crate::risc_zero::ReceiptEngine;
use crate::sp1::{self, EngineStatus, Sp1Engine};
use crate::{to_verdict, Curve};

fn guarded_bool<F: FnOnce() -> bool>(entry: &str, f: F) -> bool {
    to_verdict(entry, barrier::guard(entry, f))
}

/// # Safety
///
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn VerifyGnarkGroth16ProofBN254(
    proof: ListRef,
    public_input: ListRef,
    verification_key: ListRef,
) -> bool {
    guarded_bool("VerifyGnarkGroth16ProofBN254", || {
        let (proof, public_input, vk) =
            unsafe { (proof.to_vec(), public_input.to_vec(), verification_key.to_vec()) };
        crate::verify_groth16(Curve::Bn254, &proof, &public_input, &vk)
    })
}

/// # Safety
///
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn VerifyGroth16ProofBLS12_381(
    proof: ListRef,
    public_input: ListRef,
    verification_key: ListRef,
) -> bool {
    guarded_bool("VerifyGroth16ProofBLS12_381", || {
        let (proof, public_input, vk) =
            unsafe { (proof.to_vec(), public_input.to_vec(), verification_key.to_vec()) };
        crate::verify_groth16(Curve::Bls12_381, &proof, &public_input, &vk)
    })
}

/// # Safety
///
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn VerifyGnarkPlonkProofBN254(
    proof: ListRef,
    public_input: ListRef,
    verification_key: ListRef,
) -> bool {
    guarded_bool("VerifyGnarkPlonkProofBN254", || {
        let (proof, public_input, vk) =
            unsafe { (proof.to_vec(), public_input.to_vec(), verification_key.to_vec()) };
        crate::verify_plonk(Curve::Bn254, &proof, &public_input, &vk)
    })
}

/// # Safety
///
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn VerifyGnarkPlonkProofBLS12_381(
    proof: ListRef,
    public_input: ListRef,
    verification_key: ListRef,
) -> bool {
    guarded_bool("VerifyGnarkPlonkProofBLS12_381", || {
        let (proof, public_input, vk) =
            unsafe { (proof.to_vec(), public_input.to_vec(), verification_key.to_vec()) };
        crate::verify_plonk(Curve::Bls12_381, &proof, &public_input, &vk)
    })
}

/// # Safety
///
/// See the module documentation.
#[no_mangle]
pub unsafe extern "C" fn VerifyCircomGroth16ProofBN128(
    proof: ListRef,
    public_input: ListRef,
    verification_key: ListRef,
) -> bool {
    guarded_bool("VerifyCircomGroth16ProofBN128", || {
        let (proof, public_input, vk) =
            unsafe { (proof.to_vec(), public_input.to_vec(), verification_key.to_vec()) };
        crate::verify_circom_groth16(&proof, &public_input, &vk)
    })
}

/// Boolean RISC Zero verdict for an arbitrary engine.
///
/// # Safety
///
/// See the module documentation.
pub unsafe fn risc_zero_verdict(
    engine: &dyn ReceiptEngine,
    receipt: ListRef,
    image_id: ListRef,
    public_input: ListRef,
) -> bool {
    guarded_bool("verify_risc_zero_receipt_ffi", || {
        let (receipt, image_id, public_input) =
            unsafe { (receipt.to_vec(), image_id.to_vec(), public_input.to_vec()) };
        crate::verify_risc_zero_receipt(engine, &receipt, &image_id, &public_input)
    })
}

/// SP1 status code for an arbitrary engine: `1` verified, `0` rejected,
/// `-1` fault.
///
/// # Safety
///
/// See the module documentation.
pub unsafe fn sp1_status(
    engine: &dyn Sp1Engine,
    proof: ListRef,
    public_input: ListRef,
    elf: ListRef,
) -> i32 {
    let outcome = barrier::guard("verify_sp1_proof_ffi", || {
        let (proof, public_input, elf) =
            unsafe { (proof.to_vec(), public_input.to_vec(), elf.to_vec()) };
        sp1::verify_sp1_proof(engine, &proof, &public_input, &elf)
    });
    match outcome.and_then(|verdict| verdict) {
        Ok(verified) => EngineStatus::from(verified).code(),
        Err(_) => EngineStatus::Fault.code(),
    }
}

/// # Safety
///
/// See the module documentation.
#[cfg(feature = "risc0")]
#[no_mangle]
pub unsafe extern "C" fn verify_risc_zero_receipt_ffi(
    receipt: ListRef,
    image_id: ListRef,
    public_input: ListRef,
) -> bool {
    unsafe { risc_zero_verdict(&crate::risc_zero::RiscZeroEngine, receipt, image_id, public_input) }
}

/// # Safety
///
/// See the module documentation.
#[cfg(feature = "sp1")]
#[no_mangle]
pub unsafe extern "C" fn verify_sp1_proof_ffi(
    proof: ListRef,
    public_input: ListRef,
    elf: ListRef,
) -> i32 {
    unsafe { sp1_status(&sp1::Sp1ProverEngine, proof, public_input, elf) }
}
