//! RISC Zero receipt verification
//!
//! The receipt check itself belongs to an external engine. This module owns
//! the adapter contract around it: empty receipts and image ids never reach
//! the engine, an empty public input is forwarded as an explicit zero-length
//! buffer, and a panicking engine is contained.

use tracing::debug;

use crate::barrier;
use polyverify_runtime::Result;

/// External verifier for RISC Zero receipts.
pub trait ReceiptEngine: Send + Sync {
    /// Returns whether `receipt` proves execution of `image_id` with a
    /// journal equal to `public_input`.
    fn verify_receipt(&self, receipt: &[u8], image_id: &[u8], public_input: &[u8]) -> bool;
}

impl<F> ReceiptEngine for F
where
    F: Fn(&[u8], &[u8], &[u8]) -> bool + Send + Sync,
{
    fn verify_receipt(&self, receipt: &[u8], image_id: &[u8], public_input: &[u8]) -> bool {
        self(receipt, image_id, public_input)
    }
}

pub fn try_verify_risc_zero_receipt(
    engine: &dyn ReceiptEngine,
    receipt: &[u8],
    image_id: &[u8],
    public_input: &[u8],
) -> Result<bool> {
    if receipt.is_empty() || image_id.is_empty() {
        debug!(
            receipt_len = receipt.len(),
            image_id_len = image_id.len(),
            "risc0 receipt or image id missing"
        );
        return Ok(false);
    }
    barrier::guard("risc0", || engine.verify_receipt(receipt, image_id, public_input))
}

/// Boolean form of [`try_verify_risc_zero_receipt`]. An engine fault is
/// reported as `false`.
pub fn verify_risc_zero_receipt(
    engine: &dyn ReceiptEngine,
    receipt: &[u8],
    image_id: &[u8],
    public_input: &[u8],
) -> bool {
    crate::to_verdict(
        "risc0",
        try_verify_risc_zero_receipt(engine, receipt, image_id, public_input),
    )
}

#[cfg(feature = "risc0")]
pub use engine::RiscZeroEngine;

#[cfg(feature = "risc0")]
mod engine {
    use risc0_zkvm::{sha::Digest, Receipt};
    use tracing::{debug, warn};

    use super::ReceiptEngine;

    const IMAGE_ID_LEN: usize = 32;

    /// Verifies bincode-encoded `risc0_zkvm::Receipt`s.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RiscZeroEngine;

    impl ReceiptEngine for RiscZeroEngine {
        fn verify_receipt(&self, receipt: &[u8], image_id: &[u8], public_input: &[u8]) -> bool {
            let Ok(image_id) = <[u8; IMAGE_ID_LEN]>::try_from(image_id) else {
                warn!(len = image_id.len(), "risc0 image id must be 32 bytes");
                return false;
            };
            let receipt: Receipt = match bincode::deserialize(receipt) {
                Ok(receipt) => receipt,
                Err(e) => {
                    debug!(error = %e, "failed to decode risc0 receipt");
                    return false;
                }
            };
            if receipt.journal.bytes.as_slice() != public_input {
                warn!("risc0 journal does not match public input");
                return false;
            }
            receipt.verify(Digest::from_bytes(image_id)).is_ok()
        }
    }
}
