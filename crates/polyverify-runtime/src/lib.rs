//! polyverify runtime
//!
//! Shared types, error handling and configuration used by the polyverify
//! verifier adapter and its command line front end.

pub mod config;
pub mod error;
pub mod types;

pub use config::VerifierConfig;
pub use error::{Result, VerifierError};
pub use types::{Curve, ProvingSystemId, VerificationData};
