//! Scoped fault barrier around verification engines

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use polyverify_runtime::{Result, VerifierError};
use tracing::error;

/// Runs `f`, turning any panic raised inside it into a `VerifierFault`.
///
/// The closure only reads borrowed input buffers, so observing its state
/// after an unwind cannot expose a broken invariant.
pub fn guard<T, F>(label: &str, f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    catch(f).map_err(|reason| {
        error!(engine = label, %reason, "panic caught at verifier boundary");
        VerifierError::fault(format!(
            "panic was caught while verifying {} proof: {}",
            label, reason
        ))
    })
}

/// Runs `f` and returns the panic message if it panicked. The caller
/// decides how the panic is classified.
pub fn catch<T, F>(f: F) -> std::result::Result<T, String>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_value_through() {
        let result = guard("test", || 42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_guard_catches_str_panic() {
        let result: Result<bool> = guard("sp1", || panic!("boom"));
        let err = result.unwrap_err();
        assert!(err.is_fault());
        let msg = err.to_string();
        assert!(msg.contains("sp1"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_guard_catches_formatted_panic() {
        let index = 7;
        let result: Result<()> = guard("risc0", || panic!("index {} out of range", index));
        assert!(result.unwrap_err().to_string().contains("index 7 out of range"));
    }

    #[test]
    fn test_catch_returns_message_only() {
        let result: std::result::Result<(), String> = catch(|| panic!("bad point"));
        assert_eq!(result.unwrap_err(), "bad point");
        assert_eq!(catch(|| 7).unwrap(), 7);
    }

    #[test]
    fn test_guard_catches_non_string_payload() {
        let result: Result<()> = guard("custom", || std::panic::panic_any(17u32));
        assert!(result.unwrap_err().to_string().contains("non-string panic payload"));
    }
}
