use std::sync::PoisonError;

/// Helper trait to recover a guard from a poisoned lock.
///
/// Poisoning is logged and the inner value reused as-is; the set
/// stays usable after a panicking caller or observer.
pub(crate) trait LockResultExt<T> {
    /// Recover from a poisoned lock, logging which operation
    /// triggered the recovery.
    fn recover_poison(self, context: &str) -> T;
}

impl<T> LockResultExt<T> for Result<T, PoisonError<T>> {
    fn recover_poison(self, context: &str) -> T {
        match self {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!(
                    target: "region_set::lock_recovery",
                    "Recovered from poisoned lock in {}",
                    context
                );
                poisoned.into_inner()
            }
        }
    }
}
