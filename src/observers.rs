//! Keyed change-notification callbacks.

use crate::lock::LockResultExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A registered change callback. Shared so dispatch can run on a
/// clone outside the registry lock.
pub(crate) type Callback = Arc<dyn Fn() + Send + Sync>;

/// A keyed collection of zero-argument callbacks. Iteration order
/// across keys is unspecified.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    callbacks: Mutex<HashMap<String, Callback>>,
}

impl ObserverRegistry {
    /// Register a callback under `key`, replacing any previous one.
    pub(crate) fn register(&self, key: String, callback: Callback) {
        self.callbacks
            .lock()
            .recover_poison("observers::register")
            .insert(key, callback);
    }

    /// Remove the callback under `key`, if any.
    pub(crate) fn unregister(&self, key: &str) {
        self.callbacks
            .lock()
            .recover_poison("observers::unregister")
            .remove(key);
    }

    /// Invoke every registered callback.
    ///
    /// Dispatch runs on a copied callback list with the registry lock
    /// released, so a callback may re-enter the registry (or the set
    /// that owns it) freely.
    pub(crate) fn notify_all(&self) {
        let callbacks: Vec<Callback> = {
            let guard = self.callbacks.lock().recover_poison("observers::notify_all");
            guard.values().cloned().collect()
        };
        for callback in callbacks {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(counter: &Arc<AtomicUsize>) -> Callback {
        let counter = Arc::clone(counter);
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_register_overwrites_same_key() {
        let registry = ObserverRegistry::default();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        registry.register("key".to_string(), counting_callback(&first));
        registry.register("key".to_string(), counting_callback(&second));
        registry.notify_all();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_missing_key_is_a_no_op() {
        let registry = ObserverRegistry::default();
        registry.unregister("never-registered");
        registry.notify_all();
    }

    #[test]
    fn test_notify_all_invokes_every_callback_once() {
        let registry = ObserverRegistry::default();
        let counter = Arc::new(AtomicUsize::new(0));

        registry.register("a".to_string(), counting_callback(&counter));
        registry.register("b".to_string(), counting_callback(&counter));
        registry.register("c".to_string(), counting_callback(&counter));
        registry.notify_all();

        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
