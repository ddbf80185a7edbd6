use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use gs_core::startup::EffectKind;

/// Set of effects currently running. At most one request per kind.
#[derive(Clone, Default)]
pub(crate) struct InFlightEffects {
    running: Arc<Mutex<HashSet<EffectKind>>>,
}

impl InFlightEffects {
    /// Claim `kind`. Returns `None` when a request of that kind is already
    /// outstanding.
    pub(crate) fn try_begin(&self, kind: EffectKind) -> Option<InFlightGuard> {
        let inserted = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind);
        inserted.then(|| InFlightGuard {
            kind,
            running: Arc::clone(&self.running),
        })
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self, kind: EffectKind) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&kind)
    }
}

/// Releases the claim on drop, including when the effect task panics.
pub(crate) struct InFlightGuard {
    kind: EffectKind,
    running: Arc<Mutex<HashSet<EffectKind>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.kind);
    }
}
