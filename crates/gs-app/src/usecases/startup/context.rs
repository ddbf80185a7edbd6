use tokio::sync::{Mutex, MutexGuard};

use gs_core::startup::{StartupContext, StartupFlags, StartupSnapshot, StartupState};

/// State plus context, always updated together.
pub(crate) struct StartupMachine {
    pub(crate) state: StartupState,
    pub(crate) context: StartupContext,
}

impl StartupMachine {
    pub(crate) fn snapshot(&self) -> StartupSnapshot {
        StartupSnapshot::new(self.state, self.context.view())
    }
}

/// Shared runtime context containing the machine and the dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `machine`.
/// - `dispatch_lock`: held for a whole dispatch (transition, effect spawn,
///   publish) so snapshots are published in transition order.
/// - `machine`: held only while the reducer runs.
pub(crate) struct StartupRuntimeContext {
    machine: Mutex<StartupMachine>,
    dispatch_lock: Mutex<()>,
}

impl StartupRuntimeContext {
    pub(crate) fn new(flags: StartupFlags) -> Self {
        Self {
            machine: Mutex::new(StartupMachine {
                state: StartupState::initial(),
                context: StartupContext::new(flags),
            }),
            dispatch_lock: Mutex::new(()),
        }
    }

    /// Acquires the dispatch lock for serializing concurrent dispatch calls.
    pub(crate) async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Lock the machine. Only call this while holding the dispatch lock, or
    /// for a read.
    pub(crate) async fn machine(&self) -> MutexGuard<'_, StartupMachine> {
        self.machine.lock().await
    }
}
