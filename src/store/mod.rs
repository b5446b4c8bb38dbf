//! Client-side normalized store mirroring the server collections.
//!
//! State is mutated only through [`DebateStore::dispatch`]; each dispatch
//! applies one [`Action`] under the write lock.

pub mod action;
pub mod reducer;
pub mod state;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::trace;

pub use action::Action;
pub use reducer::reduce;
pub use state::DebateState;

pub struct DebateStore {
    state: RwLock<DebateState>,
    /// Bumped after every dispatch so views can wait for changes.
    version: watch::Sender<u64>,
}

impl DebateStore {
    pub fn new() -> Self {
        Self::with_state(DebateState::default())
    }

    pub fn with_state(state: DebateState) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            state: RwLock::new(state),
            version,
        }
    }

    pub fn dispatch(&self, action: Action) {
        trace!(action = action.name(), "dispatch");
        {
            let mut state = self.state.write();
            reduce(&mut state, action, Utc::now());
        }
        self.version.send_modify(|v| *v += 1);
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> DebateState {
        self.state.read().clone()
    }

    /// Run `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&DebateState) -> R) -> R {
        f(&self.state.read())
    }

    /// Receiver that observes a new version after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }
}

impl Default for DebateStore {
    fn default() -> Self {
        Self::new()
    }
}
