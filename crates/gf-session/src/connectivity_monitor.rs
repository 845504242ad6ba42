use crate::ConnectivityState;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::info;
use tokio::sync::broadcast;

const TRANSITION_BUFFER: usize = 16;

/// Relays the environment's online/offline signal.
///
/// Reads are lock-free; `set` is serialized so subscribers observe
/// transitions in the order they happened.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    online: AtomicBool,
    write_lock: Mutex<()>,
    transitions: broadcast::Sender<ConnectivityState>,
}

impl ConnectivityMonitor {
    pub fn new(initial: ConnectivityState) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            inner: Arc::new(MonitorInner {
                online: AtomicBool::new(initial.is_online()),
                write_lock: Mutex::new(()),
                transitions,
            }),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from_online(self.is_online())
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Record an environment signal. Returns true if it was a transition.
    pub fn set(&self, state: ConnectivityState) -> bool {
        let _guard = self
            .inner
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let was_online = self.inner.online.swap(state.is_online(), Ordering::SeqCst);
        if was_online == state.is_online() {
            return false;
        }

        info!("Connectivity changed: {:?}", state);
        // No subscribers is fine
        let _ = self.inner.transitions.send(state);
        true
    }

    /// Receive every subsequent transition.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectivityState> {
        self.inner.transitions.subscribe()
    }
}
