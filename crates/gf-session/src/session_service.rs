use crate::shutdown_signal::ShutdownSignal;
use crate::{
    AuthChange, ConnectivityMonitor, ConnectivityState, DocumentStore, IdentityProvider,
    ProfileResolver, ProfileStore, Reconciler, Result as SessionResult, SessionError,
    SessionEvent, SessionSettings, SessionState, Transition,
};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

const EVENT_QUEUE_SIZE: usize = 256;

/// Event waiting on the reconciler queue, with an optional acknowledgement.
struct QueuedEvent {
    event: SessionEvent,
    ack: Option<oneshot::Sender<Transition>>,
}

impl QueuedEvent {
    fn background(event: SessionEvent) -> Self {
        Self { event, ack: None }
    }
}

/// Process-wide session context.
///
/// Owns the reconciler task and the forwarders that feed it identity and
/// connectivity events. Cheap to clone; all clones share one session.
#[derive(Clone)]
pub struct SessionService {
    inner: Arc<ServiceInner>,
}

pub(crate) struct ServiceInner {
    events: mpsc::Sender<QueuedEvent>,
    state: watch::Receiver<SessionState>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) resolver: ProfileResolver,
    pub(crate) connectivity: ConnectivityMonitor,
    pub(crate) settings: SessionSettings,
    shutdown: ShutdownSignal,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SessionService {
    /// Start the session runtime. Must be called inside a tokio runtime.
    pub fn start(
        identity: Arc<dyn IdentityProvider>,
        documents: Arc<dyn DocumentStore>,
        connectivity: ConnectivityMonitor,
        settings: SessionSettings,
    ) -> Self {
        let profiles = ProfileStore::new(
            documents,
            settings.users_collection.clone(),
            connectivity.clone(),
            settings.retry.clone(),
        );
        let resolver = ProfileResolver::new(profiles, connectivity.clone());

        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let reconciler = Reconciler::new(connectivity.clone());
        let (state_tx, state_rx) = watch::channel(reconciler.state().clone());
        let shutdown = ShutdownSignal::new();

        // Subscribe before reading the current identity so nothing falls
        // between the seed and the stream.
        let auth_rx = identity.subscribe();
        let connectivity_rx = connectivity.subscribe();
        let seed = AuthChange::from(identity.current_identity());

        let mut tasks = Vec::with_capacity(3);
        tasks.push(tokio::spawn(run_reconciler(
            reconciler,
            events_rx,
            events_tx.clone(),
            state_tx,
            resolver.clone(),
            shutdown.listen(),
        )));
        tasks.push(tokio::spawn(forward_auth_changes(
            auth_rx,
            Arc::clone(&identity),
            events_tx.clone(),
            shutdown.listen(),
        )));
        tasks.push(tokio::spawn(forward_connectivity(
            connectivity_rx,
            connectivity.clone(),
            events_tx.clone(),
            shutdown.listen(),
        )));

        if events_tx
            .try_send(QueuedEvent::background(SessionEvent::AuthChanged(seed)))
            .is_err()
        {
            warn!("Could not seed session with the provider's current identity");
        }

        info!(
            "Session service started (collection '{}', {:?})",
            settings.users_collection,
            connectivity.state()
        );

        Self {
            inner: Arc::new(ServiceInner {
                events: events_tx,
                state: state_rx,
                identity,
                resolver,
                connectivity,
                settings,
                shutdown,
                tasks: Mutex::new(tasks),
            }),
        }
    }

    /// Read-only subscription to session state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.inner.connectivity
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.inner.settings
    }

    pub(crate) fn inner(&self) -> &ServiceInner {
        &self.inner
    }

    /// Wait until every event queued before this call has been applied.
    pub async fn flush(&self) -> SessionResult<()> {
        self.submit(SessionEvent::Barrier).await.map(|_| ())
    }

    /// Queue an event and wait for the reconciler to apply it.
    pub(crate) async fn submit(&self, event: SessionEvent) -> SessionResult<Transition> {
        if self.inner.shutdown.is_triggered() {
            return Err(SessionError::shut_down());
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        self.inner
            .events
            .send(QueuedEvent {
                event,
                ack: Some(ack_tx),
            })
            .await
            .map_err(|_| SessionError::shut_down())?;

        ack_rx.await.map_err(|_| SessionError::shut_down())
    }

    /// Stop all background tasks and drop the provider and connectivity
    /// subscriptions. Idempotent.
    pub async fn shutdown(&self) {
        if !self.inner.shutdown.trigger() {
            return;
        }
        info!("Session service shutting down");

        let tasks = std::mem::take(&mut *self.inner.tasks.lock().await);
        for task in tasks {
            if let Err(e) = task.await {
                warn!("Session task ended abnormally: {e}");
            }
        }

        info!("Session service stopped");
    }
}

/// Single writer loop: applies queued events one at a time and publishes
/// the resulting state.
async fn run_reconciler(
    mut reconciler: Reconciler,
    mut events: mpsc::Receiver<QueuedEvent>,
    requeue: mpsc::Sender<QueuedEvent>,
    state_tx: watch::Sender<SessionState>,
    resolver: ProfileResolver,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let queued = tokio::select! {
            _ = shutdown.recv() => break,
            queued = events.recv() => match queued {
                Some(queued) => queued,
                None => break,
            },
        };

        let transition = reconciler.apply(queued.event);

        if transition.changed_state() {
            state_tx.send_replace(reconciler.state().clone());
        }

        if let Transition::FetchRequested { ticket, identity } = &transition {
            let resolver = resolver.clone();
            let requeue = requeue.clone();
            let ticket = ticket.clone();
            let identity = identity.clone();

            // Runs to completion even if superseded; the reconciler
            // discards stale outcomes.
            tokio::spawn(async move {
                let outcome = resolver
                    .resolve(&identity)
                    .await
                    .map_err(|e| e.to_info());
                let event = SessionEvent::FetchCompleted { ticket, outcome };
                if requeue.send(QueuedEvent::background(event)).await.is_err() {
                    debug!("Session stopped before profile fetch for {} finished", identity.id);
                }
            });
        }

        if let Some(ack) = queued.ack {
            let _ = ack.send(transition);
        }
    }

    debug!("Reconciler loop exited");
}

async fn forward_auth_changes(
    mut changes: broadcast::Receiver<AuthChange>,
    identity: Arc<dyn IdentityProvider>,
    events: mpsc::Sender<QueuedEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let change = tokio::select! {
            _ = shutdown.recv() => break,
            received = changes.recv() => match received {
                Ok(change) => change,
                Err(RecvError::Lagged(missed)) => {
                    warn!("Missed {missed} identity events, resyncing from provider");
                    AuthChange::from(identity.current_identity())
                }
                Err(RecvError::Closed) => break,
            },
        };

        let event = QueuedEvent::background(SessionEvent::AuthChanged(change));
        if events.send(event).await.is_err() {
            break;
        }
    }

    debug!("Identity event forwarder exited");
}

async fn forward_connectivity(
    mut transitions: broadcast::Receiver<ConnectivityState>,
    connectivity: ConnectivityMonitor,
    events: mpsc::Sender<QueuedEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let state = tokio::select! {
            _ = shutdown.recv() => break,
            received = transitions.recv() => match received {
                Ok(state) => state,
                Err(RecvError::Lagged(missed)) => {
                    warn!("Missed {missed} connectivity transitions, using current state");
                    connectivity.state()
                }
                Err(RecvError::Closed) => break,
            },
        };

        let event = QueuedEvent::background(SessionEvent::ConnectivityChanged(state));
        if events.send(event).await.is_err() {
            break;
        }
    }

    debug!("Connectivity forwarder exited");
}
