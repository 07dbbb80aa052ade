//! Async driver: runs a `SyncCoordinator` against a `RemoteLogService`.

use super::coordinator::SyncCoordinator;
use super::mutation::{PendingMutation, RemoteOp, RemoteReply, RemoteRequest, Resolution, Ticket};
use super::remote::RemoteLogService;
use crate::core::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::profile::Profile;
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

type Waiter = oneshot::Sender<AppResult<Option<Entry>>>;

/// Where the last known profile is kept between runs.
pub trait ProfileCache: Send {
    fn load_profile(&mut self) -> AppResult<Option<Profile>>;
    fn save_profile(&mut self, profile: &Profile) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullSummary {
    pub entries: usize,
    pub profile: bool,
}

struct Inner {
    coord: SyncCoordinator,
    waiters: HashMap<Ticket, Waiter>,
    profile: Option<Profile>,
    profile_cache: Option<Box<dyn ProfileCache>>,
}

struct Shared<S> {
    remote: S,
    inner: Mutex<Inner>,
}

/// Remote calls run on spawned tasks, so a caller that stops waiting does
/// not stall the mutations queued behind its own.
pub struct SyncClient<S: RemoteLogService> {
    shared: Arc<Shared<S>>,
}

impl<S: RemoteLogService + 'static> SyncClient<S> {
    pub fn new(remote: S, store: EventStore) -> Self {
        Self {
            shared: Arc::new(Shared {
                remote,
                inner: Mutex::new(Inner {
                    coord: SyncCoordinator::new(store),
                    waiters: HashMap::new(),
                    profile: None,
                    profile_cache: None,
                }),
            }),
        }
    }

    /// Attach a profile cache and take the cached profile, if readable.
    pub fn with_profile_cache(self, mut cache: Box<dyn ProfileCache>) -> Self {
        {
            let mut inner = self.lock();
            match cache.load_profile() {
                Ok(p) => inner.profile = p,
                Err(e) => warn!(error = %e, "ignoring unreadable cached profile"),
            }
            inner.profile_cache = Some(cache);
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock()
    }

    pub fn remote(&self) -> &S {
        &self.shared.remote
    }

    pub fn profile(&self) -> Option<Profile> {
        self.lock().profile.clone()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.lock().coord.store().all().to_vec()
    }

    pub fn with_store<R>(&self, f: impl FnOnce(&EventStore) -> R) -> R {
        f(self.lock().coord.store())
    }

    pub fn pending(&self) -> Vec<PendingMutation> {
        self.lock().coord.pending()
    }

    pub fn history(&self) -> Vec<PendingMutation> {
        self.lock().coord.history()
    }

    /// The id an entry is currently stored under (server id once a
    /// temporary id was acknowledged).
    pub fn current_id(&self, id: &str) -> String {
        self.lock().coord.current_id(id)
    }

    // ------------------------------------------------
    // Mutations
    // ------------------------------------------------

    /// The entry is visible locally before this returns `Pending`; the
    /// future completes with the committed entry or the rollback cause.
    pub async fn create(&self, entry: Entry) -> AppResult<Entry> {
        let (tx, rx) = oneshot::channel();
        let dispatch = {
            let mut inner = self.lock();
            let sub = inner.coord.submit_create(entry)?;
            inner.waiters.insert(sub.ticket, tx);
            sub.dispatch
        };

        self.settle(dispatch, rx).await?.ok_or_else(missing_echo)
    }

    pub async fn update(&self, entry: Entry) -> AppResult<Entry> {
        let (tx, rx) = oneshot::channel();
        let dispatch = {
            let mut inner = self.lock();
            let sub = inner.coord.submit_update(entry)?;
            inner.waiters.insert(sub.ticket, tx);
            sub.dispatch
        };

        self.settle(dispatch, rx).await?.ok_or_else(missing_echo)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let (tx, rx) = oneshot::channel();
        let dispatch = {
            let mut inner = self.lock();
            let Some(sub) = inner.coord.submit_delete(id) else {
                return Ok(());
            };
            inner.waiters.insert(sub.ticket, tx);
            sub.dispatch
        };

        self.settle(dispatch, rx).await.map(|_| ())
    }

    async fn settle(
        &self,
        dispatch: Option<RemoteRequest>,
        rx: oneshot::Receiver<AppResult<Option<Entry>>>,
    ) -> AppResult<Option<Entry>> {
        if let Some(req) = dispatch {
            tokio::spawn(pump(Arc::clone(&self.shared), req));
        }
        rx.await
            .map_err(|_| AppError::Sync("mutation was dropped before it settled".into()))?
    }

    // ------------------------------------------------
    // Session data
    // ------------------------------------------------

    /// Replace local profile and entries with the remote state. Refused
    /// while mutations are in flight, since hydration would drop them.
    pub async fn pull(&self) -> AppResult<PullSummary> {
        self.ensure_idle()?;

        let remote = &self.shared.remote;
        let (profile, entries) = tokio::try_join!(remote.fetch_profile(), remote.fetch_entries())?;

        let mut inner = self.lock();
        if inner.coord.has_pending() {
            return Err(AppError::Sync(
                "local changes were submitted during the pull; pull again".into(),
            ));
        }

        let summary = PullSummary {
            entries: entries.len(),
            profile: profile.is_some(),
        };
        inner.coord.store_mut().hydrate(entries);
        if let Some(p) = profile {
            inner.set_profile(p);
        }

        info!(entries = summary.entries, "pulled remote log");
        Ok(summary)
    }

    /// The remote copy is written first; nothing changes locally on failure.
    pub async fn save_profile(&self, profile: Profile) -> AppResult<Profile> {
        profile.validate()?;

        let saved = self.shared.remote.save_profile(&profile).await?;
        self.lock().set_profile(saved.clone());
        Ok(saved)
    }

    fn ensure_idle(&self) -> AppResult<()> {
        let pending = self.lock().coord.pending().len();
        if pending > 0 {
            return Err(AppError::Sync(format!(
                "{pending} change(s) still waiting for the server"
            )));
        }
        Ok(())
    }
}

/// Issue `first`, then every request its resolution unblocks.
async fn pump<S: RemoteLogService>(shared: Arc<Shared<S>>, first: RemoteRequest) {
    let mut queue = VecDeque::from([first]);

    while let Some(req) = queue.pop_front() {
        let result = shared.execute(req.op).await;
        let resolution = shared.inner.lock().resolve(req.ticket, result);
        queue.extend(resolution);
    }
}

impl<S: RemoteLogService> Shared<S> {
    async fn execute(&self, op: RemoteOp) -> AppResult<RemoteReply> {
        match op {
            RemoteOp::Create(entry) => self
                .remote
                .create_entry(&entry)
                .await
                .map(RemoteReply::Entry),
            RemoteOp::Update { id, entry } => self
                .remote
                .update_entry(&id, &entry)
                .await
                .map(RemoteReply::Entry),
            RemoteOp::Delete { id } => self
                .remote
                .delete_entry(&id)
                .await
                .map(|_| RemoteReply::Done),
        }
    }
}

impl Inner {
    fn resolve(&mut self, ticket: Ticket, result: AppResult<RemoteReply>) -> Vec<RemoteRequest> {
        let Resolution { settled, next } = self.coord.resolve(ticket, result);

        for s in settled {
            debug!(ticket = s.ticket, id = %s.entry_id, ok = s.outcome.is_ok(), "settled");
            if let Some(tx) = self.waiters.remove(&s.ticket) {
                // The caller may have stopped waiting.
                let _ = tx.send(s.outcome);
            }
        }
        next
    }

    fn set_profile(&mut self, profile: Profile) {
        if let Some(cache) = self.profile_cache.as_mut()
            && let Err(e) = cache.save_profile(&profile)
        {
            warn!(error = %e, "failed to write profile cache");
        }
        self.profile = Some(profile);
    }
}

fn missing_echo() -> AppError {
    AppError::Sync("server did not return the stored entry".into())
}
