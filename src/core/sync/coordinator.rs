//! Optimistic mutation and reconciliation, without any I/O.
//!
//! Every mutation is applied to the [`EventStore`] at submission and
//! carries a snapshot of the entry as it was before. Mutations of the same
//! entry reach the remote service strictly in submission order: only the
//! head of an entry's chain is in flight, the rest wait and are rewritten to
//! whichever id is current when their turn comes (a temporary id becomes the
//! server id once the create is acknowledged).
//!
//! A failure restores the failed mutation's snapshot and cancels everything
//! queued behind it on the same entry, so the store falls back to the last
//! committed state.

use super::mutation::{
    MutationKind, MutationState, PendingMutation, RemoteOp, RemoteReply, RemoteRequest,
    Resolution, Settled, Submission, Ticket,
};
use crate::core::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::utils::date::now_millis;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

pub const TEMP_ID_PREFIX: &str = "temp-";

const HISTORY_LIMIT: usize = 64;

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

#[derive(Debug)]
struct Queued {
    ticket: Ticket,
    kind: MutationKind,
    /// Entry before this mutation; `None` if it did not exist.
    snapshot: Option<Entry>,
    /// Entry sent for create/update.
    payload: Option<Entry>,
}

pub struct SyncCoordinator {
    store: EventStore,
    /// Per-entry chains; the front element is the one in flight.
    chains: HashMap<String, VecDeque<Queued>>,
    /// Chain key of every unsettled ticket.
    ticket_chain: HashMap<Ticket, String>,
    /// Temporary id → server id, once acknowledged.
    aliases: HashMap<String, String>,
    history: VecDeque<PendingMutation>,
    next_ticket: Ticket,
    temp_seq: u64,
}

impl SyncCoordinator {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            chains: HashMap::new(),
            ticket_chain: HashMap::new(),
            aliases: HashMap::new(),
            history: VecDeque::new(),
            next_ticket: 1,
            temp_seq: 0,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }

    /// Follow temporary ids to their server id.
    pub fn current_id(&self, id: &str) -> String {
        match self.aliases.get(id) {
            Some(server) => server.clone(),
            None => id.to_string(),
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.ticket_chain.is_empty()
    }

    /// Mutations not yet settled, in per-entry submission order.
    pub fn pending(&self) -> Vec<PendingMutation> {
        let mut out: Vec<PendingMutation> = self
            .chains
            .iter()
            .flat_map(|(id, chain)| {
                chain.iter().map(move |q| PendingMutation {
                    ticket: q.ticket,
                    entry_id: id.clone(),
                    kind: q.kind,
                    state: MutationState::Pending,
                })
            })
            .collect();
        out.sort_by_key(|p| p.ticket);
        out
    }

    /// Recently settled mutations, oldest first.
    pub fn history(&self) -> Vec<PendingMutation> {
        self.history.iter().cloned().collect()
    }

    // ------------------------------------------------
    // Submission
    // ------------------------------------------------

    pub fn submit_create(&mut self, mut entry: Entry) -> AppResult<Submission> {
        entry.validate()?;

        let temp_id = self.next_temp_id();
        entry.id = temp_id.clone();
        self.store.add(entry.clone());
        debug!(id = %temp_id, "optimistic create");

        Ok(self.enqueue(temp_id, MutationKind::Create, None, Some(entry)))
    }

    pub fn submit_update(&mut self, mut entry: Entry) -> AppResult<Submission> {
        entry.validate()?;

        let id = self.current_id(&entry.id);
        let snapshot = self
            .store
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;

        entry.id = id.clone();
        self.store.replace(&id, entry.clone());
        debug!(id = %id, "optimistic update");

        Ok(self.enqueue(id, MutationKind::Update, Some(snapshot), Some(entry)))
    }

    /// `None` when there is nothing to delete: the id is unknown locally and
    /// was never sent to the remote service.
    pub fn submit_delete(&mut self, id: &str) -> Option<Submission> {
        let id = self.current_id(id);
        let snapshot = self.store.remove(&id);

        if snapshot.is_none() && is_temp_id(&id) && !self.chains.contains_key(&id) {
            debug!(id = %id, "delete of unknown temporary id ignored");
            return None;
        }
        debug!(id = %id, "optimistic delete");

        Some(self.enqueue(id, MutationKind::Delete, snapshot, None))
    }

    fn enqueue(
        &mut self,
        key: String,
        kind: MutationKind,
        snapshot: Option<Entry>,
        payload: Option<Entry>,
    ) -> Submission {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let q = Queued {
            ticket,
            kind,
            snapshot,
            payload,
        };

        let chain = self.chains.entry(key.clone()).or_default();
        let dispatch = if chain.is_empty() {
            Some(request_for(&q, &key))
        } else {
            debug!(id = %key, ticket, "queued behind in-flight mutation");
            None
        };
        chain.push_back(q);
        self.ticket_chain.insert(ticket, key.clone());

        Submission {
            ticket,
            entry_id: key,
            dispatch,
        }
    }

    // ------------------------------------------------
    // Reconciliation
    // ------------------------------------------------

    /// Apply the remote outcome of an in-flight mutation.
    pub fn resolve(&mut self, ticket: Ticket, result: AppResult<RemoteReply>) -> Resolution {
        let mut res = Resolution::default();

        let Some(key) = self.ticket_chain.get(&ticket).cloned() else {
            warn!(ticket, "outcome for unknown or settled mutation ignored");
            return res;
        };
        let head = self.chains.get_mut(&key).and_then(|c| {
            if c.front().is_some_and(|q| q.ticket == ticket) {
                c.pop_front()
            } else {
                None
            }
        });
        let Some(q) = head else {
            warn!(ticket, id = %key, "outcome for a mutation that is not in flight ignored");
            return res;
        };
        self.ticket_chain.remove(&ticket);

        let outcome = match (q.kind, result) {
            (MutationKind::Create, Ok(RemoteReply::Entry(server))) if !server.id.is_empty() => {
                Ok(Some(server))
            }
            (MutationKind::Update, Ok(RemoteReply::Entry(server))) => Ok(Some(server)),
            (MutationKind::Delete, Ok(_)) => Ok(None),
            (MutationKind::Delete, Err(AppError::NotFound(_))) => Ok(None),
            (_, Err(e)) => Err(e),
            (kind, Ok(_)) => Err(AppError::Sync(format!(
                "unexpected reply to {}",
                kind.as_str()
            ))),
        };

        match outcome {
            Ok(committed) => {
                let key = self.commit(&key, &q, committed.as_ref());
                self.record(q.ticket, &key, q.kind, MutationState::Committed);
                res.settled.push(Settled {
                    ticket: q.ticket,
                    kind: q.kind,
                    entry_id: key.clone(),
                    outcome: Ok(committed),
                });
                if let Some(next) = self.chains.get(&key).and_then(|c| c.front()) {
                    res.next.push(request_for(next, &key));
                }
            }
            Err(e) => {
                warn!(ticket, id = %key, kind = q.kind.as_str(), error = %e, "rolling back");
                self.rollback(&key, &q);
                self.record(q.ticket, &key, q.kind, MutationState::Failed);
                let gone = !self.store.contains(&key);
                for cancelled in self.cancel_chain(&key, gone) {
                    let outcome = if cancelled.kind == MutationKind::Delete && gone {
                        // Nothing left to delete once the rollback removed it.
                        Ok(None)
                    } else {
                        Err(AppError::Sync(format!(
                            "cancelled: earlier {} of {} failed ({})",
                            q.kind.as_str(),
                            key,
                            e
                        )))
                    };
                    res.settled.push(Settled {
                        ticket: cancelled.ticket,
                        kind: cancelled.kind,
                        entry_id: key.clone(),
                        outcome,
                    });
                }
                res.settled.insert(
                    0,
                    Settled {
                        ticket: q.ticket,
                        kind: q.kind,
                        entry_id: key,
                        outcome: Err(e),
                    },
                );
            }
        }

        if res.settled.len() > 1 || !res.next.is_empty() {
            debug!(
                settled = res.settled.len(),
                next = res.next.len(),
                "resolution cascades"
            );
        }
        res
    }

    /// Returns the chain key after the commit (the server id for creates).
    fn commit(&mut self, key: &str, q: &Queued, committed: Option<&Entry>) -> String {
        let waiting = self.chains.get(key).is_some_and(|c| !c.is_empty());

        match (q.kind, committed) {
            (MutationKind::Create, Some(server)) => {
                let server_id = server.id.clone();
                self.aliases.insert(key.to_string(), server_id.clone());

                if self.store.contains(key) {
                    if waiting {
                        // Later local edits are still in flight: keep them,
                        // only take over the server id.
                        if let Some(mut local) = self.store.get(key).cloned() {
                            local.id = server_id.clone();
                            self.store.replace(key, local);
                        }
                    } else {
                        self.store.replace(key, server.clone());
                    }
                } else {
                    debug!(temp = key, id = %server_id, "create acknowledged after local delete");
                }

                self.rekey_chain(key, &server_id);
                server_id
            }
            (MutationKind::Update, Some(server)) => {
                if !waiting && self.store.contains(key) {
                    let mut echoed = server.clone();
                    echoed.id = key.to_string();
                    self.store.replace(key, echoed);
                }
                self.drop_empty_chain(key);
                key.to_string()
            }
            _ => {
                self.drop_empty_chain(key);
                key.to_string()
            }
        }
    }

    fn rollback(&mut self, key: &str, q: &Queued) {
        match &q.snapshot {
            None => {
                self.store.remove(key);
            }
            Some(before) => {
                let mut before = before.clone();
                before.id = key.to_string();
                if !self.store.replace(key, before.clone()) {
                    self.store.add(before);
                }
            }
        }
    }

    /// Drop everything queued on `key`. Deletes count as committed when the
    /// entry is already `gone` locally.
    fn cancel_chain(&mut self, key: &str, gone: bool) -> Vec<Queued> {
        let cancelled: Vec<Queued> = self
            .chains
            .remove(key)
            .map(|c| c.into_iter().collect())
            .unwrap_or_default();

        for c in &cancelled {
            self.ticket_chain.remove(&c.ticket);
            let state = if c.kind == MutationKind::Delete && gone {
                MutationState::Committed
            } else {
                MutationState::Failed
            };
            self.record(c.ticket, key, c.kind, state);
        }
        cancelled
    }

    fn rekey_chain(&mut self, from: &str, to: &str) {
        let Some(mut chain) = self.chains.remove(from) else {
            return;
        };
        if chain.is_empty() {
            return;
        }

        for q in chain.iter_mut() {
            self.ticket_chain.insert(q.ticket, to.to_string());
            for e in [q.snapshot.as_mut(), q.payload.as_mut()].into_iter().flatten() {
                e.id = to.to_string();
            }
        }
        self.chains.entry(to.to_string()).or_default().extend(chain);
    }

    fn drop_empty_chain(&mut self, key: &str) {
        if self.chains.get(key).is_some_and(|c| c.is_empty()) {
            self.chains.remove(key);
        }
    }

    fn record(&mut self, ticket: Ticket, id: &str, kind: MutationKind, state: MutationState) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(PendingMutation {
            ticket,
            entry_id: id.to_string(),
            kind,
            state,
        });
    }

    fn next_temp_id(&mut self) -> String {
        self.temp_seq += 1;
        format!("{TEMP_ID_PREFIX}{}-{}", now_millis(), self.temp_seq)
    }
}

fn request_for(q: &Queued, id: &str) -> RemoteRequest {
    let op = match q.kind {
        MutationKind::Create => {
            RemoteOp::Create(q.payload.clone().unwrap_or_else(|| placeholder(id)))
        }
        MutationKind::Update => {
            let mut entry = q.payload.clone().unwrap_or_else(|| placeholder(id));
            entry.id = id.to_string();
            RemoteOp::Update {
                id: id.to_string(),
                entry,
            }
        }
        MutationKind::Delete => RemoteOp::Delete { id: id.to_string() },
    };

    RemoteRequest {
        ticket: q.ticket,
        op,
    }
}

// Creates and updates always carry a payload; this only satisfies the type.
fn placeholder(id: &str) -> Entry {
    use crate::models::entry::{EntryDetails, NoteText};
    let mut e = Entry::new(
        0,
        EntryDetails::Note(NoteText {
            content: String::new(),
        }),
    );
    e.id = id.to_string();
    e
}
