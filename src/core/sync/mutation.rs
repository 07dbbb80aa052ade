use crate::errors::AppError;
use crate::models::entry::Entry;
use serde::Serialize;

/// Identifies one submitted mutation until it settles.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationState {
    Pending,
    Committed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMutation {
    pub ticket: Ticket,
    pub entry_id: String,
    pub kind: MutationKind,
    pub state: MutationState,
}

/// A call the Remote Log Service must receive.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOp {
    Create(Entry),
    Update { id: String, entry: Entry },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub ticket: Ticket,
    pub op: RemoteOp,
}

/// Successful remote answer: the stored entry (create/update) or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteReply {
    Entry(Entry),
    Done,
}

/// Result of submitting a mutation: the optimistic change is already
/// visible; `dispatch` is the request to issue now, `None` when it waits
/// behind an earlier mutation of the same entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub entry_id: String,
    pub dispatch: Option<RemoteRequest>,
}

/// Final outcome of one mutation. Create/update carry the committed entry.
#[derive(Debug)]
pub struct Settled {
    pub ticket: Ticket,
    pub kind: MutationKind,
    pub entry_id: String,
    pub outcome: Result<Option<Entry>, AppError>,
}

#[derive(Debug, Default)]
pub struct Resolution {
    pub settled: Vec<Settled>,
    /// Queued requests that became dispatchable, rewritten to current ids.
    pub next: Vec<RemoteRequest>,
}
