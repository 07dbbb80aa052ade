mod common;
use babysteps::core::store::EventStore;
use babysteps::core::sync::mutation::{MutationKind, MutationState, RemoteOp, RemoteReply};
use babysteps::core::sync::{SyncCoordinator, is_temp_id};
use babysteps::errors::AppError;
use babysteps::models::entry::Entry;
use babysteps::models::entry_type::DiaperStatus;
use common::{bottle, diaper, note, with_id};

fn offline() -> AppError {
    AppError::Network("offline".into())
}

fn seeded(entries: Vec<Entry>) -> SyncCoordinator {
    let mut store = EventStore::new();
    store.hydrate(entries);
    SyncCoordinator::new(store)
}

#[test]
fn test_create_is_visible_then_takes_server_id() {
    let mut coord = seeded(vec![]);
    let sub = coord.submit_create(bottle(1_000, 90.0)).expect("submit");

    assert!(is_temp_id(&sub.entry_id));
    assert!(coord.store().contains(&sub.entry_id));
    let req = sub.dispatch.expect("dispatched immediately");
    assert!(matches!(req.op, RemoteOp::Create(_)));

    let res = coord.resolve(
        sub.ticket,
        Ok(RemoteReply::Entry(with_id(bottle(1_000, 90.0), "101"))),
    );

    assert_eq!(res.settled.len(), 1);
    assert!(res.settled[0].outcome.is_ok());
    assert!(res.next.is_empty());
    assert!(!coord.store().contains(&sub.entry_id));
    assert!(coord.store().contains("101"));
    assert_eq!(coord.current_id(&sub.entry_id), "101");
    assert!(!coord.has_pending());
    assert_eq!(coord.history()[0].state, MutationState::Committed);
}

#[test]
fn test_failed_create_is_rolled_back() {
    let mut coord = seeded(vec![]);
    let sub = coord.submit_create(note(1_000, "hello")).expect("submit");

    let res = coord.resolve(sub.ticket, Err(offline()));

    assert!(matches!(res.settled[0].outcome, Err(AppError::Network(_))));
    assert!(coord.store().is_empty());
    assert_eq!(coord.history()[0].state, MutationState::Failed);
}

#[test]
fn test_create_without_server_id_fails() {
    let mut coord = seeded(vec![]);
    let sub = coord.submit_create(note(1_000, "hello")).expect("submit");

    let res = coord.resolve(sub.ticket, Ok(RemoteReply::Entry(note(1_000, "hello"))));

    assert!(matches!(res.settled[0].outcome, Err(AppError::Sync(_))));
    assert!(coord.store().is_empty());
}

#[test]
fn test_invalid_entry_never_reaches_the_store() {
    let mut coord = seeded(vec![]);
    let err = coord.submit_create(note(1_000, "   ")).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(coord.store().is_empty());
    assert!(!coord.has_pending());
}

#[test]
fn test_update_waits_behind_create_and_follows_server_id() {
    let mut coord = seeded(vec![]);
    let create = coord.submit_create(bottle(1_000, 90.0)).expect("create");
    let temp = create.entry_id.clone();

    let update = coord
        .submit_update(with_id(bottle(1_000, 120.0), &temp))
        .expect("update");
    assert!(update.dispatch.is_none());
    assert_eq!(coord.pending().len(), 2);

    let res = coord.resolve(
        create.ticket,
        Ok(RemoteReply::Entry(with_id(bottle(1_000, 90.0), "7"))),
    );

    // local edit survives the create echo
    let stored = coord.store().get("7").expect("rekeyed");
    assert_eq!(stored.feeding().and_then(|f| f.amount), Some(120.0));

    assert_eq!(res.next.len(), 1);
    let next = &res.next[0];
    assert_eq!(next.ticket, update.ticket);
    match &next.op {
        RemoteOp::Update { id, entry } => {
            assert_eq!(id, "7");
            assert_eq!(entry.id, "7");
        }
        other => panic!("unexpected op {other:?}"),
    }

    let res = coord.resolve(
        update.ticket,
        Ok(RemoteReply::Entry(with_id(bottle(1_000, 120.0), "7"))),
    );
    assert!(res.settled[0].outcome.is_ok());
    assert!(!coord.has_pending());
    assert_eq!(coord.store().len(), 1);
}

#[test]
fn test_delete_during_create_is_replayed_with_server_id() {
    let mut coord = seeded(vec![]);
    let create = coord.submit_create(note(1_000, "oops")).expect("create");
    let delete = coord.submit_delete(&create.entry_id).expect("delete");

    assert!(delete.dispatch.is_none());
    assert!(coord.store().is_empty());

    let res = coord.resolve(
        create.ticket,
        Ok(RemoteReply::Entry(with_id(note(1_000, "oops"), "55"))),
    );
    assert!(coord.store().is_empty(), "acknowledged create must not resurrect");
    assert_eq!(res.next.len(), 1);
    assert_eq!(res.next[0].op, RemoteOp::Delete { id: "55".into() });

    coord.resolve(delete.ticket, Ok(RemoteReply::Done));
    assert!(coord.store().is_empty());
    assert!(!coord.has_pending());
}

#[test]
fn test_failed_create_cancels_queued_mutations() {
    let mut coord = seeded(vec![]);
    let create = coord.submit_create(note(1_000, "a")).expect("create");
    let temp = create.entry_id.clone();
    let update = coord
        .submit_update(with_id(note(1_000, "b"), &temp))
        .expect("update");

    let res = coord.resolve(create.ticket, Err(offline()));

    assert_eq!(res.settled.len(), 2);
    assert_eq!(res.settled[0].ticket, create.ticket);
    assert_eq!(res.settled[1].ticket, update.ticket);
    assert!(matches!(res.settled[1].outcome, Err(AppError::Sync(_))));
    assert!(res.next.is_empty());
    assert!(coord.store().is_empty());
    assert!(!coord.has_pending());
}

#[test]
fn test_delete_behind_failed_create_settles_ok() {
    let mut coord = seeded(vec![]);
    let create = coord.submit_create(note(1_000, "a")).expect("create");
    let delete = coord.submit_delete(&create.entry_id).expect("delete");

    let res = coord.resolve(create.ticket, Err(offline()));

    assert_eq!(res.settled.len(), 2);
    assert!(res.settled[0].outcome.is_err());
    assert_eq!(res.settled[1].ticket, delete.ticket);
    assert!(matches!(res.settled[1].outcome, Ok(None)));
    assert!(coord.store().is_empty());

    let last = coord.history().pop().expect("history");
    assert_eq!(last.ticket, delete.ticket);
    assert_eq!(last.state, MutationState::Committed);
}

#[test]
fn test_delete_behind_failed_update_is_cancelled() {
    let mut coord = seeded(vec![with_id(bottle(1_000, 90.0), "1")]);
    let update = coord
        .submit_update(with_id(bottle(1_000, 150.0), "1"))
        .expect("update");
    let delete = coord.submit_delete("1").expect("delete");
    assert!(coord.store().is_empty());

    let res = coord.resolve(update.ticket, Err(offline()));

    assert_eq!(res.settled[1].ticket, delete.ticket);
    assert!(matches!(res.settled[1].outcome, Err(AppError::Sync(_))));
    assert_eq!(
        coord.store().get("1").and_then(|e| e.feeding()).and_then(|f| f.amount),
        Some(90.0)
    );
}

#[test]
fn test_failed_update_restores_snapshot() {
    let mut coord = seeded(vec![with_id(bottle(1_000, 90.0), "1")]);
    let sub = coord
        .submit_update(with_id(bottle(1_000, 150.0), "1"))
        .expect("update");
    assert_eq!(
        coord.store().get("1").and_then(|e| e.feeding()).and_then(|f| f.amount),
        Some(150.0)
    );

    coord.resolve(sub.ticket, Err(offline()));

    assert_eq!(
        coord.store().get("1").and_then(|e| e.feeding()).and_then(|f| f.amount),
        Some(90.0)
    );
}

#[test]
fn test_update_of_unknown_entry_is_rejected() {
    let mut coord = seeded(vec![]);
    let err = coord.submit_update(with_id(note(1, "x"), "missing")).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_failed_delete_restores_entry() {
    let mut coord = seeded(vec![with_id(diaper(1_000, DiaperStatus::Wet), "1")]);
    let sub = coord.submit_delete("1").expect("delete");
    assert!(coord.store().is_empty());

    coord.resolve(sub.ticket, Err(AppError::Auth("expired".into())));

    assert!(coord.store().contains("1"));
}

#[test]
fn test_delete_of_missing_remote_entry_succeeds() {
    let mut coord = seeded(vec![with_id(diaper(1_000, DiaperStatus::Wet), "1")]);
    let sub = coord.submit_delete("1").expect("delete");

    let res = coord.resolve(sub.ticket, Err(AppError::NotFound("logs/1".into())));

    assert!(res.settled[0].outcome.is_ok());
    assert!(coord.store().is_empty());
    assert_eq!(coord.history()[0].kind, MutationKind::Delete);
}

#[test]
fn test_delete_of_unknown_temp_id_is_ignored() {
    let mut coord = seeded(vec![]);
    assert!(coord.submit_delete("temp-1-1").is_none());
    assert!(!coord.has_pending());
}

#[test]
fn test_stale_outcome_is_ignored() {
    let mut coord = seeded(vec![with_id(note(1_000, "x"), "1")]);
    let sub = coord.submit_delete("1").expect("delete");
    coord.resolve(sub.ticket, Ok(RemoteReply::Done));

    let res = coord.resolve(sub.ticket, Err(offline()));
    assert!(res.settled.is_empty());
    assert!(coord.store().is_empty());

    let res = coord.resolve(999, Ok(RemoteReply::Done));
    assert!(res.settled.is_empty());
}
