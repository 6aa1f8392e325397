use std::sync::Arc;

use bridge_confirm::error::{ConfirmError, TokenError};
use bridge_confirm::merge::merge;
use bridge_confirm::{PendingAssessment, TokenStore};
use bridge_core::error::ValidationError;
use bridge_core::models::field::{Flag, FlagSeverity, LabField};
use bridge_core::models::symptom::SymptomSet;
use bridge_core::models::vitals::PartialVitals;
use jiff::{SignedDuration, Timestamp};

fn t0() -> Timestamp {
    Timestamp::from_second(1_760_000_000).unwrap()
}

fn later(mins: i64) -> Timestamp {
    t0().checked_add(SignedDuration::from_mins(mins)).unwrap()
}

fn pending() -> PendingAssessment {
    PendingAssessment {
        vitals: PartialVitals {
            bp_systolic: Some(118),
            bp_diastolic: Some(76),
            hemoglobin: None,
            platelets: Some(220_000),
            gestational_age_weeks: Some(30),
            proteinuria: None,
            weight_kg: None,
        },
        fields: Vec::new(),
        symptoms: SymptomSet::none(),
        other_symptoms: None,
    }
}

fn operator_hb(hb: f64) -> PartialVitals {
    PartialVitals {
        hemoglobin: Some(hb),
        ..PartialVitals::default()
    }
}

#[tokio::test]
async fn token_is_single_use() {
    let store = TokenStore::default();
    let token = store.issue(pending(), Vec::new(), t0()).await;

    let first: Result<_, ConfirmError> = store
        .consume_with(token.id, later(1), |t| Ok(merge(t, &operator_hb(11.5))?))
        .await;
    let snapshot = first.unwrap();
    assert_eq!(snapshot.hemoglobin(), 11.5);

    let second: Result<(), ConfirmError> = store
        .consume_with(token.id, later(2), |_| Ok(()))
        .await;
    assert_eq!(
        second.unwrap_err(),
        ConfirmError::Token(TokenError::Consumed(token.id))
    );
}

#[tokio::test]
async fn expired_token_is_rejected_on_first_use() {
    let store = TokenStore::new(SignedDuration::from_mins(10));
    let token = store.issue(pending(), Vec::new(), t0()).await;

    let result: Result<(), TokenError> = store.consume_with(token.id, later(10), |_| Ok(())).await;
    assert_eq!(result.unwrap_err(), TokenError::Expired(token.id));

    let again: Result<(), TokenError> = store.consume_with(token.id, later(11), |_| Ok(())).await;
    assert_eq!(again.unwrap_err(), TokenError::Expired(token.id));
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let store = TokenStore::default();
    let id = uuid::Uuid::new_v4();
    let result: Result<(), TokenError> = store.consume_with(id, t0(), |_| Ok(())).await;
    assert_eq!(result.unwrap_err(), TokenError::Unknown(id));
}

#[tokio::test]
async fn invalid_operator_input_leaves_token_pending() {
    let store = TokenStore::default();
    let token = store.issue(pending(), Vec::new(), t0()).await;

    let bad: Result<_, ConfirmError> = store
        .consume_with(token.id, later(1), |t| Ok(merge(t, &operator_hb(40.0))?))
        .await;
    assert!(matches!(
        bad.unwrap_err(),
        ConfirmError::Validation(ValidationError::OutOfRange {
            field: LabField::Hemoglobin,
            ..
        })
    ));
    assert_eq!(store.pending_count().await, 1);

    let good: Result<_, ConfirmError> = store
        .consume_with(token.id, later(2), |t| Ok(merge(t, &operator_hb(11.5))?))
        .await;
    assert!(good.is_ok());
    assert_eq!(store.pending_count().await, 0);
}

#[tokio::test]
async fn omitted_required_value_blocks_confirmation() {
    let store = TokenStore::default();
    let token = store.issue(pending(), Vec::new(), t0()).await;
    let result: Result<_, ConfirmError> = store
        .consume_with(token.id, later(1), |t| {
            Ok(merge(t, &PartialVitals::default())?)
        })
        .await;
    assert_eq!(
        result.unwrap_err(),
        ConfirmError::Validation(ValidationError::Missing(LabField::Hemoglobin))
    );
}

#[tokio::test]
async fn critical_flag_is_recorded_on_the_token() {
    let store = TokenStore::default();
    let flags = vec![Flag::new(LabField::Platelets, FlagSeverity::Critical, "low")];
    let token = store.issue(pending(), flags, t0()).await;
    assert!(token.has_critical_flag);
    assert_eq!(token.expires_at(), later(10));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_confirms_succeed_exactly_once() {
    let store = TokenStore::default();
    let token = store.issue(pending(), Vec::new(), t0()).await;
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        let id = token.id;
        handles.push(tokio::spawn(async move {
            let r: Result<(), TokenError> = store.consume_with(id, later(1), |_| Ok(())).await;
            r
        }));
    }

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => ok += 1,
            Err(e) => assert_eq!(e, TokenError::Consumed(token.id)),
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
async fn sweep_expires_and_then_forgets() {
    let store = TokenStore::new(SignedDuration::from_mins(10));
    let old = store.issue(pending(), Vec::new(), t0()).await;
    let fresh = store.issue(pending(), Vec::new(), later(8)).await;

    assert_eq!(store.sweep(later(12)).await, 1);
    assert_eq!(store.pending_count().await, 1);

    let r: Result<(), TokenError> = store.consume_with(old.id, later(13), |_| Ok(())).await;
    assert_eq!(r.unwrap_err(), TokenError::Expired(old.id));

    // Tombstone retention equals the TTL.
    store.sweep(later(30)).await;
    let r: Result<(), TokenError> = store.consume_with(old.id, later(31), |_| Ok(())).await;
    assert_eq!(r.unwrap_err(), TokenError::Unknown(old.id));
    let r: Result<(), TokenError> = store.consume_with(fresh.id, later(31), |_| Ok(())).await;
    assert_eq!(r.unwrap_err(), TokenError::Expired(fresh.id));
}

#[tokio::test]
async fn longer_retention_keeps_tombstones_past_the_ttl() {
    let store = TokenStore::new(SignedDuration::from_mins(10)).with_retention(SignedDuration::from_hours(1));
    let token = store.issue(pending(), Vec::new(), t0()).await;
    let used: Result<(), TokenError> = store.consume_with(token.id, later(1), |_| Ok(())).await;
    assert!(used.is_ok());

    store.sweep(later(30)).await;
    let r: Result<(), TokenError> = store.consume_with(token.id, later(31), |_| Ok(())).await;
    assert_eq!(r.unwrap_err(), TokenError::Consumed(token.id));

    store.sweep(later(61)).await;
    let r: Result<(), TokenError> = store.consume_with(token.id, later(62), |_| Ok(())).await;
    assert_eq!(r.unwrap_err(), TokenError::Unknown(token.id));
}
