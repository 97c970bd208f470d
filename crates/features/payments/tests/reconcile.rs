mod common;

use common::{fixture, seed};
use gc_domain::config::PaymentsConfig;
use gc_domain::registration::PaymentStatus::{Completed, Failed, Free, Pending};
use gc_payments::models::{MatchStrategy, WebhookAck};
use gc_registrations::store::RegistrationStore;
use serde_json::json;

async fn status_of(f: &common::Fixture, id: &str) -> gc_domain::registration::PaymentStatus {
    f.store.get(id).await.unwrap().unwrap().payment_status
}

#[tokio::test]
async fn exact_reference_settles_only_that_registration() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, Some("0241234567"), Pending, Some("GC-1700000000000-AB12CD"));
    seed(&f.store, "r2", 2, Some("0241234567"), Pending, None);

    let result = f
        .payments
        .reconcile(&json!({"reference": "GC-1700000000000-AB12CD", "status": "success"}))
        .await
        .unwrap();

    let ack = WebhookAck::from(result);
    assert!(ack.matched);
    assert_eq!(ack.registration_id.as_deref(), Some("r1"));
    assert_eq!(ack.status, Some(Completed));
    assert_eq!(ack.strategy, Some(MatchStrategy::Reference));
    assert_eq!(status_of(&f, "r1").await, Completed);
    assert_eq!(status_of(&f, "r2").await, Pending);
}

#[tokio::test]
async fn phone_fallback_matches_local_format() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, Some("0241234567"), Pending, None);
    seed(&f.store, "r2", 2, Some("0551112222"), Pending, None);

    let result = f
        .payments
        .reconcile(&json!({"transaction_status": "declined", "msisdn": "233241234567"}))
        .await
        .unwrap();

    assert_eq!(result.status, Failed);
    let (registration, strategy) = result.matched.unwrap();
    assert_eq!(registration.id, "r1");
    assert_eq!(strategy, MatchStrategy::Phone);
    assert_eq!(status_of(&f, "r2").await, Pending);
}

#[tokio::test]
async fn phone_fallback_picks_newest_pending() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "old", 1, Some("233241234567"), Pending, None);
    seed(&f.store, "new", 5, Some("0241234567"), Pending, None);
    seed(&f.store, "paid", 9, Some("0241234567"), Completed, None);

    let result =
        f.payments.reconcile(&json!({"status": "approved", "phone": "0241234567"})).await.unwrap();
    assert_eq!(result.matched.unwrap().0.id, "new");
    assert_eq!(status_of(&f, "old").await, Pending);
}

#[tokio::test]
async fn unknown_reference_and_phone_fall_back_to_latest_pending() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, Some("0241234567"), Pending, Some("GC-1-AAAAAA"));
    seed(&f.store, "r2", 3, None, Pending, None);
    seed(&f.store, "r3", 7, None, Free, None);

    let result = f
        .payments
        .reconcile(&json!({
            "reference": "GC-9-ZZZZZZ",
            "accountNumber": "0209999999",
            "status": "successful"
        }))
        .await
        .unwrap();

    let (registration, strategy) = result.matched.unwrap();
    assert_eq!(registration.id, "r2");
    assert_eq!(strategy, MatchStrategy::LatestPending);
    assert_eq!(status_of(&f, "r3").await, Free);
}

#[tokio::test]
async fn nothing_pending_means_no_match() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, Some("0241234567"), Completed, None);

    let ack = WebhookAck::from(
        f.payments.reconcile(&json!({"status": "success", "phone": "0241234567"})).await.unwrap(),
    );
    assert!(ack.received);
    assert!(!ack.matched);
    assert!(ack.registration_id.is_none());
    assert_eq!(ack.status, Some(Completed));
}

#[tokio::test]
async fn ambiguous_reference_falls_through() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "dup1", 1, None, Pending, Some("GC-1-DUPDUP"));
    seed(&f.store, "dup2", 2, None, Pending, Some("GC-1-DUPDUP"));
    seed(&f.store, "phone", 0, Some("0241234567"), Pending, None);

    let result = f
        .payments
        .reconcile(&json!({"reference": "GC-1-DUPDUP", "status": "success", "phone": "0241234567"}))
        .await
        .unwrap();

    let (registration, strategy) = result.matched.unwrap();
    assert_eq!((registration.id.as_str(), strategy), ("phone", MatchStrategy::Phone));
    assert_eq!(status_of(&f, "dup1").await, Pending);
    assert_eq!(status_of(&f, "dup2").await, Pending);
}

#[tokio::test]
async fn repeated_callback_is_idempotent() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, None, Pending, Some("GC-1-AAAAAA"));
    seed(&f.store, "other", 2, None, Pending, None);

    let payload = json!({"payment_reference": "GC-1-AAAAAA", "status": "completed"});
    for _ in 0..2 {
        let result = f.payments.reconcile(&payload).await.unwrap();
        assert_eq!(result.matched.unwrap().0.id, "r1");
    }
    assert_eq!(status_of(&f, "other").await, Pending);
}

#[tokio::test]
async fn settled_registrations_keep_their_status() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, None, Completed, Some("GC-1-AAAAAA"));
    seed(&f.store, "bystander", 2, None, Pending, None);

    let result =
        f.payments.reconcile(&json!({"reference": "GC-1-AAAAAA", "status": "failed"})).await.unwrap();

    assert!(result.matched.is_none());
    assert_eq!(status_of(&f, "r1").await, Completed);
    // The cascade stops; a replay must not settle an unrelated registration.
    assert_eq!(status_of(&f, "bystander").await, Pending);
}

#[tokio::test]
async fn terminal_overwrite_when_guard_disabled() {
    let mut config = PaymentsConfig::default();
    config.webhook.protect_terminal_status = false;
    let f = fixture(&config);
    seed(&f.store, "r1", 1, None, Completed, Some("GC-1-AAAAAA"));
    seed(&f.store, "free", 2, None, Free, Some("GC-1-FREEEE"));

    let result =
        f.payments.reconcile(&json!({"reference": "GC-1-AAAAAA", "status": "failed"})).await.unwrap();
    assert_eq!(result.matched.unwrap().0.payment_status, Failed);
    assert_eq!(status_of(&f, "r1").await, Failed);

    let result = f
        .payments
        .reconcile(&json!({"reference": "GC-1-FREEEE", "status": "success"}))
        .await
        .unwrap();
    assert!(result.matched.is_none());
    assert_eq!(status_of(&f, "free").await, Free);
}

#[tokio::test]
async fn numeric_hints_are_accepted() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, Some("233241234567"), Pending, Some("88812345"));

    let result =
        f.payments.reconcile(&json!({"transactionId": 88_812_345, "status": "SUCCESS"})).await.unwrap();
    assert_eq!(result.reference.as_deref(), Some("88812345"));
    assert_eq!(result.matched.unwrap().1, MatchStrategy::Reference);
}

#[tokio::test]
async fn settlement_wakes_status_waiters() {
    let f = fixture(&PaymentsConfig::default());
    seed(&f.store, "r1", 1, None, Pending, Some("GC-1-AAAAAA"));

    let waiter = {
        let registrations = f.registrations.clone();
        tokio::spawn(async move {
            registrations.wait_for_settlement("r1", std::time::Duration::from_secs(10)).await
        })
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    f.payments.reconcile(&json!({"reference": "GC-1-AAAAAA", "status": "success"})).await.unwrap();
    let settled = waiter.await.unwrap().unwrap();
    assert_eq!(settled.payment_status, Completed);
}
