#![allow(dead_code)]

use gc_domain::registration::{NewRegistration, PaymentStatus, Registration, Team};
use gc_registrations::store::RegistrationStore;
use std::time::Duration;

pub fn attendee(event_id: &str, name: &str, phone: Option<&str>) -> NewRegistration {
    NewRegistration {
        event_id: event_id.to_owned(),
        full_name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: phone.map(str::to_owned),
        team: Some(Team::Blue),
        ..NewRegistration::default()
    }
}

pub fn ids(rows: &[Registration]) -> Vec<&str> {
    rows.iter().map(|r| r.id.as_str()).collect()
}

/// Creates rows with strictly increasing `created_at`.
pub async fn create_in_order(
    store: &dyn RegistrationStore,
    rows: Vec<NewRegistration>,
) -> Vec<Registration> {
    let mut created = Vec::new();
    for row in rows {
        created.push(store.create(row).await.unwrap());
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    created
}

/// Behaviour every store implementation must share.
pub async fn store_contract(store: &dyn RegistrationStore) {
    let created = create_in_order(
        store,
        vec![
            attendee("evt-1", "Ama Mensah", Some("0241234567")),
            attendee("evt-1", "Kofi Boateng", Some("233201112222")),
            attendee("evt-2", "Esi Owusu", None),
        ],
    )
    .await;
    let [ama, kofi, esi] = [&created[0], &created[1], &created[2]];

    assert_eq!(ama.payment_status, PaymentStatus::Pending);
    assert_eq!(ama.team, Some(Team::Blue));
    assert_eq!(store.count().await.unwrap(), 3);
    assert_eq!(store.get(&ama.id).await.unwrap().as_ref(), Some(ama));
    assert!(store.get("missing").await.unwrap().is_none());

    // Ordering
    let by_event = store.list_by_event("evt-1").await.unwrap();
    assert_eq!(ids(&by_event), [kofi.id.as_str(), ama.id.as_str()]);
    let recent = store.recent(2).await.unwrap();
    assert_eq!(ids(&recent), [esi.id.as_str(), kofi.id.as_str()]);

    // Pending lookups
    let variants = vec!["0241234567".to_owned(), "233241234567".to_owned()];
    let by_phone = store.latest_pending_by_phone(&variants).await.unwrap().unwrap();
    assert_eq!(by_phone.id, ama.id);
    assert!(store.latest_pending_by_phone(&["0000".to_owned()]).await.unwrap().is_none());
    assert_eq!(store.latest_pending().await.unwrap().unwrap().id, esi.id);

    // Reference recording only while pending
    let with_ref = store.record_reference(&ama.id, "GC-1-AAAAAA").await.unwrap().unwrap();
    assert_eq!(with_ref.payment_reference.as_deref(), Some("GC-1-AAAAAA"));
    let found = store.find_by_reference("GC-1-AAAAAA").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ama.id);

    // Compare-and-set
    let done = store
        .transition(&ama.id, PaymentStatus::Pending, PaymentStatus::Completed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.payment_status, PaymentStatus::Completed);
    assert!(
        store
            .transition(&ama.id, PaymentStatus::Pending, PaymentStatus::Failed)
            .await
            .unwrap()
            .is_none()
    );
    assert!(store.record_reference(&ama.id, "GC-2-BBBBBB").await.unwrap().is_none());
    assert!(store.latest_pending_by_phone(&variants).await.unwrap().is_none());

    // Delete
    assert!(store.delete(&esi.id).await.unwrap());
    assert!(!store.delete(&esi.id).await.unwrap());
    assert_eq!(store.count().await.unwrap(), 2);
}

pub async fn free_and_invalid_creation(store: &dyn RegistrationStore) {
    let mut free = attendee("evt-free", "Yaw Asante", None);
    free.payment_status = Some(PaymentStatus::Free);
    assert_eq!(store.create(free).await.unwrap().payment_status, PaymentStatus::Free);

    let mut completed = attendee("evt-free", "Abena Ofori", None);
    completed.payment_status = Some(PaymentStatus::Completed);
    assert!(store.create(completed).await.is_err());

    let mut blank_phone = attendee("evt-free", "Kwame Nkrumah", Some("  "));
    blank_phone.team = None;
    let created = store.create(blank_phone).await.unwrap();
    assert!(created.phone.is_none());
    assert!(created.team.is_none());
}
