mod common;

use gc_registrations::store::InMemoryRegistrationStore;

#[tokio::test]
async fn in_memory_store_honours_contract() {
    common::store_contract(&InMemoryRegistrationStore::new()).await;
}

#[tokio::test]
async fn in_memory_store_creation_rules() {
    common::free_and_invalid_creation(&InMemoryRegistrationStore::new()).await;
}
