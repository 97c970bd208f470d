use gc_event_bus::{EventBus, EventBusError, EventReceiverExt};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
struct StatusChanged(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Other(usize);

#[tokio::test]
async fn published_event_reaches_subscriber() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<StatusChanged>().unwrap();

    let delivered = bus.publish(StatusChanged(42)).unwrap();
    assert_eq!(delivered, 1);

    let received = rx.recv_event().await.unwrap();
    assert_eq!(*received, StatusChanged(42));
}

#[tokio::test]
async fn publish_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(StatusChanged(1)).unwrap(), 0);
}

#[tokio::test]
async fn lagging_receiver_recovers_with_fresh_tail() {
    let bus = EventBus::new();
    let capacity = 2;
    let mut rx = bus.subscribe_with_capacity::<StatusChanged>(capacity).unwrap();

    let total = 100;
    for i in 0..total {
        bus.publish(StatusChanged(i)).unwrap();
    }

    let first = rx.recv_event().await.unwrap();
    assert!(first.0 >= total - capacity, "expected fresh tail, got {}", first.0);

    let second = rx.recv_event().await.unwrap();
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn every_subscriber_receives_a_copy() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<StatusChanged>().unwrap();
    let mut rx2 = bus.subscribe::<StatusChanged>().unwrap();

    bus.publish(StatusChanged(100)).unwrap();

    assert_eq!(rx1.recv_event().await.unwrap().0, 100);
    assert_eq!(rx2.recv_event().await.unwrap().0, 100);
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut rx_status = bus.subscribe::<StatusChanged>().unwrap();
    let mut rx_other = bus.subscribe::<Other>().unwrap();

    bus.publish(Other(13)).unwrap();
    bus.publish(StatusChanged(7)).unwrap();

    assert_eq!(rx_status.recv_event().await.unwrap().0, 7);
    assert_eq!(rx_other.recv_event().await.unwrap().0, 13);
}

#[tokio::test]
async fn zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<StatusChanged>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<StatusChanged>().unwrap();

    assert_eq!(bus.shutdown(), 1);

    let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv_event()).await.unwrap();
    assert!(closed.is_none());
}

#[tokio::test]
async fn clones_share_channels() {
    let bus = EventBus::new();
    let publisher = bus.clone();
    let mut rx = bus.subscribe::<StatusChanged>().unwrap();

    tokio::spawn(async move {
        publisher.publish(StatusChanged(5)).unwrap();
    })
    .await
    .unwrap();

    assert_eq!(rx.recv_event().await.unwrap().0, 5);
}
