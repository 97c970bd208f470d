use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

const DEFAULT_CAPACITY: usize = 128;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` implements it.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct ChannelState {
    capacity: usize,
    sender: Box<dyn Any + Send + Sync>,
}

/// Thread-safe registry of broadcast channels keyed by the event's [`TypeId`].
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to events of type `T` with the default buffer.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes with an explicit buffer capacity.
    ///
    /// The capacity only applies when this call creates the channel.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        if capacity == 0 {
            return Err(EventBusError::InvalidCapacity {
                message: "capacity must be >= 1".into(),
                context: Some(std::any::type_name::<T>().into()),
            });
        }
        Ok(self.sender::<T>(capacity)?.subscribe())
    }

    /// Publishes `event` to every current subscriber and returns how many received it.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.sender::<T>(DEFAULT_CAPACITY)?;
        Ok(sender.send(event).map_or_else(
            |_| {
                trace!(event = std::any::type_name::<T>(), "Event dropped: no active subscribers");
                0
            },
            |count| {
                trace!(event = std::any::type_name::<T>(), count, "Event dispatched");
                count
            },
        ))
    }

    /// Drops every channel, closing all receivers. Returns the number of channels closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn sender<T: Event>(&self, capacity: usize) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(state) = self.channels.read().get(&id) {
            return downcast::<T>(state, capacity);
        }

        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), capacity, "Initializing event channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState { capacity, sender: Box::new(tx) }
        });
        downcast::<T>(state, capacity)
    }
}

fn downcast<T: Event>(
    state: &ChannelState,
    requested: usize,
) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
    if requested != DEFAULT_CAPACITY && state.capacity != requested {
        warn!(
            event = std::any::type_name::<T>(),
            existing_capacity = state.capacity,
            requested_capacity = requested,
            "Broadcast channel already initialized with a different capacity"
        );
    }
    state.sender.downcast_ref::<broadcast::Sender<Arc<T>>>().cloned().ok_or_else(|| {
        EventBusError::TypeMismatch {
            message: std::any::type_name::<T>().into(),
            context: Some("Unexpected event type".into()),
        }
    })
}
