//! Type-erased container for initialized feature slices (payments, registrations, ...).

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Feature state that can be shared across request handlers.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// A slice ready to be registered on the server state.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    /// Type name, for startup logs.
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: std::any::type_name::<T>(), state: Box::new(state) }
    }

    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Payments(u8);

    impl FeatureSlice for Payments {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn slice_keeps_type_identity() {
        let slice = InitializedSlice::new(Payments(7));
        assert_eq!(slice.id, TypeId::of::<Payments>());
        assert!(slice.name.ends_with("Payments"));
        assert_eq!(slice.downcast_ref::<Payments>().map(|p| p.0), Some(7));
    }
}
