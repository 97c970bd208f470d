use gc_domain::registration::Registration;

/// Published on the event bus after a registration row changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationChanged {
    pub registration: Registration,
}
