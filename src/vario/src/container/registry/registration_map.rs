use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::mem;

use crate::descriptor::TypeDescriptor;
use crate::lifetime::Lifetime;
use crate::provider::{Provider, SharedProvider};

/// An existing mapping from a service type to the provider constructing it.
///
/// Registrations are owned by a container and immutable once the container
/// is built. [`TypeResolver`]s only read them.
///
/// [`TypeResolver`]: crate::resolver::TypeResolver
pub struct Registration {
    service: TypeDescriptor,
    provider: RegisteredProvider,
}

pub(crate) enum RegisteredProvider {
    Singleton(Box<dyn SharedProvider>),
    Transient(Box<dyn Provider>),
}

impl Registration {
    pub(crate) fn new_singleton(service: TypeDescriptor, provider: Box<dyn SharedProvider>) -> Self {
        Self {
            service,
            provider: RegisteredProvider::Singleton(provider),
        }
    }

    pub(crate) fn new_transient(service: TypeDescriptor, provider: Box<dyn Provider>) -> Self {
        Self {
            service,
            provider: RegisteredProvider::Transient(provider),
        }
    }

    /// Returns the service type this registration provides.
    pub fn service(&self) -> &TypeDescriptor {
        &self.service
    }

    pub fn lifetime(&self) -> Lifetime {
        match self.provider {
            RegisteredProvider::Singleton(_) => Lifetime::Singleton,
            RegisteredProvider::Transient(_) => Lifetime::Transient,
        }
    }

    pub(crate) fn provider(&self) -> &RegisteredProvider {
        &self.provider
    }
}

impl Debug for Registration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let provider: &dyn Debug = match &self.provider {
            RegisteredProvider::Singleton(provider) => provider,
            RegisteredProvider::Transient(provider) => provider,
        };
        f.debug_struct("Registration")
            .field("service", &self.service)
            .field("lifetime", &self.lifetime())
            .field("provider", provider)
            .finish()
    }
}

/// All registrations of a container, in registration order.
#[derive(Debug, Default)]
pub struct RegistrationMap {
    registrations: Vec<Registration>,
    index: HashMap<TypeDescriptor, usize>,
}

impl RegistrationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a registration, returning the one it replaces, if any.
    pub fn insert(&mut self, registration: Registration) -> Option<Registration> {
        if let Some(&i) = self.index.get(registration.service()) {
            Some(mem::replace(&mut self.registrations[i], registration))
        } else {
            self.index
                .insert(registration.service().clone(), self.registrations.len());
            self.registrations.push(registration);
            None
        }
    }

    /// Returns the registration whose service type is exactly `service`.
    pub fn get(&self, service: &TypeDescriptor) -> Option<&Registration> {
        self.index.get(service).map(|&i| &self.registrations[i])
    }

    pub fn contains(&self, service: &TypeDescriptor) -> bool {
        self.index.contains_key(service)
    }

    pub fn as_slice(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn services(&self) -> Vec<TypeDescriptor> {
        self.registrations
            .iter()
            .map(|registration| registration.service().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::descriptor::Described;
    use crate::provider::instance::InstanceProvider;
    use crate::testing::{self, BaseEvent, DerivedEvent, LeafEvent};

    use super::*;

    #[test]
    fn registration_map_insert_succeeds() {
        let mut map = RegistrationMap::new();
        assert!(map
            .insert(Registration::new_transient(
                i32::descriptor(),
                Box::new(InstanceProvider::new(42i32))
            ))
            .is_none());
        assert!(map
            .insert(Registration::new_singleton(
                testing::handler::<BaseEvent>(),
                Box::new(InstanceProvider::new("base"))
            ))
            .is_none());

        let replaced = map.insert(Registration::new_singleton(
            i32::descriptor(),
            Box::new(InstanceProvider::new(0i32)),
        ));
        assert_eq!(replaced.map(|r| r.lifetime()), Some(Lifetime::Transient));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&i32::descriptor()).map(Registration::lifetime), Some(Lifetime::Singleton));
    }

    #[test]
    fn registration_map_preserves_registration_order() {
        let mut map = RegistrationMap::new();
        for service in [
            testing::handler::<DerivedEvent>(),
            i32::descriptor(),
            testing::handler::<BaseEvent>(),
        ] {
            map.insert(Registration::new_transient(
                service,
                Box::new(InstanceProvider::new(0u8)),
            ));
        }

        assert_eq!(
            map.services(),
            vec![
                testing::handler::<DerivedEvent>(),
                i32::descriptor(),
                testing::handler::<BaseEvent>(),
            ]
        );
        assert!(map.contains(&i32::descriptor()));
        assert!(!map.contains(&i64::descriptor()));
        assert!(map.get(&testing::handler::<LeafEvent>()).is_none());
    }
}
