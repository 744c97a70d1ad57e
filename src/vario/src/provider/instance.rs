use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{InjectorError, TypedInjector};
use crate::container::{Managed, SharedManaged};
use crate::provider::{CallContext, TypedProvider, TypedSharedProvider};

/// A [`TypedProvider`] serving a value prepared at configuration time.
///
/// Each request receives a clone of the value. Registered as a singleton, the
/// container clones it once into its cache, so an `Arc<T>` instance keeps its
/// identity for every request resolved to the registration, including
/// requests matched through variance.
pub struct InstanceProvider<T>
where
    T: Managed + Clone,
{
    instance: T,
}

impl<T> InstanceProvider<T>
where
    T: Managed + Clone,
{
    pub fn new(instance: T) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &T {
        &self.instance
    }
}

impl<T> Debug for InstanceProvider<T>
where
    T: Managed + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceProvider")
            .field("instance", &any::type_name::<T>())
            .finish()
    }
}

impl<T> TypedProvider for InstanceProvider<T>
where
    T: Managed + Clone,
{
    type Output = T;

    fn provide<I>(
        &self,
        _injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        tracing::trace!(service = %context.service(), "handing out a prepared instance");
        Ok(self.instance.clone())
    }
}

impl<T> TypedSharedProvider for InstanceProvider<T> where T: SharedManaged + Clone {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::core::ContainerCore;
    use crate::container::injector::Injector;
    use crate::container::registry::{Registration, RegistrationMap};
    use crate::resolver::{ResolverChain, VariantResolver};
    use crate::testing::{self, BaseEvent, DerivedEvent, LeafEvent};

    use super::*;

    struct Dispatcher {
        label: &'static str,
    }

    fn make_core(registration: Registration) -> ContainerCore {
        let mut registrations = RegistrationMap::new();
        registrations.insert(registration);
        let mut resolvers = ResolverChain::new();
        resolvers.push(Box::new(VariantResolver::new()));
        ContainerCore::new(registrations, resolvers)
    }

    #[test]
    fn instance_provider_debug_names_instance_type() {
        let provider = InstanceProvider::new(Arc::new(Dispatcher { label: "base" }));

        assert_eq!(provider.instance().label, "base");
        assert!(format!("{provider:?}").contains("Dispatcher"));
    }

    #[test]
    fn instance_provider_shares_instance_as_singleton_under_variance() {
        let instance = Arc::new(Dispatcher { label: "base" });
        let core = make_core(Registration::new_singleton(
            testing::handler::<BaseEvent>(),
            Box::new(InstanceProvider::new(Arc::clone(&instance))),
        ));

        let exact: Arc<Dispatcher> = core.get(&testing::handler::<BaseEvent>()).unwrap();
        let derived: Arc<Dispatcher> = core.get(&testing::handler::<DerivedEvent>()).unwrap();
        let leaf: Arc<Dispatcher> = core.get(&testing::handler::<LeafEvent>()).unwrap();

        assert!(Arc::ptr_eq(&exact, &instance));
        assert!(Arc::ptr_eq(&derived, &instance));
        assert!(Arc::ptr_eq(&leaf, &instance));
        // `instance`, the provider, the cache and the three handed out clones.
        assert_eq!(Arc::strong_count(&instance), 6);
    }

    #[test]
    fn instance_provider_clones_instance_per_request_as_transient() {
        let core = make_core(Registration::new_transient(
            testing::handler::<BaseEvent>(),
            Box::new(InstanceProvider::new(String::from("base"))),
        ));

        let mut exact: String = core.get(&testing::handler::<BaseEvent>()).unwrap();
        exact.push_str("-changed");
        let derived: String = core.get(&testing::handler::<DerivedEvent>()).unwrap();

        assert_eq!(derived, "base");
        assert_eq!(core.services(), vec![testing::handler::<BaseEvent>()]);
    }
}
