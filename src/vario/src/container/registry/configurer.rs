use std::error::Error;

use crate::container::registry::registration_map::{Registration, RegistrationMap};
use crate::container::registry::{Configurer, ConfigurerPrivate, RegistryError};
use crate::descriptor::TypeDescriptor;
use crate::provider::{Provider, SharedProvider};
use crate::resolver::{ResolverChain, TypeResolver};

pub struct ConfigurerImpl {
    registrations: RegistrationMap,
    resolvers: ResolverChain,
    errors: Vec<RegistryError>,
}

impl ConfigurerImpl {
    pub fn new() -> Self {
        Self {
            registrations: RegistrationMap::new(),
            resolvers: ResolverChain::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(RegistrationMap, ResolverChain), RegistryError> {
        if self.errors.is_empty() {
            Ok((self.registrations, self.resolvers))
        } else {
            Err(RegistryError::from_errors(self.errors))
        }
    }

    fn register_impl(&mut self, registration: Registration) {
        if self.registrations.contains(registration.service()) {
            self.errors.push(RegistryError::KeyDuplicated {
                service: registration.service().clone(),
            });
        } else {
            tracing::trace!(
                service = %registration.service(),
                lifetime = %registration.lifetime(),
                "registered service",
            );
            self.registrations.insert(registration);
        }
    }
}

impl Configurer for ConfigurerImpl {
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate {
        self
    }

    fn add_resolver(&mut self, resolver: Box<dyn TypeResolver>) {
        if !self.resolvers.push(resolver) {
            tracing::debug!("skipped a resolver which is already installed");
        }
    }

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }
}

impl ConfigurerPrivate for ConfigurerImpl {
    fn dyn_register(&mut self, service: TypeDescriptor, provider: Box<dyn Provider>) {
        self.register_impl(Registration::new_transient(service, provider));
    }

    fn dyn_register_shared(&mut self, service: TypeDescriptor, provider: Box<dyn SharedProvider>) {
        self.register_impl(Registration::new_singleton(service, provider));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::registry::TypedConfigurer;
    use crate::descriptor::Described;
    use crate::lifetime::Lifetime;
    use crate::provider::instance::InstanceProvider;
    use crate::resolver::VariantResolutionExt;
    use crate::testing::{self, BaseEvent};

    use super::*;

    #[test]
    fn configurer_impl_register_succeeds() {
        let mut configurer = ConfigurerImpl::new();
        configurer.register(i32::descriptor(), InstanceProvider::new(42i32));
        configurer.register_shared(
            testing::handler::<BaseEvent>(),
            InstanceProvider::new(Arc::new("handler")),
        );

        let (registrations, resolvers) = configurer.finish().unwrap();
        assert_eq!(
            registrations.get(&i32::descriptor()).map(Registration::lifetime),
            Some(Lifetime::Transient)
        );
        assert_eq!(
            registrations
                .get(&testing::handler::<BaseEvent>())
                .map(Registration::lifetime),
            Some(Lifetime::Singleton)
        );
        assert!(resolvers.is_empty());
    }

    #[test]
    fn configurer_impl_enable_variant_resolution_installs_once() {
        let mut configurer = ConfigurerImpl::new();
        configurer.enable_variant_resolution();
        configurer.enable_variant_resolution();

        let (_, resolvers) = configurer.finish().unwrap();
        assert_eq!(resolvers.len(), 1);
    }

    #[test]
    fn configurer_impl_finish_fails_when_service_is_duplicated() {
        let mut configurer = ConfigurerImpl::new();
        configurer.register(i32::descriptor(), InstanceProvider::new(42i32));
        configurer.register_shared(i32::descriptor(), InstanceProvider::new(42i32));

        let err = configurer.finish().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::KeyDuplicated { ref service } if *service == i32::descriptor()
        ));
    }

    #[test]
    fn configurer_impl_finish_aggregates_errors() {
        let mut configurer = ConfigurerImpl::new();
        configurer.register(i32::descriptor(), InstanceProvider::new(42i32));
        configurer.register(i32::descriptor(), InstanceProvider::new(42i32));
        configurer.report_module_error("test", "whatever".into());

        let err = configurer.finish().unwrap_err();
        let RegistryError::Aggregated { errors } = err else {
            panic!("errors should be aggregated");
        };
        assert!(matches!(errors[0], RegistryError::KeyDuplicated { .. }));
        assert!(matches!(errors[1], RegistryError::ModuleInner { .. }));
    }
}
