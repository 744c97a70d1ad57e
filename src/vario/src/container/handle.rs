use std::sync::Arc;

use crate::container::core::ContainerCore;
use crate::container::injector::{CallContext, Injector, InjectorError};
use crate::container::registry::{ConfigurerImpl, Registration, Registry, RegistryError};
use crate::container::Managed;
use crate::descriptor::TypeDescriptor;
use crate::module::Module;

/// A cheaply clonable handle of a dependency-injection container.
#[derive(Clone)]
pub struct Container {
    core: Arc<ContainerCore>,
}

impl Container {
    /// Returns the registration which serves `requested`, without
    /// constructing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if no registration can be found or the request is
    /// ambiguous.
    pub fn registration_for(&self, requested: &TypeDescriptor) -> Result<&Registration, InjectorError> {
        self.core.find_registration(requested)
    }

    pub fn registrations(&self) -> &[Registration] {
        self.core.registrations().as_slice()
    }
}

impl Registry for Container {
    fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module,
    {
        let mut configurer = ConfigurerImpl::new();
        module.setup(&mut configurer);
        let (registrations, resolvers) = configurer.finish()?;
        tracing::debug!(
            registrations = registrations.len(),
            resolvers = resolvers.len(),
            "initialized container",
        );

        Ok(Self {
            core: Arc::new(ContainerCore::new(registrations, resolvers)),
        })
    }
}

impl Injector for Container {
    fn dyn_get(&self, service: &TypeDescriptor) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get(service)
    }

    fn dyn_get_dependency<'a>(
        &self,
        service: &TypeDescriptor,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get_dependency(service, context)
    }

    fn services(&self) -> Vec<TypeDescriptor> {
        self.core.services()
    }
}
