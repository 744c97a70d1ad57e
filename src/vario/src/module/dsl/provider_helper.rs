use crate::container::registry::{Configurer, TypedConfigurer};
use crate::descriptor::TypeDescriptor;
use crate::lifetime::{Singleton, Transient};
use crate::provider::{TypedProvider, TypedSharedProvider};

pub struct ProviderBinding<P, L>
where
    P: TypedProvider,
{
    service: TypeDescriptor,
    provider: P,
    _lifetime: L,
}

impl<P, L> ProviderBinding<P, L>
where
    P: TypedProvider,
{
    pub(super) fn new(service: TypeDescriptor, provider: P, lifetime: L) -> Self {
        Self {
            service,
            provider,
            _lifetime: lifetime,
        }
    }

    pub fn as_transient(self) -> ProviderBinding<P, Transient> {
        ProviderBinding::new(self.service, self.provider, Transient)
    }
}

impl<P, L> ProviderBinding<P, L>
where
    P: TypedSharedProvider,
{
    pub fn as_singleton(self) -> ProviderBinding<P, Singleton> {
        ProviderBinding::new(self.service, self.provider, Singleton)
    }
}

impl<P> ProviderBinding<P, Transient>
where
    P: TypedProvider,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.service, self.provider);
    }
}

impl<P> ProviderBinding<P, Singleton>
where
    P: TypedSharedProvider,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register_shared(self.service, self.provider);
    }
}
