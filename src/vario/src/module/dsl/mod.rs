//! A fluent way to register services on a [`Configurer`].
//!
//! ```rust
//! # use std::error::Error;
//! # use vario::prelude::*;
//! struct AppModule;
//!
//! impl Module for AppModule {
//!     fn configure(
//!         &self,
//!         configurer: &mut dyn Configurer,
//!     ) -> Result<(), Box<dyn Error + Send + Sync>> {
//!         enable_variant_resolution(configurer);
//!         bind_of::<i32>().to_instance(42).as_singleton().set_on(configurer);
//!         Ok(())
//!     }
//! }
//!
//! let container = Container::init(AppModule).unwrap();
//! assert_eq!(container.get::<i32>(&descriptor::of::<i32>()).unwrap(), 42);
//! ```

mod provider_helper;

use std::error::Error;

use crate::container::injector::{Injector, InjectorError};
use crate::container::registry::Configurer;
use crate::container::Managed;
use crate::descriptor::{Described, TypeDescriptor};
use crate::lifetime::Transient;
use crate::provider::closure::ClosureProvider;
use crate::provider::instance::InstanceProvider;
use crate::provider::TypedProvider;
use crate::resolver::VariantResolutionExt;

pub use provider_helper::ProviderBinding;

/// Starts a binding of `service`.
pub fn bind(service: TypeDescriptor) -> Binding {
    Binding { service }
}

/// Starts a binding of the service type described by `D`.
pub fn bind_of<D>() -> Binding
where
    D: Described + ?Sized,
{
    bind(D::descriptor())
}

/// Lets the container serve generic service types without an exact
/// registration with a variance-compatible registration.
pub fn enable_variant_resolution(configurer: &mut dyn Configurer) {
    configurer.enable_variant_resolution();
}

pub struct Binding {
    service: TypeDescriptor,
}

impl Binding {
    pub fn to_instance<T>(self, instance: T) -> ProviderBinding<InstanceProvider<T>, Transient>
    where
        T: Managed + Clone,
    {
        self.to_provider(InstanceProvider::new(instance))
    }

    pub fn to_closure<T, E, F>(self, closure: F) -> ProviderBinding<ClosureProvider<T, F>, Transient>
    where
        T: Managed,
        E: Into<Box<dyn Error + Send + Sync>>,
        F: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError> + Send + Sync + 'static,
    {
        self.to_provider(ClosureProvider::new(closure))
    }

    pub fn to_provider<P>(self, provider: P) -> ProviderBinding<P, Transient>
    where
        P: TypedProvider,
    {
        ProviderBinding::new(self.service, provider, Transient)
    }
}
