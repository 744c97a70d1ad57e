mod configurer;
mod registration_map;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use snafu::prelude::*;

use crate::descriptor::TypeDescriptor;
use crate::module::Module;
use crate::provider::{Provider, SharedProvider, TypedProvider, TypedSharedProvider};
use crate::resolver::TypeResolver;

pub(crate) use configurer::ConfigurerImpl;
pub use registration_map::{Registration, RegistrationMap};

pub(crate) use registration_map::RegisteredProvider;

pub trait Registry: Sized + Send + Sync + 'static {
    /// Builds `Self` from everything `module` configures.
    ///
    /// # Errors
    ///
    /// Returns an error if `module` fails or registers a service type twice.
    fn init<M>(module: M) -> Result<Self, RegistryError>
    where
        M: Module;
}

/// Collects registrations and resolvers while a [`Module`] is configured.
pub trait Configurer: Send + Sync {
    #[doc(hidden)]
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate;

    /// Appends a [`TypeResolver`] consulted for service types without an
    /// exact registration. A resolver of an already installed type is
    /// ignored.
    fn add_resolver(&mut self, resolver: Box<dyn TypeResolver>);

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>);
}

trait ConfigurerPrivate: Configurer {
    fn dyn_register(&mut self, service: TypeDescriptor, provider: Box<dyn Provider>);

    fn dyn_register_shared(&mut self, service: TypeDescriptor, provider: Box<dyn SharedProvider>);
}

pub trait TypedConfigurer: Configurer {
    /// Registers `provider` as the transient provider of `service`.
    fn register<P>(&mut self, service: TypeDescriptor, provider: P)
    where
        P: TypedProvider,
    {
        self.as_private().dyn_register(service, Box::new(provider));
    }

    /// Registers `provider` as the singleton provider of `service`.
    fn register_shared<P>(&mut self, service: TypeDescriptor, provider: P)
    where
        P: TypedSharedProvider,
    {
        self.as_private()
            .dyn_register_shared(service, Box::new(provider));
    }
}

impl<T: Configurer + ?Sized> TypedConfigurer for T {}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("the service {service} is already registered"))]
    #[non_exhaustive]
    KeyDuplicated { service: TypeDescriptor },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated registry errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<RegistryError> },
}

impl RegistryError {
    fn from_errors(mut errors: Vec<RegistryError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Self::Aggregated { errors }
        }
    }
}

struct AggregatedDisplayer<'a> {
    errors: &'a [RegistryError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [RegistryError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}
