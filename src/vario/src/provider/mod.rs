pub mod closure;
pub mod context;
pub mod instance;

use std::fmt::Debug;

use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::{Managed, SharedManaged};

pub use context::CallContext;

/// A universal factory which constructs objects of one type.
///
/// A [`Provider`] is responsible for constructing an object on each request
/// and retrieving all dependencies from an [`Injector`].
///
/// In convention, a [`Provider`] is a stateless object and may be used by
/// multiple threads. Each request to a [`Provider`] should receive a new
/// object, unless the object is truly immutable.
///
/// Usually, you don't need to implement [`Provider`] manually, since this is
/// automatically done by [`TypedProvider`]'s blanket implementation.
pub trait Provider: Debug + Send + Sync + 'static {
    /// Provides a newly created type-erased object. An [`Injector`] is needed
    /// since the object may depend on other objects. The `context` describes
    /// the registration being constructed.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn dyn_provide(
        &self,
        injector: &dyn Injector,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError>;
}

/// A static variant of the [`Provider`] trait, leveraging static dispatch and
/// type-safety.
pub trait TypedProvider: Provider {
    /// The return type in response to each request to the provider.
    type Output: Managed;

    /// Provides a newly created object of type [`TypedProvider::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized;
}

impl<T: TypedProvider> Provider for T {
    fn dyn_provide(
        &self,
        injector: &dyn Injector,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.provide(injector, context)
            .map(|obj| -> Box<dyn Managed> { Box::new(obj) })
    }
}

/// A variant of the [`Provider`] trait, which produces a shareable object.
///
/// The shared ownership is managed by containers: each call still constructs
/// a new object, and the container decides whether to cache it.
pub trait SharedProvider: Provider {
    /// Provides a newly created shareable type-erased object.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn dyn_provide_shared(
        &self,
        injector: &dyn Injector,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn SharedManaged>, InjectorError>;
}

/// A static variant of the [`SharedProvider`] trait.
pub trait TypedSharedProvider: TypedProvider<Output: SharedManaged> {}

impl<T: TypedSharedProvider> SharedProvider for T {
    fn dyn_provide_shared(
        &self,
        injector: &dyn Injector,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn SharedManaged>, InjectorError> {
        self.provide(injector, context)
            .map(|obj| -> Box<dyn SharedManaged> { Box::new(obj) })
    }
}
