use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::{Managed, SharedManaged};
use crate::provider::{CallContext, TypedProvider, TypedSharedProvider};

/// A specialized form of [`Fn`] which accepts an [`Injector`] and constructs
/// objects.
///
/// The outer [`Result`] carries errors raised while fetching dependencies,
/// which are propagated untouched. The inner one carries errors of the
/// construction itself.
pub trait Closure
where
    Self: Fn(&dyn Injector) -> Result<Result<Self::Constructed, Self::Error>, InjectorError>,
    Self: Send + Sync + 'static,
{
    /// The successfully constructed object.
    type Constructed: Managed;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<Box<dyn Error + Send + Sync>>;
}

impl<F, T, E> Closure for F
where
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>>,
    Self: Fn(&dyn Injector) -> Result<Result<T, E>, InjectorError>,
    Self: Send + Sync + 'static,
{
    type Constructed = T;

    type Error = E;
}

/// A [`TypedProvider`] which delegates construction to a [`Closure`].
pub struct ClosureProvider<T, C>
where
    T: Managed,
    C: Closure<Constructed = T>,
{
    closure: C,
}

impl<T, C> ClosureProvider<T, C>
where
    T: Managed,
    C: Closure<Constructed = T>,
{
    pub fn new(closure: C) -> Self {
        Self { closure }
    }
}

impl<T, C> Debug for ClosureProvider<T, C>
where
    T: Managed,
    C: Closure<Constructed = T>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureProvider<T, C>").finish_non_exhaustive()
    }
}

impl<T, C> TypedProvider for ClosureProvider<T, C>
where
    T: Managed,
    C: Closure<Constructed = T>,
{
    type Output = T;

    fn provide<I>(
        &self,
        injector: &I,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        match (self.closure)(injector.upcast_dyn()) {
            Ok(Ok(obj)) => Ok(obj),
            Ok(Err(err)) => Err(InjectorError::ObjectConstruction {
                service: context.service().clone(),
                source: Arc::from(err.into()),
            }),
            Err(err) => Err(err),
        }
    }
}

impl<T, C> TypedSharedProvider for ClosureProvider<T, C>
where
    T: SharedManaged,
    C: Closure<Constructed = T>,
{
}
