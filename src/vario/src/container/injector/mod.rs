mod proxy;

use std::any;
use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::Managed;
use crate::descriptor::{Described, TypeDescriptor};
use crate::util::any::{AsAny, Downcast};

pub use crate::provider::context::CallContext;
pub(crate) use proxy::ContextForwardingInjectorProxy;

/// A type-erased source of managed objects.
#[cfg_attr(test, mockall::automock)]
pub trait Injector: Send + Sync {
    /// Returns an object of the requested service type.
    ///
    /// # Errors
    ///
    /// Returns an error if no registration can be found for `service`, the
    /// request is ambiguous, or the construction fails.
    fn dyn_get(&self, service: &TypeDescriptor) -> Result<Box<dyn Managed>, InjectorError>;

    /// Returns an object of the requested service type as a dependency of the
    /// registration described by `context`.
    ///
    /// # Errors
    ///
    /// See [`Injector::dyn_get`]. Additionally returns an error if the request
    /// closes a dependency cycle.
    fn dyn_get_dependency<'a>(
        &self,
        service: &TypeDescriptor,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError>;

    /// Returns the service types of all registrations.
    fn services(&self) -> Vec<TypeDescriptor>;
}

pub trait TypedInjector: Injector {
    /// Returns an object of the requested service type, downcast to `T`.
    ///
    /// # Errors
    ///
    /// See [`Injector::dyn_get`]. Additionally returns an error if the
    /// registration resolved for `service` doesn't produce a `T`.
    fn get<T>(&self, service: &TypeDescriptor) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        let object = self.dyn_get(service)?;
        match object.downcast::<T>() {
            Ok(object) => Ok(*object),
            Err(object) => TypeMismatchSnafu {
                service: service.clone(),
                expected: any::type_name::<T>(),
                actual: AsAny::type_name(&*object),
            }
            .fail(),
        }
    }

    /// Returns an object of the service type described by `D`, downcast to
    /// `T`.
    ///
    /// # Errors
    ///
    /// See [`TypedInjector::get`].
    fn get_of<D, T>(&self) -> Result<T, InjectorError>
    where
        D: Described + ?Sized,
        T: Managed,
    {
        self.get(&D::descriptor())
    }

    fn upcast_dyn(&self) -> &dyn Injector;
}

impl<T> TypedInjector for T
where
    T: Injector,
{
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

impl TypedInjector for dyn Injector + '_ {
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("could not find any registration for {service}"))]
    #[non_exhaustive]
    NotFound { service: TypeDescriptor },
    #[snafu(display(
        "could not resolve {requested} unambiguously: {} variant registrations match: {}",
        candidates.len(),
        CandidatesDisplayer::new(candidates),
    ))]
    #[non_exhaustive]
    AmbiguousVariantRegistration {
        requested: TypeDescriptor,
        candidates: Vec<TypeDescriptor>,
    },
    #[snafu(display("could not construct the object {service} which depends on itself somehow"))]
    #[non_exhaustive]
    CyclicDependency { service: TypeDescriptor },
    #[snafu(display("the object resolved for {service} is a {actual}, not a {expected}"))]
    #[non_exhaustive]
    TypeMismatch {
        service: TypeDescriptor,
        expected: &'static str,
        actual: &'static str,
    },
    #[snafu(display("could not construct the object {service}"))]
    #[non_exhaustive]
    ObjectConstruction {
        service: TypeDescriptor,
        source: Arc<dyn Error + Send + Sync>,
    },
}

struct CandidatesDisplayer<'a> {
    candidates: &'a [TypeDescriptor],
}

impl<'a> CandidatesDisplayer<'a> {
    fn new(candidates: &'a [TypeDescriptor]) -> Self {
        Self { candidates }
    }
}

impl Display for CandidatesDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, candidate) in self.candidates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{candidate}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, BaseEvent, DerivedEvent, LeafEvent};

    use super::*;

    #[test]
    fn typed_injector_get_succeeds() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .returning(|_| Ok(Box::new(42i32) as Box<dyn Managed>));

        assert_eq!(injector.get::<i32>(&i32::descriptor()).unwrap(), 42);
        assert_eq!(injector.get_of::<i32, i32>().unwrap(), 42);
    }

    #[test]
    fn typed_injector_get_fails_when_type_mismatches() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .returning(|_| Ok(Box::new(42i32) as Box<dyn Managed>));

        let res = injector.get::<String>(&i32::descriptor());
        assert!(matches!(
            res,
            Err(InjectorError::TypeMismatch {
                expected,
                actual: "i32",
                ..
            }) if expected == any::type_name::<String>()
        ));
    }

    #[test]
    fn ambiguous_variant_registration_display_succeeds() {
        let err = InjectorError::AmbiguousVariantRegistration {
            requested: testing::handler::<LeafEvent>(),
            candidates: vec![
                testing::handler::<BaseEvent>(),
                testing::handler::<DerivedEvent>(),
            ],
        };

        assert_eq!(
            err.to_string(),
            "could not resolve Handler<LeafEvent> unambiguously: 2 variant registrations match: \
             Handler<BaseEvent>, Handler<DerivedEvent>"
        );
    }
}
