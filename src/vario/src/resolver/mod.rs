//! Strategies consulted when a requested service type has no exact
//! registration.

pub mod variant;

use std::fmt::Debug;

use crate::container::registry::Registration;
use crate::descriptor::TypeDescriptor;
use crate::util::any::AsAny;

pub use variant::{VariantResolutionExt, VariantResolver};

/// A fallback strategy of a container's resolution path.
///
/// A [`TypeResolver`] is invoked once per request whose service type has no
/// exact registration. It must treat `registrations` as a read-only snapshot
/// and return the same [`Resolution`] for the same inputs.
pub trait TypeResolver: AsAny + Debug + Send + Sync {
    fn try_resolve<'a>(
        &self,
        requested: &TypeDescriptor,
        registrations: &'a [Registration],
    ) -> Resolution<'a>;
}

/// The outcome of a [`TypeResolver`].
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The resolver takes no action and leaves the request to others.
    Unresolved,
    /// The request should be served by an existing registration.
    Resolved(&'a Registration),
    /// Several registrations could serve the request and none is preferred.
    Ambiguous(Vec<&'a Registration>),
}

impl<'a> Resolution<'a> {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Returns the service types of all registrations this outcome refers to.
    pub fn services(&self) -> Vec<&'a TypeDescriptor> {
        match self {
            Self::Unresolved => Vec::new(),
            Self::Resolved(registration) => vec![registration.service()],
            Self::Ambiguous(candidates) => candidates.iter().map(|r| r.service()).collect(),
        }
    }
}

/// The ordered [`TypeResolver`]s of a container. The first resolver which
/// takes action decides the outcome.
#[derive(Debug, Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn TypeResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `resolver` unless a resolver of the same type is already
    /// installed. Returns whether `resolver` was appended.
    pub fn push(&mut self, resolver: Box<dyn TypeResolver>) -> bool {
        let type_id = resolver.as_ref().as_any().type_id();
        if self
            .resolvers
            .iter()
            .any(|installed| installed.as_ref().as_any().type_id() == type_id)
        {
            false
        } else {
            self.resolvers.push(resolver);
            true
        }
    }

    pub fn resolve<'a>(
        &self,
        requested: &TypeDescriptor,
        registrations: &'a [Registration],
    ) -> Resolution<'a> {
        for resolver in &self.resolvers {
            let resolution = resolver.try_resolve(requested, registrations);
            if !resolution.is_unresolved() {
                tracing::trace!(
                    service = %requested,
                    resolver = AsAny::type_name(resolver.as_ref()),
                    "resolver took action",
                );
                return resolution;
            }
        }
        Resolution::Unresolved
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}
