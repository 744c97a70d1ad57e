use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::Managed;
use crate::descriptor::TypeDescriptor;
use crate::provider::context::CallContext;

/// An [`Injector`] handed to providers, which turns every plain request into
/// a dependency request of the registration being constructed.
pub struct ContextForwardingInjectorProxy<'a, I>
where
    I: TypedInjector + ?Sized,
{
    inner: &'a I,
    context: &'a CallContext<'a>,
}

impl<'a, I> ContextForwardingInjectorProxy<'a, I>
where
    I: TypedInjector + ?Sized,
{
    pub fn new(inner: &'a I, context: &'a CallContext<'a>) -> Self {
        Self { inner, context }
    }
}

impl<I> Injector for ContextForwardingInjectorProxy<'_, I>
where
    I: TypedInjector + ?Sized,
{
    fn dyn_get(&self, service: &TypeDescriptor) -> Result<Box<dyn Managed>, InjectorError> {
        self.dyn_get_dependency(service, self.context)
    }

    fn dyn_get_dependency<'a>(
        &self,
        service: &TypeDescriptor,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.inner.dyn_get_dependency(service, context)
    }

    fn services(&self) -> Vec<TypeDescriptor> {
        self.inner.services()
    }
}
