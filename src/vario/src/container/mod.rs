pub mod injector;
pub mod registry;

pub(crate) mod core;
mod handle;

use crate::util::any::AsAny;

pub use handle::Container;

/// An object whose creation can be managed by a container.
pub trait Managed: AsAny + Send + Sync + 'static {}

impl<T> Managed for T where T: AsAny + Send + Sync + 'static {}

/// A [`Managed`] object which can be cached and handed out to multiple
/// requests.
///
/// Cloning should be cheap and preserve identity, e.g. an `Arc<T>` or an
/// immutable value.
pub trait SharedManaged: Managed {
    fn dyn_clone(&self) -> Box<dyn SharedManaged>;

    fn upcast_managed(self: Box<Self>) -> Box<dyn Managed>;
}

impl<T> SharedManaged for T
where
    T: Managed + Clone,
{
    fn dyn_clone(&self) -> Box<dyn SharedManaged> {
        Box::new(self.clone())
    }

    fn upcast_managed(self: Box<Self>) -> Box<dyn Managed> {
        self
    }
}
