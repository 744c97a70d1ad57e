#![allow(clippy::new_without_default)]

pub mod container;
pub mod descriptor;
pub mod lifetime;
pub mod module;
pub mod provider;
pub mod resolver;
mod util;

#[cfg(test)]
mod testing;

pub use vario_derive::Described;

pub mod prelude {
    pub use crate::container::injector::{Injector, InjectorError, TypedInjector};
    pub use crate::container::registry::{Configurer, Registry, RegistryError, TypedConfigurer};
    pub use crate::container::Container;
    pub use crate::descriptor::{self, Described, TypeDescriptor, Variance};
    pub use crate::module::{bind, bind_of, enable_variant_resolution, Module};
    pub use crate::resolver::{Resolution, TypeResolver, VariantResolutionExt};
}
