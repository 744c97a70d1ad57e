pub mod dsl;

use std::any;
use std::error::Error;

use crate::container::registry::Configurer;

pub use dsl::{bind, bind_of, enable_variant_resolution};

/// A unit of configuration, which registers services and resolvers on a
/// [`Configurer`].
pub trait Module {
    /// Registers everything this module provides.
    ///
    /// # Errors
    ///
    /// Returns an error if the module can't set up its configuration, e.g. a
    /// required setting is missing.
    fn configure(&self, configurer: &mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Configures `configurer`, reporting an error of [`Module::configure`]
    /// to it.
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(any::type_name::<Self>(), err);
        }
    }
}

macro_rules! impl_module_for_tuples {
    ($($module:ident),+) => {
        impl<$($module),+> Module for ($($module,)+)
        where
            $($module: Module,)+
        {
            #[allow(non_snake_case)]
            fn configure(
                &self,
                configurer: &mut dyn Configurer,
            ) -> Result<(), Box<dyn Error + Send + Sync>> {
                let ($($module,)+) = self;
                $($module.setup(configurer);)+
                Ok(())
            }
        }
    };
}

impl_module_for_tuples!(A);
impl_module_for_tuples!(A, B);
impl_module_for_tuples!(A, B, C);
impl_module_for_tuples!(A, B, C, D);
