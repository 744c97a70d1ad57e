mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{DeriveInput, Result as SynResult};

/// Derives `vario::descriptor::Described`.
///
/// Non-generic types may list the types they can stand in for with
/// `#[described(extends(Base, Other))]`. Generic types declare the variance
/// of their type parameters with `#[described(covariant(T), contravariant(U))]`,
/// and parameters not listed are invariant. `#[described(name = "...")]`
/// overrides the display name.
///
/// `extends` must not form a cycle across types: `A` extending `B` while `B`
/// extends `A` overflows the stack when either descriptor is built.
#[proc_macro_derive(Described, attributes(described))]
pub fn derive_described(item: TokenStream) -> TokenStream {
    match derive_described_impl(item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_described_impl(item: TokenStream) -> SynResult<TokenStream2> {
    let input = syn::parse::<DeriveInput>(item)?;
    let attr_data = attrs::parse_attributes(&input.attrs)?;
    impls::expand_implementation(input, attr_data)
}
