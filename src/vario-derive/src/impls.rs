use std::collections::HashSet;

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{parse_quote, DeriveInput, Error as SynError, GenericParam, Ident, Result as SynResult};

use crate::attrs::AttributeData;

#[derive(Debug)]
enum VarianceData {
    Invariant,
    Covariant,
    Contravariant,
}

impl VarianceData {
    fn variant(&self) -> Ident {
        match self {
            Self::Invariant => format_ident!("Invariant"),
            Self::Covariant => format_ident!("Covariant"),
            Self::Contravariant => format_ident!("Contravariant"),
        }
    }
}

pub fn expand_implementation(
    input: DeriveInput,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let type_params = get_type_params(&input)?;
    check_variance_params(&type_params, &attr_data)?;

    let ident = &input.ident;
    let name = match &attr_data.name {
        Some(name) => name.value(),
        None => ident.to_string(),
    };

    if type_params.is_empty() {
        expand_concrete_implementation(&input, &name, &attr_data)
    } else {
        expand_generic_implementation(&input, &name, &type_params, &attr_data)
    }
}

fn get_type_params(input: &DeriveInput) -> SynResult<Vec<Ident>> {
    input
        .generics
        .params
        .iter()
        .map(|param| match param {
            GenericParam::Type(ty) => Ok(ty.ident.clone()),
            GenericParam::Lifetime(lifetime) => Err(SynError::new(
                lifetime.lifetime.ident.span(),
                "`#[derive(Described)]` doesn't support lifetime parameters",
            )),
            GenericParam::Const(constant) => Err(SynError::new(
                constant.ident.span(),
                "`#[derive(Described)]` doesn't support const parameters",
            )),
        })
        .collect()
}

fn check_variance_params(type_params: &[Ident], attr_data: &AttributeData) -> SynResult<()> {
    let mut seen = HashSet::new();
    for param in attr_data.covariant.iter().chain(&attr_data.contravariant) {
        if !type_params.contains(param) {
            return Err(SynError::new(
                param.span(),
                format!("`{param}` is not a type parameter of this type"),
            ));
        }
        if !seen.insert(param) {
            return Err(SynError::new(
                param.span(),
                format!("the variance of `{param}` is declared more than once"),
            ));
        }
    }
    Ok(())
}

fn expand_concrete_implementation(
    input: &DeriveInput,
    name: &str,
    attr_data: &AttributeData,
) -> SynResult<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let supertypes = &attr_data.extends;

    Ok(quote! {
        impl #impl_generics ::vario::descriptor::Described for #ident #ty_generics #where_clause {
            fn descriptor() -> ::vario::descriptor::TypeDescriptor {
                ::vario::descriptor::TypeDescriptor::concrete::<Self>(
                    #name,
                    [#(<#supertypes as ::vario::descriptor::Described>::descriptor()),*],
                )
            }
        }
    })
}

fn expand_generic_implementation(
    input: &DeriveInput,
    name: &str,
    type_params: &[Ident],
    attr_data: &AttributeData,
) -> SynResult<TokenStream2> {
    if let Some(supertype) = attr_data.extends.first() {
        return Err(SynError::new(
            supertype.span(),
            "`extends(...)` is only supported on non-generic types",
        ));
    }

    let ident = &input.ident;
    let path = ident.to_string();
    let variances = type_params.iter().map(|param| {
        let variance = if attr_data.covariant.contains(param) {
            VarianceData::Covariant
        } else if attr_data.contravariant.contains(param) {
            VarianceData::Contravariant
        } else {
            VarianceData::Invariant
        };
        variance.variant()
    });

    let mut generics = input.generics.clone();
    let where_clause = generics.make_where_clause();
    for param in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::vario::descriptor::Described));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::vario::descriptor::Described for #ident #ty_generics #where_clause {
            fn descriptor() -> ::vario::descriptor::TypeDescriptor {
                const DEFINITION: ::vario::descriptor::GenericDefinition =
                    ::vario::descriptor::GenericDefinition::new(
                        ::core::concat!(::core::module_path!(), "::", #path),
                        #name,
                        &[#(::vario::descriptor::Variance::#variances),*],
                    );
                ::vario::descriptor::TypeDescriptor::constructed(
                    DEFINITION,
                    ::std::vec![#(<#type_params as ::vario::descriptor::Described>::descriptor()),*],
                )
            }
        }
    })
}
