use syn::parse::Parse;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{parenthesized, Attribute, Ident, LitStr, Result as SynResult, Type};

#[derive(Debug, Default)]
pub struct AttributeData {
    pub name: Option<LitStr>,
    pub extends: Vec<Type>,
    pub covariant: Vec<Ident>,
    pub contravariant: Vec<Ident>,
}

pub fn parse_attributes(attrs: &[Attribute]) -> SynResult<AttributeData> {
    let mut data = AttributeData::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("described")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                data.name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("extends") {
                let content;
                parenthesized!(content in meta.input);
                let types: Punctuated<Type, Comma> = content.parse_terminated(Type::parse, Comma)?;
                data.extends.extend(types);
                Ok(())
            } else if meta.path.is_ident("covariant") {
                meta.parse_nested_meta(|param| {
                    data.covariant.push(param.path.require_ident()?.clone());
                    Ok(())
                })
            } else if meta.path.is_ident("contravariant") {
                meta.parse_nested_meta(|param| {
                    data.contravariant.push(param.path.require_ident()?.clone());
                    Ok(())
                })
            } else {
                Err(meta.error(
                    "expects `name = \"...\"`, `extends(...)`, `covariant(...)` or `contravariant(...)`",
                ))
            }
        })?;
    }

    Ok(data)
}
