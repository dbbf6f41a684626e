//! `#[derive(Record)]` for nilmap
//!
//! Generates a `Record` impl whose shape is built once and cached, plus the
//! `Reflect` conversions between the struct and its record snapshot.
//!
//! Field attributes:
//!
//! - `#[nilmap(rename = "Name")]`: name seen by the field resolver
//! - `#[nilmap(readonly)]`: never written when the struct is a destination

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Type};

struct FieldInfo {
    ident: Ident,
    ty: Type,
    name: String,
    readonly: bool,
}

#[proc_macro_derive(Record, attributes(nilmap))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }
    let fields = parse_fields(input)?;

    let ident = &input.ident;
    let type_name = ident.unraw().to_string();

    let descs = fields.iter().map(|f| {
        let name = &f.name;
        let ty = &f.ty;
        let readonly = if f.readonly {
            quote! { .readonly() }
        } else {
            quote! {}
        };
        quote! {
            ::nilmap::FieldDesc::new(#name, <#ty as ::nilmap::Reflect>::type_desc()) #readonly
        }
    });

    let reads = fields.iter().map(|f| {
        let name = &f.name;
        let ty = &f.ty;
        let field = &f.ident;
        quote! {
            ::nilmap::FieldValue::new(
                #name,
                <#ty as ::nilmap::Reflect>::type_desc(),
                ::nilmap::Reflect::to_value(&self.#field),
            )
        }
    });

    let builds = fields.iter().map(|f| {
        let name = &f.name;
        let ty = &f.ty;
        let field = &f.ident;
        quote! {
            #field: <#ty as ::nilmap::Reflect>::from_value(record.take(#name)?)
                .map_err(|err| err.at(#name))?
        }
    });

    Ok(quote! {
        impl ::nilmap::Record for #ident {
            fn shape() -> &'static ::nilmap::Shape {
                static SHAPE: ::std::sync::OnceLock<::nilmap::Shape> = ::std::sync::OnceLock::new();
                SHAPE.get_or_init(|| {
                    ::nilmap::Shape::new(#type_name, ::std::vec![#(#descs),*])
                })
            }
        }

        impl ::nilmap::Reflect for #ident {
            fn type_desc() -> ::nilmap::TypeDesc {
                ::nilmap::TypeDesc::Record(<Self as ::nilmap::Record>::shape)
            }

            fn to_value(&self) -> ::nilmap::Value {
                ::nilmap::Value::Record(::nilmap::RecordValue::new(
                    #type_name,
                    ::std::vec![#(#reads),*],
                ))
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(value: ::nilmap::Value) -> ::nilmap::Result<Self> {
                let mut record = value.into_record()?;
                ::std::result::Result::Ok(Self {
                    #(#builds),*
                })
            }
        }
    })
}

fn parse_fields(input: &DeriveInput) -> syn::Result<Vec<FieldInfo>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record requires a struct with named fields",
        ));
    };

    let mut infos = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let mut name = ident.unraw().to_string();
        let mut readonly = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("nilmap") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("readonly") {
                    readonly = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    name = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported nilmap attribute"))
                }
            })?;
        }

        infos.push(FieldInfo {
            ident,
            ty: field.ty.clone(),
            name,
            readonly,
        });
    }
    Ok(infos)
}
