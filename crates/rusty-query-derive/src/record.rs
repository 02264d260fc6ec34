// Code generation for #[derive(Record)]

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, Data, DeriveInput, Expr, ExprLit, Fields, GenericParam, Ident, Lit, LitStr, Meta,
};

/// A named field together with its binding tag
struct TaggedField {
    ident: Ident,
    tag: Option<LitStr>,
}

pub fn impl_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let fields = collect_fields(input)?;

    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::rusty_query::Reflect));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = fields.iter().map(|field| {
        let field_name = field.ident.to_string();
        match &field.tag {
            Some(tag) => quote! {
                ::rusty_query::Field::new(#field_name, ::core::option::Option::Some(#tag))
            },
            None => quote! {
                ::rusty_query::Field::new(#field_name, ::core::option::Option::None)
            },
        }
    });

    let idents: Vec<&Ident> = fields.iter().map(|field| &field.ident).collect();
    let indices: Vec<usize> = (0..fields.len()).collect();

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics ::rusty_query::Reflect for #name #ty_generics #where_clause {
            fn type_info() -> ::rusty_query::TypeInfo {
                ::rusty_query::TypeInfo::new(
                    ::core::any::type_name::<Self>(),
                    ::rusty_query::Kind::Record,
                )
            }

            fn reflect_type(&self) -> ::rusty_query::TypeInfo {
                <Self as ::rusty_query::Reflect>::type_info()
            }

            fn from_value(
                _value: ::rusty_query::Value,
            ) -> ::core::result::Result<Self, ::rusty_query::CoerceError> {
                ::core::result::Result::Err(
                    ::rusty_query::UnsupportedType::new(
                        <Self as ::rusty_query::Reflect>::type_info(),
                    )
                    .into(),
                )
            }

            fn set_value(
                &mut self,
                _value: ::rusty_query::Value,
            ) -> ::core::result::Result<(), ::rusty_query::CoerceError> {
                ::core::result::Result::Err(
                    ::rusty_query::UnsupportedType::new(
                        <Self as ::rusty_query::Reflect>::type_info(),
                    )
                    .into(),
                )
            }

            fn resolved_value(&self) -> ::core::option::Option<::rusty_query::Value> {
                ::core::option::Option::None
            }

            fn is_zero(&self) -> bool {
                true #(&& ::rusty_query::Reflect::is_zero(&self.#idents))*
            }

            fn as_record(&self) -> ::core::option::Option<&dyn ::rusty_query::Record> {
                ::core::option::Option::Some(self)
            }

            fn as_record_mut(&mut self) -> ::core::option::Option<&mut dyn ::rusty_query::Record> {
                ::core::option::Option::Some(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics ::rusty_query::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::rusty_query::Field] {
                const FIELDS: &[::rusty_query::Field] = &[#(#descriptors),*];
                FIELDS
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::rusty_query::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::rusty_query::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(expanded)
}

fn collect_fields(input: &DeriveInput) -> syn::Result<Vec<TaggedField>> {
    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ))
        }
    };

    let named = match &data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record requires a struct with named fields",
            ))
        }
    };

    named
        .iter()
        .map(|field| {
            // Named fields always carry an ident
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            Ok(TaggedField {
                ident,
                tag: query_tag(field)?,
            })
        })
        .collect()
}

/// Reads `#[query("key")]` or `#[query = "key"]`
fn query_tag(field: &syn::Field) -> syn::Result<Option<LitStr>> {
    let mut tag = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("query") {
            continue;
        }

        let lit = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string literal: #[query = \"key\"]",
                    ))
                }
            },
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected a key: #[query(\"key\")]",
                ))
            }
        };

        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[query] attribute"));
        }
        tag = Some(lit);
    }

    Ok(tag)
}
