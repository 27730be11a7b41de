use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Expr, GenericArgument, Ident, PathArguments, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token,
};

/// One `name: Type = default` entry of a `config!` block.
///
/// A nested section is written `name: Type (PartialType = default)`, in which
/// case the partial struct stores `PartialType` instead of `Option<Type>`.
struct ConfigField {
    name: Ident,
    ty: Type,
    default_value: Expr,
    partial_ty: Option<Type>,
}

impl Parse for ConfigField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty: Type = input.parse()?;

        let (partial_ty, default_value) = if input.peek(token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let partial_ty: Type = content.parse()?;
            content.parse::<Token![=]>()?;
            (Some(partial_ty), content.parse()?)
        } else {
            input.parse::<Token![=]>()?;
            (None, input.parse()?)
        };

        Ok(ConfigField {
            name,
            ty,
            default_value,
            partial_ty,
        })
    }
}

impl ConfigField {
    fn partial_type(&self) -> TokenStream2 {
        let ty = &self.ty;
        match &self.partial_ty {
            Some(partial) => quote! { #partial },
            None if is_option(ty) => quote! { #ty },
            None => quote! { Option<#ty> },
        }
    }

    fn accessors(&self) -> TokenStream2 {
        let name = &self.name;
        let ty = &self.ty;
        let with_name = format_ident!("with_{}", name);
        let set_name = format_ident!("set_{}", name);
        let get_name = format_ident!("get_{}", name);

        quote! {
            pub fn #with_name(mut self, #name: #ty) -> Self {
                self.#name = #name;
                self
            }
            pub fn #set_name(&mut self, #name: #ty) {
                self.#name = #name;
            }
            pub fn #get_name(&self) -> &#ty {
                &self.#name
            }
        }
    }
}

struct ConfigInput {
    vis: Visibility,
    name: Ident,
    fields: Punctuated<ConfigField, Token![,]>,
}

impl Parse for ConfigInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let vis: Visibility = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name: Ident = input.parse()?;
        let content;
        syn::braced!(content in input);
        let fields = content.parse_terminated(ConfigField::parse, Token![,])?;
        Ok(ConfigInput { vis, name, fields })
    }
}

/// Heuristic to check if a type is `Option<T>`, so it is not wrapped twice.
fn is_option(ty: &Type) -> bool {
    if let Type::Path(tp) = ty
        && let Some(seg) = tp.path.segments.last()
        && seg.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &seg.arguments
    {
        return args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_));
    }
    false
}

/// Declares a configuration struct together with a `Partial*` twin that is
/// deserialized from TOML. Missing entries fall back to the declared defaults.
#[proc_macro]
pub fn config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ConfigInput);
    let vis = &input.vis;
    let struct_name = &input.name;
    let partial_struct_name = format_ident!("Partial{}", struct_name);

    let names = input.fields.iter().map(|f| &f.name).collect::<Vec<_>>();
    let types = input.fields.iter().map(|f| &f.ty).collect::<Vec<_>>();
    let defaults = input
        .fields
        .iter()
        .map(|f| &f.default_value)
        .collect::<Vec<_>>();
    let partial_types = input.fields.iter().map(ConfigField::partial_type);
    let accessors = input.fields.iter().map(ConfigField::accessors);

    let expanded = quote! {
        #[derive(Debug, Clone, serde::Serialize)]
        #vis struct #struct_name {
            #( #names: #types, )*
        }

        #[derive(Debug, Clone, Default, serde::Deserialize)]
        #vis struct #partial_struct_name {
            #( #names: #partial_types, )*
        }

        impl #struct_name {
            pub fn from_partial(partial: #partial_struct_name) -> Self {
                use crate::config::IntoOr;
                Self {
                    #( #names: partial.#names.into_or(#defaults), )*
                }
            }
            pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
                Ok(Self::from_partial(toml::from_str(content)?))
            }
            pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
                let canonic_path = std::fs::canonicalize(file_path)?;
                let content = std::fs::read_to_string(canonic_path)?;
                Self::from_toml_str(&content)
            }
            pub fn from_optional_file<P: AsRef<std::path::Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
                match file_path {
                    Some(p) => Self::from_file(p),
                    None => Ok(Self::default())
                }
            }
            #( #accessors )*
        }

        impl Default for #struct_name {
            fn default() -> Self {
                #struct_name {
                    #( #names: #defaults, )*
                }
            }
        }

        impl crate::config::IntoOr<#struct_name> for Option<#partial_struct_name> {
            fn into_or(self, or: #struct_name) -> #struct_name {
                match self {
                    Some(t) => #struct_name::from_partial(t),
                    None => or
                }
            }
        }
    };
    TokenStream::from(expanded)
}
