use httpgen_core::{HttpMethod, Verb};
use proc_macro2::TokenStream;
use quote::quote;

/// Convert a route verb to the runtime's method constant
pub fn verb_to_token_stream(verb: &Verb) -> TokenStream {
    match verb {
        Verb::Standard(HttpMethod::Get) => quote! { ::httpgen_runtime::Method::GET },
        Verb::Standard(HttpMethod::Post) => quote! { ::httpgen_runtime::Method::POST },
        Verb::Standard(HttpMethod::Put) => quote! { ::httpgen_runtime::Method::PUT },
        Verb::Standard(HttpMethod::Patch) => quote! { ::httpgen_runtime::Method::PATCH },
        Verb::Standard(HttpMethod::Delete) => quote! { ::httpgen_runtime::Method::DELETE },
        Verb::Custom(name) => quote! { ::httpgen_runtime::Method::custom(#name) },
    }
}
