//! Code generation for synthesized interfaces.
//!
//! Renders a [`Synthesis`] as a Rust module targeting `httpgen_runtime`:
//! - the derived server trait (`<Name>HttpServer`)
//! - the registration function attaching every route to a router
//! - one handler function per registration entry
//!
//! Output depends only on the synthesis, so re-running on unchanged input
//! yields byte-identical text.

use heck::ToSnakeCase;
use httpgen_core::{
    BindBackend, BindStep, FieldPath, HandlerSpec, HandlerStep, Registration, ServerInterface,
    Synthesis,
};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::error::{ParseResult, err_call_site};
use crate::method::verb_to_token_stream;

pub const HEADER: &str = "// Code generated by httpgen. DO NOT EDIT.\n";

fn ident(name: &str) -> ParseResult<Ident> {
    syn::parse_str(name).map_err(|err| syn::Error::new(err.span(), format!("`{name}` is not a valid identifier")))
}

fn method_ident(name: &str) -> ParseResult<Ident> {
    ident(&name.to_snake_case())
}

fn parse_type(text: &str) -> ParseResult<syn::Type> {
    syn::parse_str(text).map_err(|err| syn::Error::new(err.span(), format!("`{text}` is not a valid type: {err}")))
}

fn doc_attrs(docs: &[String]) -> TokenStream {
    quote! { #(#[doc = #docs])* }
}

/// `root.a.b` for a field selector, `root` for the whole object.
fn member_tokens(root: &str, field: Option<&FieldPath>) -> ParseResult<TokenStream> {
    let root = ident(root)?;
    let segments = field
        .map(|field| field.segments().iter().map(|s| ident(s)).collect::<ParseResult<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();
    Ok(quote! { #root #(.#segments)* })
}

fn server_tokens(server: &ServerInterface) -> ParseResult<TokenStream> {
    let name = ident(&server.name)?;
    let docs = doc_attrs(&server.docs);
    let methods = server
        .methods
        .iter()
        .map(|method| {
            let name = method_ident(&method.name)?;
            let request = parse_type(&method.request)?;
            let response = parse_type(&method.response)?;
            let docs = doc_attrs(&method.docs);
            Ok(quote! {
                #docs
                fn #name(
                    &self,
                    carrier: ::httpgen_runtime::Carrier,
                    req: #request,
                ) -> impl ::core::future::Future<
                    Output = ::core::result::Result<#response, ::httpgen_runtime::Error>,
                > + Send;
            })
        })
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(quote! {
        #docs
        pub trait #name: Send + Sync + 'static {
            #(#methods)*
        }
    })
}

fn registration_tokens(registration: &Registration) -> ParseResult<TokenStream> {
    let name = ident(&registration.name)?;
    let server = ident(&registration.server)?;
    let routes = registration
        .entries
        .iter()
        .map(|entry| {
            let verb = verb_to_token_stream(&entry.verb);
            let path = &entry.path;
            let handler = ident(&entry.handler)?;
            Ok(quote! {
                router.route(#verb, #path, #handler(::std::sync::Arc::clone(&srv)));
            })
        })
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(quote! {
        pub fn #name<S: #server>(router: &mut ::httpgen_runtime::Router, srv: ::std::sync::Arc<S>) {
            #(#routes)*
        }
    })
}

fn bind_tokens(step: &BindStep, backend: BindBackend) -> ParseResult<TokenStream> {
    let (bind, target) = match step {
        BindStep::AttachPathParams => return Ok(quote! { carrier.attach_path_params(&cx); }),
        BindStep::BodyWhole => (quote! { bind_body }, member_tokens("req", None)?),
        BindStep::BodyField { field } => (quote! { bind_body }, member_tokens("req", Some(field))?),
        BindStep::Query => (quote! { bind_query }, member_tokens("req", None)?),
        BindStep::Path => (quote! { bind_path }, member_tokens("req", None)?),
    };
    let call = match backend {
        BindBackend::Framework => quote! { cx.#bind(&mut #target) },
        BindBackend::Carrier => quote! { carrier.#bind(&cx, &mut #target) },
    };
    Ok(quote! {
        if let ::core::result::Result::Err(err) = #call {
            return carrier.error(err);
        }
    })
}

fn handler_tokens(server: &Ident, spec: &HandlerSpec) -> ParseResult<TokenStream> {
    let name = ident(spec.name())?;
    let invocation = spec
        .invocation()
        .ok_or_else(|| err_call_site(format!("handler `{}` never invokes its method", spec.name())))?;
    let request = parse_type(&invocation.request)?;

    let mut body = Vec::with_capacity(spec.steps().len() + 1);
    body.push(quote! { let mut req = <#request as ::core::default::Default>::default(); });
    for step in spec.steps() {
        body.push(match step {
            HandlerStep::Bind(bind) => bind_tokens(bind, spec.backend())?,
            HandlerStep::Validate => quote! {
                if let ::core::result::Result::Err(err) = carrier.validate(&req) {
                    return carrier.error(err);
                }
            },
            HandlerStep::Invoke(invocation) => {
                let method = method_ident(&invocation.method)?;
                quote! {
                    let reply = match srv.#method(carrier.clone(), req).await {
                        ::core::result::Result::Ok(reply) => reply,
                        ::core::result::Result::Err(err) => return carrier.error(err),
                    };
                }
            }
            HandlerStep::Render { selector } => {
                let target = member_tokens("reply", selector.field())?;
                quote! { carrier.render(&#target) }
            }
        });
    }
    Ok(quote! {
        #[doc(hidden)]
        pub fn #name<S: #server>(srv: ::std::sync::Arc<S>) -> ::httpgen_runtime::Handler {
            ::httpgen_runtime::Handler::new(move |cx: ::httpgen_runtime::RequestContext| {
                let srv = ::std::sync::Arc::clone(&srv);
                async move {
                    let carrier = ::httpgen_runtime::Carrier::from_context(&cx);
                    #(#body)*
                }
            })
        }
    })
}

/// Token stream of the whole generated module.
pub fn module_tokens(synthesis: &Synthesis) -> ParseResult<TokenStream> {
    let server = server_tokens(&synthesis.server)?;
    let registration = registration_tokens(&synthesis.registration)?;
    let server_ident = ident(&synthesis.server.name)?;
    let handlers = synthesis
        .handlers
        .iter()
        .map(|spec| handler_tokens(&server_ident, spec))
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(quote! {
        #server
        #registration
        #(#handlers)*
    })
}

/// Generated source text, header included.
pub fn render_module(synthesis: &Synthesis) -> ParseResult<String> {
    let tokens = module_tokens(synthesis)?;
    Ok(format!("{HEADER}\n{tokens}\n"))
}
