//! Code generation for the `#[controller]` attribute.
//!
//! Emits the original impl block (route annotations stripped) plus a
//! `Controller` trait implementation that replays the annotations into the
//! route registry and binds handler names to instance methods.

use proc_macro2::TokenStream;
use quote::quote;

use crate::crate_path::dekor_core_path;
use crate::parsing::{self, ControllerArgs, ControllerImplDef, RouteMethod, RouteStep};

pub fn expand(args: proc_macro::TokenStream, input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let args = syn::parse_macro_input!(args as ControllerArgs);
    let item = syn::parse_macro_input!(input as syn::ItemImpl);
    match parsing::parse(args, item) {
        Ok(def) => generate(&def).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate(def: &ControllerImplDef) -> TokenStream {
    let krate = dekor_core_path();
    let name = &def.controller_name;
    let prefix = &def.prefix;
    let item = &def.item;

    let register_stmts: Vec<_> = def
        .route_methods
        .iter()
        .map(|m| generate_register_stmts(m, &krate))
        .collect();
    let bind_arms: Vec<_> = def
        .route_methods
        .iter()
        .map(|m| generate_bind_arm(m, &krate))
        .collect();

    quote! {
        #item

        impl #krate::controller::Controller for #name {
            fn construct() -> Self {
                <Self as ::core::default::Default>::default()
            }

            fn register_meta(__registry: &mut #krate::meta::RouteRegistry) {
                __registry.set_prefix::<Self>(#prefix);
                #(#register_stmts)*
            }

            fn bind(
                this: &::std::sync::Arc<Self>,
                handler_name: &str,
            ) -> ::std::option::Option<#krate::handler::BoundHandler> {
                match handler_name {
                    #(#bind_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
}

/// Replay one method's annotations against its registry entry. The entry is
/// looked up once; verb and middleware steps apply in source order, so the
/// two annotation orders merge identically.
fn generate_register_stmts(method: &RouteMethod, krate: &TokenStream) -> TokenStream {
    let handler = method.ident.to_string();
    let steps = method.steps.iter().map(|step| match step {
        RouteStep::Verb { verb, path } => quote! {
            __entry.set_verb_and_path(#verb, #path);
        },
        RouteStep::Middleware(fns) => {
            let items = fns.iter().map(|f| {
                let label = f
                    .segments
                    .last()
                    .map(|s| s.ident.to_string())
                    .unwrap_or_default();
                quote! { #krate::handler::Middleware::named(#label, #f) }
            });
            quote! { __entry.merge_middleware([#(#items),*]); }
        }
    });
    quote! {
        {
            let __entry = __registry.route_entry_mut::<Self>(#handler);
            #(#steps)*
        }
    }
}

/// One `bind` match arm: clones the instance into a closure that calls the
/// method inside the async error boundary.
fn generate_bind_arm(method: &RouteMethod, krate: &TokenStream) -> TokenStream {
    let ident = &method.ident;
    let handler = ident.to_string();
    let (req_pat, call) = if method.takes_request {
        (quote! { __req }, quote! { __this.#ident(__req).await })
    } else {
        (quote! { _ }, quote! { __this.#ident().await })
    };
    quote! {
        #handler => {
            let __this = ::std::sync::Arc::clone(this);
            ::std::option::Option::Some(::std::sync::Arc::new(
                move |#req_pat: #krate::http::Request| {
                    let __this = ::std::sync::Arc::clone(&__this);
                    ::std::boxed::Box::pin(async move {
                        #krate::boundary::capture(async move { #call }).await
                    })
                },
            ))
        }
    }
}
