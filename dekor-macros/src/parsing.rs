//! Parsing of `#[controller] impl Name { ... }` blocks.

use syn::parse::{Parse, ParseStream};

/// Verb annotations recognized on controller methods.
pub const VERB_ATTRS: &[&str] = &["get", "post", "put", "delete", "patch", "options", "head"];

/// Arguments of `#[controller(...)]`: an optional route prefix literal.
pub struct ControllerArgs {
    pub prefix: String,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(ControllerArgs {
                prefix: String::new(),
            });
        }
        let lit: syn::LitStr = input.parse()?;
        Ok(ControllerArgs { prefix: lit.value() })
    }
}

/// One route annotation on a method, kept in source order so verb and
/// middleware applications replay exactly as written.
pub enum RouteStep {
    Verb { verb: String, path: String },
    Middleware(Vec<syn::Path>),
}

/// A method carrying at least one route annotation.
pub struct RouteMethod {
    pub ident: syn::Ident,
    pub steps: Vec<RouteStep>,
    pub takes_request: bool,
}

/// Parsed representation of a `#[controller] impl Name { ... }` block.
pub struct ControllerImplDef {
    pub controller_name: syn::Ident,
    pub prefix: String,
    pub route_methods: Vec<RouteMethod>,
    /// The impl block with route annotations stripped, re-emitted verbatim.
    pub item: syn::ItemImpl,
}

fn verb_of(attr: &syn::Attribute) -> Option<&'static str> {
    VERB_ATTRS.iter().copied().find(|v| attr.path().is_ident(v))
}

fn is_middleware_attr(attr: &syn::Attribute) -> bool {
    attr.path().is_ident("middleware")
}

fn parse_verb_path(attr: &syn::Attribute) -> syn::Result<String> {
    // Bare `#[get]` maps to the controller root.
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(String::new());
    }
    let lit: syn::LitStr = attr.parse_args()?;
    Ok(lit.value())
}

fn parse_middleware_list(attr: &syn::Attribute) -> syn::Result<Vec<syn::Path>> {
    let fns: syn::punctuated::Punctuated<syn::Path, syn::Token![,]> =
        attr.parse_args_with(syn::punctuated::Punctuated::parse_terminated)?;
    if fns.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[middleware(...)] needs at least one function:\n\
             \n  #[middleware(require_auth)]\n  #[get(\"/profile\")]\n  async fn profile(&self) -> ... { }",
        ));
    }
    Ok(fns.into_iter().collect())
}

fn check_signature(method: &syn::ImplItemFn) -> syn::Result<()> {
    if method.sig.asyncness.is_none() {
        return Err(syn::Error::new(
            method.sig.ident.span(),
            "route handlers must be async",
        ));
    }
    match method.sig.inputs.first() {
        Some(syn::FnArg::Receiver(recv)) if recv.reference.is_some() && recv.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new(
                method.sig.ident.span(),
                "route handlers must take `&self` as their first parameter",
            ));
        }
    }
    let typed = method
        .sig
        .inputs
        .iter()
        .filter(|arg| matches!(arg, syn::FnArg::Typed(_)))
        .count();
    if typed > 1 {
        return Err(syn::Error::new(
            method.sig.ident.span(),
            "route handlers take at most one parameter, the request:\n\
             \n  #[get(\"/echo\")]\n  async fn echo(&self, req: Request) -> ... { }",
        ));
    }
    Ok(())
}

/// Route annotation found on a non-method impl item, if any.
fn route_annotation_on(item: &syn::ImplItem) -> Option<&syn::Attribute> {
    let attrs = match item {
        syn::ImplItem::Const(c) => &c.attrs,
        syn::ImplItem::Type(t) => &t.attrs,
        syn::ImplItem::Macro(m) => &m.attrs,
        _ => return None,
    };
    attrs
        .iter()
        .find(|a| verb_of(a).is_some() || is_middleware_attr(a))
}

pub fn parse(args: ControllerArgs, mut item: syn::ItemImpl) -> syn::Result<ControllerImplDef> {
    if let Some((_, ref trait_path, _)) = item.trait_ {
        return Err(syn::Error::new_spanned(
            trait_path,
            "#[controller] goes on an inherent impl block, not a trait impl",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[controller] does not support generic controllers",
        ));
    }

    // Extract controller name from self type
    let controller_name = match *item.self_ty {
        syn::Type::Path(ref type_path) => type_path
            .path
            .segments
            .last()
            .ok_or_else(|| syn::Error::new_spanned(&item.self_ty, "expected type name"))?
            .ident
            .clone(),
        _ => {
            return Err(syn::Error::new_spanned(
                &item.self_ty,
                "expected a type path",
            ))
        }
    };

    let mut route_methods = Vec::new();

    for impl_item in item.items.iter_mut() {
        match impl_item {
            syn::ImplItem::Fn(method) => {
                let all_attrs = std::mem::take(&mut method.attrs);
                let mut steps = Vec::new();
                let mut kept = Vec::new();

                for attr in all_attrs {
                    if let Some(verb) = verb_of(&attr) {
                        let path = parse_verb_path(&attr)?;
                        steps.push(RouteStep::Verb {
                            verb: verb.to_string(),
                            path,
                        });
                    } else if is_middleware_attr(&attr) {
                        steps.push(RouteStep::Middleware(parse_middleware_list(&attr)?));
                    } else {
                        kept.push(attr);
                    }
                }
                method.attrs = kept;

                if steps.is_empty() {
                    continue;
                }

                check_signature(method)?;
                let takes_request = method
                    .sig
                    .inputs
                    .iter()
                    .any(|arg| matches!(arg, syn::FnArg::Typed(_)));
                route_methods.push(RouteMethod {
                    ident: method.sig.ident.clone(),
                    steps,
                    takes_request,
                });
            }
            other => {
                if let Some(attr) = route_annotation_on(other) {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "route annotations can only be applied to methods",
                    ));
                }
            }
        }
    }

    Ok(ControllerImplDef {
        controller_name,
        prefix: args.prefix,
        route_methods,
        item,
    })
}
