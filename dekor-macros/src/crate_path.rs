//! Resolution of the runtime crate path used by generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Path prefix under which `dekor_core` items are reachable from the
/// expansion site.
///
/// Users normally pull in the `dekor` facade, but a direct dependency on
/// `dekor-core` works too. Whichever of the two appears in the caller's
/// manifest wins, honoring any `package = "..."` rename.
pub fn dekor_core_path() -> TokenStream {
    for pkg in ["dekor", "dekor-core"] {
        match crate_name(pkg) {
            Ok(FoundCrate::Itself) => return quote!(crate),
            Ok(FoundCrate::Name(name)) => {
                let ident = proc_macro2::Ident::new(&name, proc_macro2::Span::call_site());
                return quote!(::#ident);
            }
            Err(_) => continue,
        }
    }
    // Neither crate is in the manifest. Emit a path that at least names the
    // runtime so the resulting error points somewhere useful.
    quote!(::dekor_core)
}
