//! # stubsmith-macros
//!
//! The `#[mock]` attribute generates a stub implementation next to the trait
//! it annotates.
//!
//! ```rust,ignore
//! use stubsmith_macros::mock;
//!
//! #[mock]
//! pub trait Users {
//!     fn fetch(&self, id: i64) -> Result<String, std::io::Error>;
//! }
//!
//! let mut users = UsersMock::new();
//! users.mock_fetch(|id| Ok(format!("user-{id}")));
//! assert_eq!(users.fetch(7).unwrap(), "user-7");
//! ```
//!
//! ## Arguments
//!
//! - `name = FakeUsers`: mock type name (default `{Trait}Mock`)
//! - `prefix = stub`: setter prefix (default `mock`)
//! - `message = "..."`: message of the default not-mocked error
//! - `runtime = my_crate::stubs`: path to a re-export of `stubsmith::runtime`
//! - `result = Fallible`: extra `Result` alias, repeatable
//!
//! Methods the mock cannot express fail compilation with an error pointing
//! at the method.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use stubsmith::errors::{DeclarationError, StubsmithError};
use stubsmith::synthesis::{DefaultErrorSource, SynthesisOptions};
use stubsmith::ResultShape;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Ident, ItemTrait, LitStr, Path};

/// Arguments to `#[mock(name = .., prefix = .., message = "..")]`
#[derive(Default)]
struct MockArgs {
    name: Option<Ident>,
    prefix: Option<Ident>,
    message: Option<LitStr>,
    runtime: Option<Path>,
    result_types: Vec<Ident>,
}

impl MockArgs {
    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("prefix") {
            let value = meta.value()?;
            // accept both `prefix = stub` and `prefix = "stub"`
            self.prefix = Some(if value.peek(LitStr) {
                value.parse::<LitStr>()?.parse()?
            } else {
                value.parse()?
            });
        } else if meta.path.is_ident("message") {
            self.message = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("runtime") {
            self.runtime = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("result") {
            self.result_types.push(meta.value()?.parse()?);
        } else {
            return Err(meta.error(
                "unsupported mock argument; expected `name`, `prefix`, `message`, `runtime` or `result`",
            ));
        }
        Ok(())
    }

    fn into_options(self) -> SynthesisOptions {
        let mut options = SynthesisOptions::default();
        if let Some(name) = self.name {
            options = options.with_mock_name(name);
        }
        if let Some(prefix) = self.prefix {
            options = options.with_setter_prefix(prefix.to_string());
        }
        if let Some(message) = self.message {
            options = options.with_default_error(DefaultErrorSource::Message(message.value()));
        }
        if let Some(runtime) = self.runtime {
            options.runtime_path = runtime;
        }
        options.result_shape =
            ResultShape::with_aliases(self.result_types.iter().map(ToString::to_string));
        options
    }
}

/// Generates `{Trait}Mock`, a stub implementation of the annotated trait.
///
/// For every method the mock gets a setter `mock_{method}` taking a closure
/// with the method's parameters. Calling a method without a registered stub
/// reports the mock's not-mocked error through the method's `Result` or its
/// completion callback.
#[proc_macro_attribute]
pub fn mock(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = MockArgs::default();
    let arg_parser = syn::meta::parser(|meta| args.parse_meta(meta));
    parse_macro_input!(attr with arg_parser);
    let item = parse_macro_input!(item as ItemTrait);

    let options = args.into_options();
    match stubsmith::synthesize_trait(&item, &options) {
        Ok(mock) => quote! {
            #item
            #mock
        }
        .into(),
        Err(err) => {
            let error = syn::Error::new(error_span(&item, &err), err).to_compile_error();
            quote! {
                #item
                #error
            }
            .into()
        }
    }
}

/// The offending method's name when known, otherwise the trait's.
fn error_span(item: &ItemTrait, err: &StubsmithError) -> Span {
    let method = match err {
        StubsmithError::Declaration(DeclarationError::UnsupportedMethod { method, .. }) => {
            Some(method.as_str())
        }
        StubsmithError::Declaration(_) => None,
        StubsmithError::Synthesis(err) => Some(err.signature_error().method()),
    };

    method
        .and_then(|name| {
            item.items.iter().find_map(|trait_item| match trait_item {
                syn::TraitItem::Fn(f) if f.sig.ident == name => Some(f.sig.ident.span()),
                _ => None,
            })
        })
        .unwrap_or_else(|| item.ident.span())
}
