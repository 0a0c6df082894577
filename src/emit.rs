//! Emission of a [`GeneratedMockType`] as Rust tokens or source text.

use crate::synthesis::GeneratedMockType;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

impl ToTokens for GeneratedMockType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let GeneratedMockType {
            name,
            interface,
            access,
            methods,
            default_error,
            runtime,
        } = self;
        let setters = methods.iter().map(|m| &m.setter);
        let implementations = methods.iter().map(|m| &m.implementation);

        tokens.extend(quote! {
            #[derive(Debug)]
            #access struct #name {
                not_mocked_error: #runtime::NotMocked,
                stubs: #runtime::StubRegistry,
            }

            impl #name {
                #access fn new() -> Self {
                    Self::with_not_mocked_error(#default_error)
                }

                #access fn with_not_mocked_error(
                    not_mocked_error: impl ::core::convert::Into<#runtime::NotMocked>,
                ) -> Self {
                    Self {
                        not_mocked_error: ::core::convert::Into::into(not_mocked_error),
                        stubs: #runtime::StubRegistry::new(),
                    }
                }

                #(#setters)*
            }

            impl ::core::default::Default for #name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl #interface for #name {
                #(#implementations)*
            }
        });
    }
}

/// Token form of the mock, for splicing into macro output.
pub fn to_token_stream(mock: &GeneratedMockType) -> TokenStream {
    mock.to_token_stream()
}

/// Source text of the mock as a single unformatted line.
pub fn render(mock: &GeneratedMockType) -> String {
    mock.to_token_stream().to_string()
}

/// Source text of several mocks, checked to parse as a Rust file.
pub fn render_file<'a, I>(mocks: I) -> syn::Result<String>
where
    I: IntoIterator<Item = &'a GeneratedMockType>,
{
    let tokens: TokenStream = mocks.into_iter().map(ToTokens::to_token_stream).collect();
    let file: syn::File = syn::parse2(tokens)?;
    Ok(file.to_token_stream().to_string())
}
