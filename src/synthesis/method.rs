//! Per-method synthesis: forwarding implementation, stub setter and stub type.

use super::options::SetterStyle;
use crate::analysis::{CallStyle, CallbackKind, TrailingShape};
use crate::analysis::shapes::trailing_shape;
use crate::declaration::{MethodSignature, Parameter, Receiver};
use crate::errors::SignatureError;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_quote, Ident, ImplItemFn, LitStr, Path, Type, Visibility};

/// Everything generated for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMethod {
    pub signature: MethodSignature,
    pub style: CallStyle,
    /// Registry key the stub is stored under.
    pub stub_key: LitStr,
    /// Boxed closure type the stub is erased to and recovered as.
    pub stub_type: Type,
    /// Trait method forwarding to the stub.
    pub implementation: ImplItemFn,
    /// Inherent method registering the stub.
    pub setter: ImplItemFn,
}

/// Builds [`GeneratedMethod`]s for validated signatures.
#[derive(Debug, Clone, Copy)]
pub struct MockMethodSynthesizer<'a> {
    runtime: &'a Path,
    access: &'a Visibility,
    setter_prefix: &'a str,
    setter_style: SetterStyle,
}

impl<'a> MockMethodSynthesizer<'a> {
    pub fn new(
        runtime: &'a Path,
        access: &'a Visibility,
        setter_prefix: &'a str,
        setter_style: SetterStyle,
    ) -> Self {
        Self {
            runtime,
            access,
            setter_prefix,
            setter_style,
        }
    }

    pub fn synthesize(
        &self,
        sig: &MethodSignature,
        style: &CallStyle,
    ) -> Result<GeneratedMethod, SignatureError> {
        if sig.receiver == Receiver::None {
            return Err(SignatureError::unsupported(
                sig.name.to_string(),
                "associated functions without a `self` receiver cannot reach the mock's stubs",
            ));
        }

        let stub_key = LitStr::new(&sig.name.unraw().to_string(), sig.name.span());
        let stub_type = self.stub_type(sig, style);
        let implementation = self.implementation(sig, style, &stub_key, &stub_type)?;
        let setter = self.setter(sig, style, &stub_key, &stub_type);

        Ok(GeneratedMethod {
            signature: sig.clone(),
            style: style.clone(),
            stub_key,
            stub_type,
            implementation,
            setter,
        })
    }

    /// `Box<dyn Fn(params..) -> output + Send + Sync>`, where the output of a
    /// suspending method is boxed as a future.
    fn stub_type(&self, sig: &MethodSignature, style: &CallStyle) -> Type {
        let inputs = sig.parameters.iter().map(|p| &p.ty);
        let output = match style {
            CallStyle::Direct { effects } if effects.suspending => {
                let runtime = self.runtime;
                let output = sig.output_or_unit();
                Some(quote!(-> #runtime::BoxFuture<#output>))
            }
            _ => sig.output.as_ref().map(|ty| quote!(-> #ty)),
        };
        parse_quote! {
            ::std::boxed::Box<
                dyn ::core::ops::Fn(#(#inputs),*) #output
                    + ::core::marker::Send
                    + ::core::marker::Sync
            >
        }
    }

    fn implementation(
        &self,
        sig: &MethodSignature,
        style: &CallStyle,
        stub_key: &LitStr,
        stub_type: &Type,
    ) -> Result<ImplItemFn, SignatureError> {
        let method = sig.name.to_string();
        let not_mocked = quote! {
            ::core::convert::From::from(::core::clone::Clone::clone(&self.not_mocked_error))
        };
        let stub = unused_binding("stub", &sig.parameters);
        let args = sig.parameters.iter().map(|p| &p.name);

        let (fallback, dispatch) = match style {
            CallStyle::Direct { effects } => {
                if !effects.throws {
                    return Err(SignatureError::unrepresentable(method));
                }
                let fallback = quote! {
                    return ::core::result::Result::Err(#not_mocked);
                };
                let dispatch = if effects.suspending {
                    quote!(#stub(#(#args),*).await)
                } else {
                    quote!(#stub(#(#args),*))
                };
                (fallback, dispatch)
            }
            CallStyle::CompletionHandler {
                callback: Some(callback),
                wraps_result_only,
            } => {
                let callback = &callback.name;
                let delivered = if *wraps_result_only {
                    not_mocked
                } else {
                    quote!(::core::result::Result::Err(#not_mocked))
                };
                let fallback = quote! {
                    #callback(#delivered);
                    return;
                };
                (fallback, quote!(#stub(#(#args),*)))
            }
            CallStyle::CompletionHandler { callback: None, .. } => {
                return Err(SignatureError::missing_completion_handler(method));
            }
        };

        let name = &sig.name;
        let receiver = sig.receiver;
        let asyncness = sig.effects.suspending.then(|| quote!(async));
        let params = sig.parameters.iter().map(|p| declare_parameter(p, style));
        let output = sig.output.as_ref().map(|ty| quote!(-> #ty));

        Ok(parse_quote! {
            #asyncness fn #name(#receiver #(, #params)*) #output {
                let ::core::option::Option::Some(#stub) =
                    self.stubs.get::<#stub_type>(#stub_key)
                else {
                    #fallback
                };
                #dispatch
            }
        })
    }

    fn setter(
        &self,
        sig: &MethodSignature,
        style: &CallStyle,
        stub_key: &LitStr,
        stub_type: &Type,
    ) -> ImplItemFn {
        let access = self.access;
        let name = self.setter_style.setter_name(self.setter_prefix, &sig.name);
        let allow = match self.setter_style {
            SetterStyle::Camel => Some(quote!(#[allow(non_snake_case)])),
            SetterStyle::Snake => None,
        };
        let inputs: Vec<&Type> = sig.parameters.iter().map(|p| &p.ty).collect();

        match style {
            CallStyle::Direct { effects } if effects.suspending => {
                let runtime = self.runtime;
                let output = sig.output_or_unit();
                let args: Vec<Ident> = (0..inputs.len()).map(|i| format_ident!("arg{}", i)).collect();
                parse_quote! {
                    #allow
                    #access fn #name<StubFuture>(
                        &mut self,
                        stub: impl ::core::ops::Fn(#(#inputs),*) -> StubFuture
                            + ::core::marker::Send
                            + ::core::marker::Sync
                            + 'static,
                    ) -> &mut Self
                    where
                        StubFuture: ::core::future::Future<Output = #output>
                            + ::core::marker::Send
                            + 'static,
                    {
                        self.stubs.insert::<#stub_type>(
                            #stub_key,
                            ::std::boxed::Box::new(
                                move |#(#args: #inputs),*| -> #runtime::BoxFuture<#output> {
                                    ::std::boxed::Box::pin(stub(#(#args),*))
                                },
                            ),
                        );
                        self
                    }
                }
            }
            _ => {
                let output = sig.output.as_ref().map(|ty| quote!(-> #ty));
                parse_quote! {
                    #allow
                    #access fn #name(
                        &mut self,
                        stub: impl ::core::ops::Fn(#(#inputs),*) #output
                            + ::core::marker::Send
                            + ::core::marker::Sync
                            + 'static,
                    ) -> &mut Self {
                        self.stubs.insert::<#stub_type>(#stub_key, ::std::boxed::Box::new(stub));
                        self
                    }
                }
            }
        }
    }
}

/// `name: Type`, with `mut` for `FnMut` callbacks that must be called in place.
fn declare_parameter(param: &Parameter, style: &CallStyle) -> TokenStream {
    let name = &param.name;
    let ty = &param.ty;
    let is_fn_mut_callback = match style {
        CallStyle::CompletionHandler {
            callback: Some(callback),
            ..
        } => {
            callback.name == *name
                && matches!(
                    trailing_shape(&callback.ty),
                    TrailingShape::Escaping {
                        kind: CallbackKind::FnMut,
                        ..
                    }
                )
        }
        _ => false,
    };
    if is_fn_mut_callback {
        quote!(mut #name: #ty)
    } else {
        quote!(#name: #ty)
    }
}

/// `base`, or `base` with underscores appended until no parameter shadows it.
fn unused_binding(base: &str, params: &[Parameter]) -> Ident {
    let mut candidate = base.to_string();
    while params.iter().any(|p| p.name == candidate) {
        candidate.push('_');
    }
    format_ident!("{}", candidate)
}
