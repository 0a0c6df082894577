//! Conversion of a parsed `syn::ItemTrait` into an [`InterfaceDeclaration`].

use super::{Effects, InterfaceDeclaration, MethodSignature, Parameter, Receiver};
use crate::analysis::{ResultShape, SignatureClassifier, SignatureValidator};
use crate::errors::DeclarationError;
use quote::{format_ident, ToTokens};
use syn::{
    FnArg, Ident, ItemTrait, Pat, PatType, ReturnType, Signature, TraitItem, TraitItemFn,
    TypeParamBound,
};

/// Supertraits any plain struct can satisfy without the mock doing anything.
const AUTO_SUPERTRAITS: &[&str] = &["Send", "Sync", "Sized", "Unpin"];

impl InterfaceDeclaration {
    /// Builds a declaration from a trait definition.
    ///
    /// `result` decides which return types count as failable.
    ///
    /// Methods with a default body are kept when the mock can stub them and
    /// dropped otherwise, leaving the mock to inherit the default.
    pub fn from_item_trait(
        item: &ItemTrait,
        result: &ResultShape,
    ) -> Result<Self, DeclarationError> {
        let interface = item.ident.to_string();

        if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
            return Err(DeclarationError::GenericInterface { interface });
        }
        if item.unsafety.is_some() {
            return Err(DeclarationError::UnsafeInterface { interface });
        }
        check_supertraits(&interface, item)?;

        let methods = item
            .items
            .iter()
            .filter_map(|trait_item| match trait_item {
                TraitItem::Fn(method) if method.default.is_some() => {
                    provided_method(&interface, method, result).map(Ok)
                }
                TraitItem::Fn(method) => Some(convert_method(&interface, method, result)),
                TraitItem::Type(ty) => Some(Err(DeclarationError::UnsupportedItem {
                    interface: interface.clone(),
                    item: format!("associated type `{}`", ty.ident),
                })),
                TraitItem::Const(c) => Some(Err(DeclarationError::UnsupportedItem {
                    interface: interface.clone(),
                    item: format!("associated const `{}`", c.ident),
                })),
                other => Some(Err(DeclarationError::UnsupportedItem {
                    interface: interface.clone(),
                    item: format!("`{}`", other.to_token_stream()),
                })),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(InterfaceDeclaration::new(
            item.ident.clone(),
            item.vis.clone(),
            methods,
        ))
    }
}

fn check_supertraits(interface: &str, item: &ItemTrait) -> Result<(), DeclarationError> {
    for bound in &item.supertraits {
        let allowed = match bound {
            TypeParamBound::Lifetime(lifetime) => lifetime.ident == "static",
            TypeParamBound::Trait(bound) => bound
                .path
                .segments
                .last()
                .is_some_and(|seg| {
                    seg.arguments.is_none()
                        && AUTO_SUPERTRAITS.iter().any(|name| seg.ident == name)
                }),
            _ => false,
        };
        if !allowed {
            return Err(DeclarationError::Supertrait {
                interface: interface.to_string(),
                supertrait: bound.to_token_stream().to_string(),
            });
        }
    }
    Ok(())
}

/// A provided method, when the mock can override it.
fn provided_method(
    interface: &str,
    method: &TraitItemFn,
    result: &ResultShape,
) -> Option<MethodSignature> {
    let outcome = convert_method(interface, method, result)
        .map_err(|err| err.to_string())
        .and_then(|sig| {
            let style = SignatureClassifier::new(result.clone()).classify(&sig);
            SignatureValidator::new()
                .validate(&sig, &style)
                .map(|()| sig)
                .map_err(|err| err.to_string())
        });
    match outcome {
        Ok(sig) => Some(sig),
        Err(reason) => {
            tracing::debug!(
                interface,
                method = %method.sig.ident,
                %reason,
                "keeping default body"
            );
            None
        }
    }
}

fn convert_method(
    interface: &str,
    method: &TraitItemFn,
    result: &ResultShape,
) -> Result<MethodSignature, DeclarationError> {
    let sig = &method.sig;
    let reject = |reason: &str| DeclarationError::UnsupportedMethod {
        interface: interface.to_string(),
        method: sig.ident.to_string(),
        reason: reason.to_string(),
    };

    if let Some(reason) = unsupported_qualifier(sig) {
        return Err(reject(reason));
    }

    let mut receiver = Receiver::None;
    let mut typed = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(recv) => {
                if recv.colon_token.is_some() {
                    return Err(reject("using a typed receiver such as `self: Box<Self>`"));
                }
                receiver = match (&recv.reference, &recv.mutability) {
                    (Some(_), Some(_)) => Receiver::RefMut,
                    (Some(_), None) => Receiver::Ref,
                    (None, _) => Receiver::Value,
                };
            }
            FnArg::Typed(arg) => typed.push(arg),
        }
    }
    let parameters = convert_parameters(&typed);

    let output = match &sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some((**ty).clone()),
    };
    let effects = Effects {
        throws: output.as_ref().is_some_and(|ty| result.matches(ty)),
        suspending: sig.asyncness.is_some(),
    };

    Ok(MethodSignature {
        name: sig.ident.clone(),
        receiver,
        parameters,
        output,
        effects,
    })
}

fn unsupported_qualifier(sig: &Signature) -> Option<&'static str> {
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        Some("generic")
    } else if sig.unsafety.is_some() {
        Some("`unsafe`")
    } else if sig.constness.is_some() {
        Some("`const`")
    } else if sig.abi.is_some() {
        Some("declared with an explicit ABI")
    } else if sig.variadic.is_some() {
        Some("variadic")
    } else {
        None
    }
}

/// Plain identifier patterns keep their name. Any other pattern is bound
/// to `arg{position}`, with underscores appended until no declared name
/// matches it.
fn convert_parameters(typed: &[&PatType]) -> Vec<Parameter> {
    let declared: Vec<&Ident> = typed.iter().filter_map(|arg| plain_name(&arg.pat)).collect();

    let mut parameters: Vec<Parameter> = Vec::with_capacity(typed.len());
    for (position, arg) in typed.iter().enumerate() {
        let ty = (*arg.ty).clone();
        let parameter = match plain_name(&arg.pat) {
            Some(name) => Parameter::new(name.clone(), ty),
            None => {
                let mut candidate = format!("arg{position}");
                while declared.iter().any(|name| **name == candidate) {
                    candidate.push('_');
                }
                Parameter::new(format_ident!("{}", candidate), ty)
                    .with_label(arg.pat.to_token_stream().to_string())
            }
        };
        parameters.push(parameter);
    }
    parameters
}

fn plain_name(pat: &Pat) -> Option<&Ident> {
    match pat {
        Pat::Ident(ident) if ident.by_ref.is_none() && ident.subpat.is_none() => {
            Some(&ident.ident)
        }
        _ => None,
    }
}
