//! Type-shape predicates shared by the adapter, classifier and validator.

use syn::punctuated::Punctuated;
use syn::{GenericArgument, PathArguments, ReturnType, Type, TypeParamBound};

/// Names that mark a return type as error-propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultShape {
    names: Vec<String>,
}

impl Default for ResultShape {
    fn default() -> Self {
        Self {
            names: vec!["Result".to_string()],
        }
    }
}

impl ResultShape {
    /// Recognizes `Result` plus any extra alias names.
    pub fn with_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut shape = Self::default();
        for alias in aliases {
            let alias = alias.into();
            if !shape.names.contains(&alias) {
                shape.names.push(alias);
            }
        }
        shape
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// True when the last path segment of `ty` is one of the known names.
    pub fn matches(&self, ty: &Type) -> bool {
        match peel(ty) {
            Type::Path(type_path) if type_path.qself.is_none() => type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| self.names.iter().any(|name| segment.ident == name)),
            _ => false,
        }
    }
}

/// Which `Fn` trait a callback is boxed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    FnOnce,
    FnMut,
    Fn,
}

/// What the trailing parameter of a method looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingShape<'a> {
    /// `Box<dyn FnOnce(X) + ..>` (or `FnMut`/`Fn`) returning nothing.
    Escaping {
        kind: CallbackKind,
        argument: &'a Type,
    },
    /// Callable, but not an owned one-argument callback returning nothing.
    Callable,
    /// Not callable at all.
    Other,
}

impl TrailingShape<'_> {
    pub fn is_escaping(&self) -> bool {
        matches!(self, TrailingShape::Escaping { .. })
    }
}

/// Classifies the shape of a parameter type.
pub fn trailing_shape(ty: &Type) -> TrailingShape<'_> {
    match peel(ty) {
        Type::Path(type_path) if type_path.qself.is_none() => {
            match boxed_inner(type_path) {
                Some(Type::TraitObject(object)) => fn_bound_shape(&object.bounds),
                _ => TrailingShape::Other,
            }
        }
        Type::TraitObject(object) => demote(fn_bound_shape(&object.bounds)),
        Type::ImplTrait(imp) => demote(fn_bound_shape(&imp.bounds)),
        Type::Reference(reference) => demote(trailing_shape(&reference.elem)),
        Type::BareFn(_) => TrailingShape::Callable,
        _ => TrailingShape::Other,
    }
}

/// True for a missing return type or `()`.
pub fn is_unit(output: Option<&Type>) -> bool {
    match output.map(peel) {
        None => true,
        Some(Type::Tuple(tuple)) => tuple.elems.is_empty(),
        Some(_) => false,
    }
}

/// Strips invisible groups and parentheses around a type.
pub fn peel(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => peel(&group.elem),
        Type::Paren(paren) => peel(&paren.elem),
        other => other,
    }
}

fn boxed_inner(type_path: &syn::TypePath) -> Option<&Type> {
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Box" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(inner), None) => Some(peel(inner)),
        _ => None,
    }
}

fn fn_bound_shape<P>(bounds: &Punctuated<TypeParamBound, P>) -> TrailingShape<'_> {
    let Some((kind, segment)) = bounds.iter().find_map(fn_segment) else {
        return TrailingShape::Other;
    };
    let PathArguments::Parenthesized(args) = &segment.arguments else {
        return TrailingShape::Callable;
    };
    let returns_unit = match &args.output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => is_unit(Some(ty)),
    };
    if args.inputs.len() == 1 && returns_unit {
        TrailingShape::Escaping {
            kind,
            argument: &args.inputs[0],
        }
    } else {
        TrailingShape::Callable
    }
}

fn fn_segment(bound: &TypeParamBound) -> Option<(CallbackKind, &syn::PathSegment)> {
    let TypeParamBound::Trait(trait_bound) = bound else {
        return None;
    };
    let segment = trait_bound.path.segments.last()?;
    let kind = if segment.ident == "FnOnce" {
        CallbackKind::FnOnce
    } else if segment.ident == "FnMut" {
        CallbackKind::FnMut
    } else if segment.ident == "Fn" {
        CallbackKind::Fn
    } else {
        return None;
    };
    Some((kind, segment))
}

// Anything callable that is not an owned box cannot escape the call.
fn demote(shape: TrailingShape<'_>) -> TrailingShape<'_> {
    match shape {
        TrailingShape::Escaping { .. } => TrailingShape::Callable,
        other => other,
    }
}
