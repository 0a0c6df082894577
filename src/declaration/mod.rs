//! Structured form of an interface (trait) consumed by the synthesizer.
//!
//! Declarations are built once per synthesis call, usually by
//! [`InterfaceDeclaration::from_item_trait`], and never mutated afterwards.

pub mod collect;
mod from_syn;

pub use collect::{collect_traits, TraitSelection};

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{Ident, Type, Visibility};

/// A named contract made of an ordered set of method signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub name: Ident,
    pub access: Visibility,
    pub methods: Vec<MethodSignature>,
}

impl InterfaceDeclaration {
    pub fn new(name: Ident, access: Visibility, methods: Vec<MethodSignature>) -> Self {
        Self {
            name,
            access,
            methods,
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// How a method receives `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// `&self`
    Ref,
    /// `&mut self`
    RefMut,
    /// `self` or `mut self`
    Value,
    /// Associated function without a receiver.
    None,
}

impl ToTokens for Receiver {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Receiver::Ref => tokens.extend(quote!(&self)),
            Receiver::RefMut => tokens.extend(quote!(&mut self)),
            Receiver::Value => tokens.extend(quote!(self)),
            Receiver::None => {}
        }
    }
}

/// Effects a method signature declares.
///
/// `throws` means the method returns a `Result`-shaped type; `suspending`
/// means it is an `async fn`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Effects {
    pub throws: bool,
    pub suspending: bool,
}

impl Effects {
    pub const NONE: Effects = Effects {
        throws: false,
        suspending: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.throws && !self.suspending
    }
}

/// One parameter of a method, excluding the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Binding used when forwarding the argument.
    pub name: Ident,
    pub ty: Type,
    /// Pattern text as declared; equals `name` for plain identifiers.
    pub label: String,
}

impl Parameter {
    pub fn new(name: Ident, ty: Type) -> Self {
        let label = name.to_string();
        Self { name, ty, label }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A single method of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: Ident,
    pub receiver: Receiver,
    pub parameters: Vec<Parameter>,
    /// Declared return type; `None` when the method returns nothing.
    pub output: Option<Type>,
    pub effects: Effects,
}

impl MethodSignature {
    /// The last parameter, inspected to detect a completion callback.
    pub fn trailing_parameter(&self) -> Option<&Parameter> {
        self.parameters.last()
    }

    /// Return type, with `()` standing in for "no value".
    pub fn output_or_unit(&self) -> Type {
        self.output.clone().unwrap_or_else(|| syn::parse_quote!(()))
    }
}
