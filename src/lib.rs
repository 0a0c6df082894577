// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod declaration;
pub mod emit;
pub mod errors;
pub mod io;
pub mod runtime;
pub mod synthesis;

// Re-export commonly used types
pub use crate::analysis::{CallStyle, ResultShape, SignatureClassifier, SignatureValidator};
pub use crate::declaration::{
    collect_traits, Effects, InterfaceDeclaration, MethodSignature, Parameter, Receiver,
    TraitSelection,
};
pub use crate::errors::{DeclarationError, SignatureError, StubsmithError, SynthesisError};
pub use crate::synthesis::{
    DefaultErrorSource, GeneratedMethod, GeneratedMockType, MockMethodSynthesizer,
    MockTypeSynthesizer, SetterStyle, SynthesisOptions,
};

/// Converts `item` and synthesizes its mock in one step.
///
/// ```rust
/// use stubsmith::{synthesize_trait, SynthesisOptions};
///
/// let item: syn::ItemTrait = syn::parse_quote! {
///     pub trait Users {
///         fn fetch(&self, id: i64) -> Result<String, std::io::Error>;
///     }
/// };
/// let mock = synthesize_trait(&item, &SynthesisOptions::default()).unwrap();
/// assert_eq!(mock.name, "UsersMock");
/// assert!(mock.method("fetch").is_some());
/// ```
pub fn synthesize_trait(
    item: &syn::ItemTrait,
    options: &SynthesisOptions,
) -> Result<GeneratedMockType, StubsmithError> {
    let decl = InterfaceDeclaration::from_item_trait(item, &options.result_shape)?;
    let mock = MockTypeSynthesizer::new(options.clone()).synthesize(&decl)?;
    Ok(mock)
}
