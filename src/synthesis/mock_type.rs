//! Whole-interface synthesis.

use super::method::{GeneratedMethod, MockMethodSynthesizer};
use super::options::SynthesisOptions;
use crate::analysis::{SignatureClassifier, SignatureValidator};
use crate::declaration::InterfaceDeclaration;
use crate::errors::{Result, SynthesisError};
use syn::{Expr, Ident, Path, Visibility};
use tracing::{debug, debug_span};

/// The complete mock for one interface, ready for emission.
///
/// Besides the per-method items the emitted type always carries a
/// `not_mocked_error` field, a `stubs` registry, `new`,
/// `with_not_mocked_error` and a `Default` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMockType {
    pub name: Ident,
    pub interface: Ident,
    pub access: Visibility,
    pub methods: Vec<GeneratedMethod>,
    /// Expression building the error used when no override is given.
    pub default_error: Expr,
    pub runtime: Path,
}

impl GeneratedMockType {
    pub fn method(&self, name: &str) -> Option<&GeneratedMethod> {
        self.methods.iter().find(|m| m.signature.name == name)
    }
}

/// Classifies, validates and synthesizes every method of an interface.
#[derive(Debug, Clone, Default)]
pub struct MockTypeSynthesizer {
    options: SynthesisOptions,
    classifier: SignatureClassifier,
    validator: SignatureValidator,
}

impl MockTypeSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        let classifier = SignatureClassifier::new(options.result_shape.clone());
        Self {
            options,
            classifier,
            validator: SignatureValidator::new(),
        }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Fails with the first method error in declaration order; no partial
    /// mock is returned.
    pub fn synthesize(&self, decl: &InterfaceDeclaration) -> Result<GeneratedMockType> {
        let interface = decl.name.to_string();
        let _span = debug_span!("synthesize_mock", interface = %interface).entered();

        let methods = self.synthesize_methods(decl)?;
        let name = self.options.mock_name_for(&decl.name);
        debug!(mock = %name, methods = methods.len(), "mock synthesized");

        Ok(GeneratedMockType {
            name,
            interface: decl.name.clone(),
            access: decl.access.clone(),
            methods,
            default_error: self.options.default_error.expr(&self.options.runtime_path),
            runtime: self.options.runtime_path.clone(),
        })
    }

    fn synthesize_methods(&self, decl: &InterfaceDeclaration) -> Result<Vec<GeneratedMethod>> {
        let synthesizer = MockMethodSynthesizer::new(
            &self.options.runtime_path,
            &decl.access,
            &self.options.setter_prefix,
            self.options.setter_style,
        );

        decl.methods
            .iter()
            .map(|sig| {
                let style = self.classifier.classify(sig);
                debug!(method = %sig.name, ?style, "classified");
                self.validator
                    .validate(sig, &style)
                    .and_then(|()| synthesizer.synthesize(sig, &style))
                    .map_err(|err| SynthesisError::signature(decl.name.to_string(), err))
            })
            .collect()
    }
}
