//! Structural preconditions a method must meet before synthesis.

use super::classifier::CallStyle;
use super::shapes::trailing_shape;
use super::type_scan::{scan_input, scan_output};
use crate::declaration::{MethodSignature, Receiver};
use crate::errors::SignatureError;

/// Rejects signatures the synthesizer cannot turn into a working mock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureValidator;

impl SignatureValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, sig: &MethodSignature, style: &CallStyle) -> Result<(), SignatureError> {
        let method = sig.name.to_string();

        if sig.receiver == Receiver::None {
            return Err(SignatureError::unsupported(
                method,
                "associated functions without a `self` receiver cannot reach the mock's stubs",
            ));
        }

        match style {
            CallStyle::CompletionHandler { callback: None, .. } => {
                return Err(SignatureError::missing_completion_handler(method));
            }
            CallStyle::CompletionHandler { callback: Some(_), .. } => {}
            CallStyle::Direct { effects } => {
                let trailing_callback = sig
                    .trailing_parameter()
                    .is_some_and(|p| trailing_shape(&p.ty).is_escaping());
                if effects.suspending && trailing_callback {
                    return Err(SignatureError::ambiguity(
                        method,
                        "`async fn` cannot also take a trailing completion callback",
                    ));
                }
                if !effects.throws {
                    return Err(SignatureError::unrepresentable(method));
                }
            }
        }

        for param in &sig.parameters {
            if let Some(found) = scan_input(&param.ty) {
                return Err(SignatureError::unsupported(
                    method,
                    format!("parameter `{}`: {}", param.label, found.describe()),
                ));
            }
        }
        if let Some(found) = sig.output.as_ref().and_then(scan_output) {
            return Err(SignatureError::unsupported(
                method,
                format!("return type: {}", found.describe()),
            ));
        }

        Ok(())
    }
}
