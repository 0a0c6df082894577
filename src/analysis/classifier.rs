//! Calling-convention classification.

use super::shapes::{is_unit, trailing_shape, ResultShape, TrailingShape};
use crate::declaration::{Effects, MethodSignature, Parameter};

/// Calling convention of a single method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStyle {
    /// The method reports its outcome through its own return value,
    /// optionally after suspending.
    Direct { effects: Effects },
    /// The method returns nothing and reports through a trailing callback.
    ///
    /// `callback` is `None` when the method looked like completion style
    /// but its trailing parameter is not an owned one-argument callback.
    CompletionHandler {
        callback: Option<Parameter>,
        wraps_result_only: bool,
    },
}

impl CallStyle {
    pub fn is_completion_handler(&self) -> bool {
        matches!(self, CallStyle::CompletionHandler { .. })
    }
}

/// Assigns a [`CallStyle`] to method signatures.
#[derive(Debug, Clone, Default)]
pub struct SignatureClassifier {
    result_shape: ResultShape,
}

impl SignatureClassifier {
    pub fn new(result_shape: ResultShape) -> Self {
        Self { result_shape }
    }

    /// Suspending methods are always `Direct`. Otherwise a method returning
    /// nothing whose trailing parameter is callable is completion style.
    pub fn classify(&self, sig: &MethodSignature) -> CallStyle {
        if sig.effects.suspending || !is_unit(sig.output.as_ref()) {
            return CallStyle::Direct {
                effects: sig.effects,
            };
        }

        let Some(last) = sig.trailing_parameter() else {
            return CallStyle::Direct {
                effects: sig.effects,
            };
        };

        match trailing_shape(&last.ty) {
            TrailingShape::Escaping { argument, .. } => CallStyle::CompletionHandler {
                callback: Some(last.clone()),
                wraps_result_only: !self.result_shape.matches(argument),
            },
            TrailingShape::Callable => CallStyle::CompletionHandler {
                callback: None,
                wraps_result_only: false,
            },
            TrailingShape::Other => CallStyle::Direct {
                effects: sig.effects,
            },
        }
    }
}
