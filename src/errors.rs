//! Error types for declaration conversion and mock synthesis.
//!
//! Synthesis is fail-fast: the first [`SignatureError`] raised for any method
//! aborts the whole interface and is surfaced wrapped in a [`SynthesisError`]
//! that names the interface. No partial mock is ever produced.
//!
//! # Example
//!
//! ```rust
//! use stubsmith::errors::SignatureError;
//!
//! let err = SignatureError::unrepresentable("ping");
//! assert_eq!(err.method(), "ping");
//! assert!(err.to_string().contains("ping"));
//! ```

use serde::Serialize;
use thiserror::Error;

/// Why a single method cannot be synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignatureError {
    /// The signature mixes calling conventions, e.g. an `async fn` that also
    /// takes an escaping completion callback.
    #[error("method `{method}` cannot be assigned a single calling convention: {detail}")]
    ClassificationAmbiguity { method: String, detail: String },

    /// Completion style was expected but the trailing parameter is not an
    /// owned one-argument callback returning nothing.
    #[error(
        "method `{method}` is missing a completion handler: the final parameter must be a \
         `Box<dyn FnOnce(T) + Send>` returning nothing"
    )]
    MissingCompletionHandler { method: String },

    /// No channel exists through which the not-mocked failure can be reported.
    #[error(
        "method `{method}` has no way to report a missing stub: return a `Result` or take a \
         trailing completion callback"
    )]
    UnrepresentableFailure { method: String },

    /// The signature uses a Rust feature the generated mock cannot express.
    #[error("method `{method}` is not supported: {reason}")]
    UnsupportedSignature { method: String, reason: String },
}

impl SignatureError {
    pub fn ambiguity(method: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ClassificationAmbiguity {
            method: method.into(),
            detail: detail.into(),
        }
    }

    pub fn missing_completion_handler(method: impl Into<String>) -> Self {
        Self::MissingCompletionHandler {
            method: method.into(),
        }
    }

    pub fn unrepresentable(method: impl Into<String>) -> Self {
        Self::UnrepresentableFailure {
            method: method.into(),
        }
    }

    pub fn unsupported(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedSignature {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending method.
    pub fn method(&self) -> &str {
        match self {
            Self::ClassificationAmbiguity { method, .. }
            | Self::MissingCompletionHandler { method }
            | Self::UnrepresentableFailure { method }
            | Self::UnsupportedSignature { method, .. } => method,
        }
    }

    /// Stable short name of the error kind, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClassificationAmbiguity { .. } => "classification_ambiguity",
            Self::MissingCompletionHandler { .. } => "missing_completion_handler",
            Self::UnrepresentableFailure { .. } => "unrepresentable_failure",
            Self::UnsupportedSignature { .. } => "unsupported_signature",
        }
    }
}

/// Failure to synthesize a mock for a whole interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("cannot mock `{interface}`: {source}")]
    Signature {
        interface: String,
        #[source]
        source: SignatureError,
    },
}

impl SynthesisError {
    pub fn signature(interface: impl Into<String>, source: SignatureError) -> Self {
        Self::Signature {
            interface: interface.into(),
            source,
        }
    }

    /// The method-level error that aborted synthesis.
    pub fn signature_error(&self) -> &SignatureError {
        match self {
            Self::Signature { source, .. } => source,
        }
    }
}

/// Rejection raised while turning a parsed trait into an interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("trait `{interface}` has generic parameters, which cannot be mocked")]
    GenericInterface { interface: String },

    #[error("trait `{interface}` is `unsafe`, which cannot be mocked")]
    UnsafeInterface { interface: String },

    #[error("trait `{interface}` requires supertrait `{supertrait}`, which the mock cannot implement")]
    Supertrait {
        interface: String,
        supertrait: String,
    },

    #[error("trait `{interface}` declares {item}, only methods can be mocked")]
    UnsupportedItem { interface: String, item: String },

    #[error("method `{interface}::{method}` is {reason}")]
    UnsupportedMethod {
        interface: String,
        method: String,
        reason: String,
    },
}

impl DeclarationError {
    pub fn interface(&self) -> &str {
        match self {
            Self::GenericInterface { interface }
            | Self::UnsafeInterface { interface }
            | Self::Supertrait { interface, .. }
            | Self::UnsupportedItem { interface, .. }
            | Self::UnsupportedMethod { interface, .. } => interface,
        }
    }
}

/// Any reason a trait could not be turned into a mock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StubsmithError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

impl StubsmithError {
    /// Stable short name of the error kind, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Declaration(_) => "unsupported_declaration",
            Self::Synthesis(err) => err.signature_error().kind(),
        }
    }

    /// Offending method, when the error is tied to one.
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Declaration(DeclarationError::UnsupportedMethod { method, .. }) => Some(method),
            Self::Declaration(_) => None,
            Self::Synthesis(err) => Some(err.signature_error().method()),
        }
    }
}

/// Result type alias for whole-interface synthesis.
pub type Result<T> = std::result::Result<T, SynthesisError>;
