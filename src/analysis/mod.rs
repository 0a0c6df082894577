//! Signature analysis: calling-convention classification and validation.
//!
//! Every consumer matches [`CallStyle`] exhaustively, so a new convention
//! has to be handled by the classifier, the validator and the synthesizer
//! before it compiles.

pub mod classifier;
pub mod shapes;
pub mod type_scan;
pub mod validator;

pub use classifier::{CallStyle, SignatureClassifier};
pub use shapes::{CallbackKind, ResultShape, TrailingShape};
pub use validator::SignatureValidator;
