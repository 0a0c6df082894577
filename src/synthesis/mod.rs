//! Mock synthesis.
//!
//! [`MockTypeSynthesizer`] drives the pipeline for a whole interface: each
//! method is classified, validated and handed to [`MockMethodSynthesizer`],
//! and the results are assembled in declaration order into a
//! [`GeneratedMockType`].

pub mod method;
pub mod mock_type;
mod options;

pub use method::{GeneratedMethod, MockMethodSynthesizer};
pub use mock_type::{GeneratedMockType, MockTypeSynthesizer};
pub use options::{DefaultErrorSource, SetterStyle, SynthesisOptions};
