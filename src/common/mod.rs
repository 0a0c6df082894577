pub mod text;

pub use text::{capitalize_first, is_identifier};
