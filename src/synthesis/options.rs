use crate::analysis::ResultShape;
use crate::common::capitalize_first;
use crate::runtime::DEFAULT_NOT_MOCKED_MESSAGE;
use quote::format_ident;
use syn::ext::IdentExt;
use syn::{parse_quote, Expr, Ident, Path};

/// How stub setter names are formed from the prefix and method name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetterStyle {
    /// `mock_fetch_user`
    #[default]
    Snake,
    /// `mockFetch_user`, allowed with `non_snake_case`
    Camel,
}

impl SetterStyle {
    pub fn setter_name(&self, prefix: &str, method: &Ident) -> Ident {
        let method = method.unraw().to_string();
        match self {
            SetterStyle::Snake => format_ident!("{}_{}", prefix, method),
            SetterStyle::Camel => format_ident!("{}{}", prefix, capitalize_first(&method)),
        }
    }
}

/// Where the mock's default "not mocked" error comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultErrorSource {
    /// `NotMocked::default()`, carrying "Not mocked".
    #[default]
    Generic,
    /// `NotMocked::new(message)`.
    Message(String),
}

impl DefaultErrorSource {
    pub fn message(&self) -> &str {
        match self {
            DefaultErrorSource::Generic => DEFAULT_NOT_MOCKED_MESSAGE,
            DefaultErrorSource::Message(message) => message,
        }
    }

    pub(crate) fn expr(&self, runtime: &Path) -> Expr {
        match self {
            DefaultErrorSource::Generic => {
                parse_quote!(<#runtime::NotMocked as ::core::default::Default>::default())
            }
            DefaultErrorSource::Message(message) => parse_quote!(#runtime::NotMocked::new(#message)),
        }
    }
}

/// Knobs for one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Explicit mock type name; `{Interface}{mock_suffix}` when absent.
    pub mock_name: Option<Ident>,
    pub mock_suffix: String,
    pub setter_prefix: String,
    pub setter_style: SetterStyle,
    pub default_error: DefaultErrorSource,
    /// Path generated code uses to reach [`crate::runtime`].
    pub runtime_path: Path,
    pub result_shape: ResultShape,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            mock_name: None,
            mock_suffix: "Mock".to_string(),
            setter_prefix: "mock".to_string(),
            setter_style: SetterStyle::Snake,
            default_error: DefaultErrorSource::Generic,
            runtime_path: parse_quote!(::stubsmith::runtime),
            result_shape: ResultShape::default(),
        }
    }
}

impl SynthesisOptions {
    pub fn with_mock_name(mut self, name: Ident) -> Self {
        self.mock_name = Some(name);
        self
    }

    pub fn with_setter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.setter_prefix = prefix.into();
        self
    }

    pub fn with_default_error(mut self, source: DefaultErrorSource) -> Self {
        self.default_error = source;
        self
    }

    pub fn mock_name_for(&self, interface: &Ident) -> Ident {
        match &self.mock_name {
            Some(name) => name.clone(),
            None => format_ident!("{}{}", interface.unraw(), self.mock_suffix),
        }
    }
}
