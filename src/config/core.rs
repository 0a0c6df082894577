use super::ConfigError;
use crate::analysis::ResultShape;
use crate::common::is_identifier;
use crate::synthesis::{DefaultErrorSource, SetterStyle, SynthesisOptions};
use serde::{Deserialize, Serialize};

/// Root of `stubsmith.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubsmithConfig {
    /// Naming and runtime options for generated mocks
    #[serde(default)]
    pub mock: Option<MockConfig>,

    /// Paths skipped when walking input directories
    #[serde(default)]
    pub ignore: Option<IgnoreConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockConfig {
    #[serde(default)]
    pub setter_prefix: Option<String>,

    #[serde(default)]
    pub setter_style: Option<SetterStyle>,

    #[serde(default)]
    pub mock_suffix: Option<String>,

    /// Message carried by the default not-mocked error
    #[serde(default)]
    pub not_mocked_message: Option<String>,

    /// Path generated code uses to reach the runtime support module
    #[serde(default)]
    pub runtime_path: Option<String>,

    /// Extra return type names treated like `Result`
    #[serde(default)]
    pub result_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    pub patterns: Vec<String>,
}

impl StubsmithConfig {
    pub fn ignore_patterns(&self) -> Vec<String> {
        self.ignore
            .as_ref()
            .map(|ignore| ignore.patterns.clone())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(mock) = &self.mock {
            mock.validate()?;
        }
        for pattern in self.ignore_patterns() {
            glob::Pattern::new(&pattern)
                .map_err(|source| ConfigError::InvalidGlob { pattern, source })?;
        }
        Ok(())
    }

    /// Synthesis options with every configured value applied over the defaults.
    pub fn to_options(&self) -> Result<SynthesisOptions, ConfigError> {
        let mut options = SynthesisOptions::default();
        let Some(mock) = &self.mock else {
            return Ok(options);
        };
        mock.validate()?;

        if let Some(prefix) = &mock.setter_prefix {
            options.setter_prefix = prefix.clone();
        }
        if let Some(style) = mock.setter_style {
            options.setter_style = style;
        }
        if let Some(suffix) = &mock.mock_suffix {
            options.mock_suffix = suffix.clone();
        }
        if let Some(message) = &mock.not_mocked_message {
            options.default_error = DefaultErrorSource::Message(message.clone());
        }
        if let Some(path) = &mock.runtime_path {
            options.runtime_path = parse_runtime_path(path)?;
        }
        options.result_shape = ResultShape::with_aliases(mock.result_types.iter().cloned());
        Ok(options)
    }
}

impl MockConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let identifiers = [
            ("mock.setter_prefix", &self.setter_prefix),
            ("mock.mock_suffix", &self.mock_suffix),
        ];
        for (field, value) in identifiers {
            if let Some(value) = value {
                check_identifier(field, value)?;
            }
        }
        for name in &self.result_types {
            check_identifier("mock.result_types", name)?;
        }
        if let Some(path) = &self.runtime_path {
            parse_runtime_path(path)?;
        }
        Ok(())
    }
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

fn parse_runtime_path(path: &str) -> Result<syn::Path, ConfigError> {
    syn::parse_str(path).map_err(|_| ConfigError::InvalidRuntimePath {
        value: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn mock(config: MockConfig) -> StubsmithConfig {
        StubsmithConfig {
            mock: Some(config),
            ignore: None,
        }
    }

    #[test]
    fn test_empty_config_yields_default_options() {
        assert_eq!(
            StubsmithConfig::default().to_options().unwrap(),
            SynthesisOptions::default()
        );
    }

    #[test]
    fn test_configured_values_override_defaults() {
        let options = mock(MockConfig {
            setter_prefix: Some("stub".into()),
            setter_style: Some(SetterStyle::Camel),
            mock_suffix: Some("Fake".into()),
            not_mocked_message: Some("offline".into()),
            runtime_path: Some("crate::support".into()),
            result_types: vec!["Fallible".into()],
        })
        .to_options()
        .unwrap();

        assert_eq!(options.setter_prefix, "stub");
        assert_eq!(options.setter_style, SetterStyle::Camel);
        assert_eq!(options.mock_suffix, "Fake");
        assert_eq!(options.default_error.message(), "offline");
        let runtime: syn::Path = parse_quote!(crate::support);
        assert_eq!(options.runtime_path, runtime);
        assert_eq!(options.result_shape.names(), ["Result", "Fallible"]);
    }

    #[test]
    fn test_rejects_non_identifier_prefix() {
        let config = mock(MockConfig {
            setter_prefix: Some("mock-it".into()),
            ..Default::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIdentifier {
                field: "mock.setter_prefix",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_unparsable_runtime_path() {
        let config = mock(MockConfig {
            runtime_path: Some("::".into()),
            ..Default::default()
        });
        assert!(matches!(
            config.to_options(),
            Err(ConfigError::InvalidRuntimePath { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_ignore_glob() {
        let config = StubsmithConfig {
            mock: None,
            ignore: Some(IgnoreConfig {
                patterns: vec!["target/[".into()],
            }),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGlob { .. })
        ));
    }
}
