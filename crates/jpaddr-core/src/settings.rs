//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub postal: PostalSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostalSettings {
    pub rome_dataset: String,
    pub kanji_dataset: String,
    #[serde(default)]
    pub kanji_fallback_dataset: Option<String>,
    pub rome_no_town: String,
    pub kanji_no_town: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub country: String,
    pub separator: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_blank {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be blank".to_string(),
                });
            }
        };
    }

    check_non_blank!(postal.rome_dataset);
    check_non_blank!(postal.kanji_dataset);
    check_non_blank!(postal.rome_no_town);
    check_non_blank!(postal.kanji_no_town);

    if s.output.separator.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "output.separator".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.output.country, "Japan");
        assert_eq!(s.output.separator, ", ");
        assert_eq!(s.postal.rome_no_town, "IKANIKEISAIGANAIBAAI");
        assert_eq!(
            s.postal.kanji_fallback_dataset.as_deref(),
            Some("data/postal/ken_all.sample.json")
        );
    }

    #[test]
    fn fallback_dataset_is_optional() {
        let toml = r#"
[postal]
rome_dataset = "rome.json"
kanji_dataset = "kanji.json"
rome_no_town = "NONE"
kanji_no_town = "なし"

[output]
country = "JAPAN"
separator = " / "
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(s.postal.kanji_fallback_dataset.is_none());
        assert_eq!(s.output.separator, " / ");
    }

    #[test]
    fn error_blank_dataset_path() {
        let toml = DEFAULT_SETTINGS_TOML.replace(
            "rome_dataset = \"data/postal/ken_all_rome.min.json\"",
            "rome_dataset = \"  \"",
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        match err {
            SettingsError::InvalidValue { field, .. } => assert_eq!(field, "postal.rome_dataset"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn error_empty_separator() {
        let toml = DEFAULT_SETTINGS_TOML.replace("separator = \", \"", "separator = \"\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[output]\ncountry = \"Japan\"\nseparator = \", \"\n")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
