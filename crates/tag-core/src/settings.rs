//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

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
///
/// A custom document that somehow fails to parse falls back to the
/// embedded defaults, which `build.rs` has already validated.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        CUSTOM_TOML
            .get()
            .and_then(|s| parse_settings_toml(s).ok())
            .unwrap_or_default()
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub suggestions: SuggestionSettings,
    pub insertion: InsertionSettings,
    #[serde(default)]
    pub source: SourceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suggestions: SuggestionSettings {
                max_results: 7,
                min_query_chars: 1,
                debounce_ms: 150,
            },
            insertion: InsertionSettings {
                separator: SeparatorMode::Comma,
                display_case: DisplayCase::Title,
            },
            source: SourceSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSettings {
    pub max_results: usize,
    pub min_query_chars: usize,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionSettings {
    pub separator: SeparatorMode,
    pub display_case: DisplayCase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    pub path: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: "derpibooru.csv".to_string(),
        }
    }
}

/// How accepted tags are separated from what follows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorMode {
    /// Tags are separated by `", "`; only commas bound a fragment.
    #[default]
    Comma,
    /// Tags are separated by `" "`; commas and spaces both bound a fragment.
    Space,
}

impl SeparatorMode {
    /// Text appended after a tag inserted at the end of the buffer.
    pub fn separator(self) -> &'static str {
        match self {
            SeparatorMode::Comma => ", ",
            SeparatorMode::Space => " ",
        }
    }

    /// Characters that bound the fragment under the cursor.
    pub fn delimiters(self) -> &'static [char] {
        match self {
            SeparatorMode::Comma => &[','],
            SeparatorMode::Space => &[',', ' '],
        }
    }
}

/// Casing applied when a tag is converted to display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCase {
    /// Uppercase the first character of every word.
    #[default]
    Title,
    /// Keep the stored casing.
    Preserve,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(suggestions.max_results);
    check_positive_usize!(suggestions.min_query_chars);

    if s.source.path.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "source.path".to_string(),
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
        assert_eq!(s.suggestions.max_results, 7);
        assert_eq!(s.suggestions.min_query_chars, 1);
        assert_eq!(s.suggestions.debounce_ms, 150);
        assert_eq!(s.insertion.separator, SeparatorMode::Comma);
        assert_eq!(s.insertion.display_case, DisplayCase::Title);
        assert_eq!(s.source.path, "derpibooru.csv");
    }

    #[test]
    fn embedded_defaults_match_default_impl() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[suggestions]
max_results = 5
min_query_chars = 2
debounce_ms = 100

[insertion]
separator = "space"
display_case = "preserve"

[source]
path = "tags.csv"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.suggestions.max_results, 5);
        assert_eq!(s.suggestions.min_query_chars, 2);
        assert_eq!(s.insertion.separator, SeparatorMode::Space);
        assert_eq!(s.insertion.display_case, DisplayCase::Preserve);
        assert_eq!(s.source.path, "tags.csv");
    }

    #[test]
    fn source_section_is_optional() {
        let toml = r#"
[suggestions]
max_results = 5
min_query_chars = 1
debounce_ms = 100

[insertion]
separator = "comma"
display_case = "title"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.source.path, "derpibooru.csv");
    }

    #[test]
    fn error_zero_max_results() {
        let toml = r#"
[suggestions]
max_results = 0
min_query_chars = 1
debounce_ms = 150

[insertion]
separator = "comma"
display_case = "title"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("suggestions.max_results"));
    }

    #[test]
    fn error_unknown_separator() {
        let toml = r#"
[suggestions]
max_results = 7
min_query_chars = 1
debounce_ms = 150

[insertion]
separator = "semicolon"
display_case = "title"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_empty_source_path() {
        let toml = r#"
[suggestions]
max_results = 7
min_query_chars = 1
debounce_ms = 150

[insertion]
separator = "comma"
display_case = "title"

[source]
path = "  "
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("source.path"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[suggestions]
max_results = 7
min_query_chars = 1
debounce_ms = 150
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn separator_mode_text() {
        assert_eq!(SeparatorMode::Comma.separator(), ", ");
        assert_eq!(SeparatorMode::Space.separator(), " ");
        assert_eq!(SeparatorMode::Comma.delimiters(), &[',']);
        assert_eq!(SeparatorMode::Space.delimiters(), &[',', ' ']);
    }
}
