use serde::{Deserialize, Serialize};

/// On-disk shape of the settings file. Every key is optional; unknown
/// namespaces and keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installs: Option<InstallsSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_rom_fs: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_bar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_bar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_required_fw_version: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<Vec<BookmarkEntry>>,
}

/// Bookmark as stored; missing fields read as empty and get filtered later
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl GeneralSection {
    pub fn is_empty(&self) -> bool {
        self.custom_language.is_none() && self.external_rom_fs.is_none()
    }
}

impl UiSection {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl SettingsDocument {
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// Pretty-print with four-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_keys() {
        let json = r##"{
            "general": { "customLanguage": "German", "externalRomFs": "themes" },
            "ui": { "menuItemSize": 96, "baseFocus": "#112233FF", "scrollBar": "" },
            "installs": { "ignoreRequiredFwVersion": false },
            "web": { "bookmarks": [ { "name": "Home", "url": "https://example.org" } ] }
        }"##;
        let doc = SettingsDocument::from_slice(json.as_bytes()).unwrap();

        let general = doc.general.unwrap();
        assert_eq!(general.custom_language.as_deref(), Some("German"));
        assert_eq!(general.external_rom_fs.as_deref(), Some("themes"));
        let ui = doc.ui.unwrap();
        assert_eq!(ui.menu_item_size, Some(96));
        assert_eq!(ui.base_focus.as_deref(), Some("#112233FF"));
        assert_eq!(ui.scroll_bar.as_deref(), Some(""));
        assert_eq!(ui.base, None);
        assert_eq!(doc.installs.unwrap().ignore_required_fw_version, Some(false));
        assert_eq!(doc.web.unwrap().bookmarks.unwrap().len(), 1);
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let json = r#"{ "general": { "theme": "dark" }, "telemetry": { "enabled": true } }"#;
        let doc = SettingsDocument::from_slice(json.as_bytes()).unwrap();
        assert!(doc.general.unwrap().is_empty());
        assert_eq!(doc.ui, None);
    }

    #[test]
    fn test_bookmark_fields_default_to_empty() {
        let json = r#"{ "web": { "bookmarks": [ { "name": "Only name" } ] } }"#;
        let doc = SettingsDocument::from_slice(json.as_bytes()).unwrap();
        let bookmarks = doc.web.unwrap().bookmarks.unwrap();
        assert_eq!(bookmarks[0].url, "");
    }

    #[test]
    fn test_pretty_output_uses_four_spaces() {
        let doc = SettingsDocument {
            installs: Some(InstallsSection {
                ignore_required_fw_version: Some(true),
            }),
            ..Default::default()
        };
        let text = String::from_utf8(doc.to_pretty_json().unwrap()).unwrap();
        assert!(text.contains("\n    \"installs\": {\n        \"ignoreRequiredFwVersion\": true"));
        assert!(!text.contains("general"));
    }
}
