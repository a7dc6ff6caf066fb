use super::document::{
    BookmarkEntry, GeneralSection, InstallsSection, SettingsDocument, UiSection, WebSection,
};
use super::explorer::Explorer;
use crate::color::{ColorScheme, Rgba};
use crate::language::{Language, LocaleSource};
use rand::Rng;
use std::num::NonZeroU32;
use thiserror::Error;

/// Device path of the settings document
pub const SETTINGS_PATH: &str = "sdmc:/switch/leafcfg/settings.json";

/// Prefix of resources bundled with the application
pub const BUILTIN_PREFIX: &str = "romfs:";

pub const DEFAULT_MENU_ITEM_SIZE: u32 = 80;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// The document is not well-formed JSON
    #[error("settings document is not valid JSON")]
    Parse(#[source] serde_json::Error),

    /// A recognized key holds a value of the wrong shape
    #[error("malformed settings value: {0}")]
    Format(String),

    #[error("failed to serialize settings")]
    Serialize(#[source] serde_json::Error),

    #[error("I/O error accessing {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => SettingsError::Format(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => SettingsError::Parse(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// A saved web bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebBookmark {
    pub name: String,
    pub url: String,
}

/// Effective settings: computed defaults plus the user's explicit overrides.
///
/// Every `Option` field is an override; `Some` means the user set it and it
/// will be written back on save.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Language derived from the system locale
    pub system_language: Language,
    /// Scheme generated at startup
    pub default_scheme: ColorScheme,

    pub custom_language: Option<Language>,
    /// Always normalized to `sdmc:/...`, only set through `set_external_romfs`
    external_romfs: Option<String>,
    pub custom_menu_item_size: Option<NonZeroU32>,
    pub custom_scheme: Option<ColorScheme>,
    pub scrollbar_color: Option<Rgba>,
    pub progress_bar_color: Option<Rgba>,

    pub ignore_required_fw_version: bool,
    pub bookmarks: Vec<WebBookmark>,
}

impl Settings {
    /// Baseline settings with no user overrides
    pub fn defaults<R: Rng>(locale: &dyn LocaleSource, rng: &mut R) -> Self {
        Self {
            system_language: locale.language(),
            default_scheme: ColorScheme::random(rng),
            custom_language: None,
            external_romfs: None,
            custom_menu_item_size: None,
            custom_scheme: None,
            scrollbar_color: None,
            progress_bar_color: None,
            ignore_required_fw_version: true,
            bookmarks: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.custom_language.unwrap_or(self.system_language)
    }

    pub fn menu_item_size(&self) -> u32 {
        self.custom_menu_item_size.map_or(DEFAULT_MENU_ITEM_SIZE, NonZeroU32::get)
    }

    pub fn external_romfs(&self) -> Option<&str> {
        self.external_romfs.as_deref()
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.custom_scheme.unwrap_or(self.default_scheme)
    }

    pub fn set_language(&mut self, language: Language) {
        self.custom_language = Some(language);
    }

    /// Set the external resource root, normalizing it onto the device.
    /// An empty value clears it.
    pub fn set_external_romfs(&mut self, prefix: &str, root: &str) {
        self.external_romfs = if root.is_empty() {
            None
        } else {
            Some(normalize_device_path(prefix, root))
        };
    }

    /// Zero clears the override
    pub fn set_menu_item_size(&mut self, size: u32) {
        self.custom_menu_item_size = NonZeroU32::new(size);
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.custom_scheme = Some(scheme);
    }

    /// Add a bookmark; returns false if either field is empty
    pub fn add_bookmark(&mut self, name: impl Into<String>, url: impl Into<String>) -> bool {
        let (name, url) = (name.into(), url.into());
        if name.is_empty() || url.is_empty() {
            return false;
        }
        self.bookmarks.push(WebBookmark { name, url });
        true
    }

    pub fn remove_bookmark(&mut self, index: usize) -> Option<WebBookmark> {
        (index < self.bookmarks.len()).then(|| self.bookmarks.remove(index))
    }

    /// Overlay a parsed document onto these settings. Nothing changes
    /// unless every recognized key decodes.
    pub fn apply_document(&mut self, doc: SettingsDocument, device_prefix: &str) -> Result<()> {
        let mut next = self.clone();
        next.overlay(doc, device_prefix)?;
        *self = next;
        Ok(())
    }

    fn overlay(&mut self, doc: SettingsDocument, device_prefix: &str) -> Result<()> {
        if let Some(general) = doc.general {
            if let Some(name) = non_empty(general.custom_language) {
                let language = Language::from_name(&name).ok_or_else(|| {
                    SettingsError::Format(format!(
                        "general.customLanguage: unknown language '{name}'"
                    ))
                })?;
                self.custom_language = Some(language);
            }
            if let Some(root) = non_empty(general.external_rom_fs) {
                self.set_external_romfs(device_prefix, &root);
            }
        }

        if let Some(ui) = doc.ui {
            if let Some(size) = ui.menu_item_size.filter(|size| *size > 0) {
                let size = u32::try_from(size).map_err(|_| {
                    SettingsError::Format(format!("ui.menuItemSize: {size} is out of range"))
                })?;
                self.set_menu_item_size(size);
            }

            let mut scheme = self.color_scheme();
            let mut scheme_set = false;
            for (key, value, slot) in [
                ("background", ui.background, &mut scheme.background),
                ("base", ui.base, &mut scheme.base),
                ("baseFocus", ui.base_focus, &mut scheme.base_focus),
                ("text", ui.text, &mut scheme.text),
            ] {
                if let Some(color) = decode_color(key, value)? {
                    *slot = color;
                    scheme_set = true;
                }
            }
            if scheme_set {
                self.custom_scheme = Some(scheme);
            }

            if let Some(color) = decode_color("scrollBar", ui.scroll_bar)? {
                self.scrollbar_color = Some(color);
            }
            if let Some(color) = decode_color("progressBar", ui.progress_bar)? {
                self.progress_bar_color = Some(color);
            }
        }

        if let Some(flag) = doc.installs.and_then(|i| i.ignore_required_fw_version) {
            self.ignore_required_fw_version = flag;
        }

        if let Some(bookmarks) = doc.web.and_then(|w| w.bookmarks) {
            self.bookmarks.extend(
                bookmarks
                    .into_iter()
                    .filter(|b| !b.name.is_empty() && !b.url.is_empty())
                    .map(|b| WebBookmark {
                        name: b.name,
                        url: b.url,
                    }),
            );
        }

        Ok(())
    }

    /// Sparse document holding only the explicit overrides, plus the
    /// firmware policy and bookmarks which are always written
    pub fn to_document(&self) -> SettingsDocument {
        let general = GeneralSection {
            custom_language: self.custom_language.map(|l| l.as_str().to_string()),
            external_rom_fs: self.external_romfs.clone(),
        };

        let mut ui = UiSection {
            menu_item_size: self.custom_menu_item_size.map(|size| i64::from(size.get())),
            scroll_bar: self.scrollbar_color.map(|c| c.to_hex()),
            progress_bar: self.progress_bar_color.map(|c| c.to_hex()),
            ..Default::default()
        };
        if let Some(scheme) = &self.custom_scheme {
            ui.background = Some(scheme.background.to_hex());
            ui.base = Some(scheme.base.to_hex());
            ui.base_focus = Some(scheme.base_focus.to_hex());
            ui.text = Some(scheme.text.to_hex());
        }

        SettingsDocument {
            general: (!general.is_empty()).then_some(general),
            ui: (!ui.is_empty()).then_some(ui),
            installs: Some(InstallsSection {
                ignore_required_fw_version: Some(self.ignore_required_fw_version),
            }),
            web: Some(WebSection {
                bookmarks: Some(
                    self.bookmarks
                        .iter()
                        .map(|b| BookmarkEntry {
                            name: b.name.clone(),
                            url: b.url.clone(),
                        })
                        .collect(),
                ),
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn decode_color(key: &str, value: Option<String>) -> Result<Option<Rgba>> {
    non_empty(value)
        .map(|hex| {
            Rgba::from_hex(&hex).map_err(|e| SettingsError::Format(format!("ui.{key}: {e}")))
        })
        .transpose()
}

/// Root a user-supplied path on the device with exactly one separator
/// after the prefix: `themes`, `/themes` and `sdmc:/themes` all become
/// `sdmc:/themes`.
pub fn normalize_device_path(prefix: &str, path: &str) -> String {
    if path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/')) {
        return path.to_string();
    }
    let separator = if path.starts_with('/') { "" } else { "/" };
    format!("{prefix}{separator}{path}")
}

/// Loads, saves and resolves against the settings document on a device
#[derive(Debug)]
pub struct SettingsStore<E: Explorer> {
    explorer: E,
    path: String,
}

impl<E: Explorer> SettingsStore<E> {
    pub fn new(explorer: E) -> Self {
        Self::with_path(explorer, SETTINGS_PATH)
    }

    pub fn with_path(explorer: E, path: impl Into<String>) -> Self {
        Self {
            explorer,
            path: path.into(),
        }
    }

    pub fn explorer(&self) -> &E {
        &self.explorer
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Load the effective settings for this process
    pub fn load(&self, locale: &dyn LocaleSource) -> Result<Settings> {
        self.load_over(Settings::defaults(locale, &mut rand::thread_rng()))
    }

    /// Overlay the persisted document, if any, onto `defaults`
    pub fn load_over(&self, mut defaults: Settings) -> Result<Settings> {
        let Some(data) = self.explorer.read_file(&self.path).map_err(|e| self.io_error(e))? else {
            return Ok(defaults);
        };
        let doc = SettingsDocument::from_slice(&data)?;
        defaults.apply_document(doc, self.explorer.prefix())?;
        Ok(defaults)
    }

    /// Replace the persisted document with the overrides in `settings`.
    ///
    /// The old document is deleted before the new one is written, so a
    /// failure in between leaves no document behind.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let data = settings
            .to_document()
            .to_pretty_json()
            .map_err(SettingsError::Serialize)?;
        self.reset()?;
        self.explorer
            .write_file(&self.path, &data)
            .map_err(|e| self.io_error(e))
    }

    pub fn exists(&self) -> bool {
        self.explorer.is_file(&self.path)
    }

    /// Delete the persisted document if there is one
    pub fn reset(&self) -> Result<()> {
        if self.exists() {
            self.explorer
                .delete_file(&self.path)
                .map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }

    /// Path to load a resource from: the override under the external root
    /// when that file exists, otherwise the bundled copy
    pub fn resource_path(&self, settings: &Settings, resource: &str) -> String {
        let resource = resource.trim_start_matches('/');
        if let Some(root) = settings.external_romfs() {
            let candidate = format!("{}/{}", root.trim_end_matches('/'), resource);
            if self.explorer.is_file(&candidate) {
                return candidate;
            }
        }
        format!("{BUILTIN_PREFIX}/{resource}")
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
