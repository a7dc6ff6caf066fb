pub mod document;
pub mod explorer;
pub mod settings;

pub use explorer::{Explorer, FsExplorer, DEVICE_PREFIX};
pub use settings::{Settings, SettingsError, SettingsStore, WebBookmark};
