// Settings service
// Reads and writes the layout configuration file

mod service;

pub use service::{default_settings_path, layout_engine, SettingsService};
