//! Services wrapping data-layer collaborators.

pub mod settings;

pub use settings::{MemorySettingsStore, SettingsService, SettingsStore};
