//! Configuration module for Skriv.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{GeneralSettings, Settings, StoreSettings, TranscriptionSettings};
