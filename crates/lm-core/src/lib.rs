/// Configuration, types, and shared structures for lumascii.
///
/// This crate contains the value types, the lookup table, the error type
/// and the configuration logic used across the lumascii workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod profile;

pub use charset::LuminosityTable;
pub use config::ConvertConfig;
pub use error::CoreError;
pub use frame::{AsciiGrid, PixelGrid};
pub use profile::{DisplayProfile, ProfilePreset};
