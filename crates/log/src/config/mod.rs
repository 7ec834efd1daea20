//! Configuration types
//!
//! - `base`: [`Config`], [`Format`] and [`Level`]
//! - `display`: [`DisplayConfig`]
//! - `presets`: environment parsing and the development / production setups

mod base;
mod display;
mod presets;

pub use base::{Config, Format, Level};
pub use display::DisplayConfig;
