//! Logo Studio Core
//!
//! This crate contains everything about a logo that does not need a GPU:
//! - Presets: style, material, brand and background lookup tables
//! - EditorState: the flat parameter record and its validated store
//! - TierGate: Free/Pro feature switch
//! - Export: filenames, image encoding, SVG template, video recording

pub mod color;
pub mod export;
pub mod preset;
pub mod state;
pub mod texture;
pub mod tier;

pub use color::*;
pub use export::*;
pub use preset::*;
pub use state::*;
pub use texture::*;
pub use tier::*;
