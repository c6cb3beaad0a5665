//! Renders the translate extension icon.
//!
//! The icon is drawn procedurally from a small design table ([`design`]) or,
//! alternatively, resampled from an existing master image. See
//! [`icon_gen::generate_icons`] for the batch entry point.

pub mod design;
pub mod error;
pub mod icon_gen;
pub mod manifest_json;
pub mod render;
