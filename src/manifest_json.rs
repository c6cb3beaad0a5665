//! `icons` fragment of a browser extension manifest
//!
//! Lists the generated PNG files by pixel size so they can be pasted into
//! (or merged with) the extension's `manifest.json`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

/// File name of the fragment inside the output directory.
pub const MANIFEST_FILE: &str = "icons.json";

/// Root structure of the fragment.
///
/// Sizes are kept in a `BTreeMap` so the keys come out in numeric order.
#[derive(Serialize, Debug, Clone, Default)]
pub struct IconsManifest {
    /// Directory of the icons relative to the extension root, empty for the root itself.
    #[serde(skip)]
    pub icon_dir: String,
    pub icons: BTreeMap<u32, String>,
}

impl IconsManifest {
    pub fn new(icon_dir: &str) -> Self {
        Self {
            icon_dir: icon_dir.to_string(),
            icons: BTreeMap::new(),
        }
    }

    /// Register the file written for `size`.
    pub fn add_icon(&mut self, size: u32, filename: &str) {
        let path = if self.icon_dir.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{filename}", self.icon_dir)
        };
        self.icons.insert(size, path);
    }
}

/// Name the extension uses for the output directory.
///
/// The output directory is taken to sit directly under the extension root, so
/// only its last component is kept (`./icons` and `ext/icons` both give `icons`).
pub fn icon_dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write `icons.json` into `dir` for the given `(size, filename)` pairs.
pub fn write_manifest(dir: &Path, entries: &[(u32, String)]) -> Result<()> {
    let mut manifest = IconsManifest::new(&icon_dir_name(dir));
    for (size, filename) in entries {
        manifest.add_icon(*size, filename);
    }

    let json =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize icons manifest")?;
    let path = dir.join(MANIFEST_FILE);
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))
}
