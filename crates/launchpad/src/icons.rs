//! Icon lookup for the presentation layer.
//!
//! Resolution order for an entry's `Icon` value: the exact path when it
//! contains a `/`, then the icon theme directories, then the `image-missing`
//! icon, then `unknown`. Results are cached by the raw icon string.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

const IMAGE_SUFFIXES: [&str; 3] = [".svg", ".png", ".xpm"];
const MISSING_ICON: &str = "image-missing";
const UNKNOWN_ICON: &str = "unknown";

/// Base icon directories: `$XDG_DATA_HOME/icons`, `~/.icons`, then
/// `icons` and `pixmaps` under every `$XDG_DATA_DIRS` entry.
#[must_use]
pub fn icon_base_dirs<F>(env: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|value| !value.is_empty());
    let home = non_empty("HOME");

    let mut dirs = Vec::new();
    if let Some(data_home) = non_empty("XDG_DATA_HOME") {
        dirs.push(Path::new(&data_home).join("icons"));
    } else if let Some(home) = &home {
        dirs.push(Path::new(home).join(".local/share/icons"));
    }
    if let Some(home) = &home {
        dirs.push(Path::new(home).join(".icons"));
    }

    let data_dirs =
        non_empty("XDG_DATA_DIRS").unwrap_or_else(|| "/usr/local/share/:/usr/share/".to_string());
    for dir in data_dirs.split(':').filter(|dir| !dir.is_empty()) {
        dirs.push(Path::new(dir).join("icons"));
        dirs.push(Path::new(dir).join("pixmaps"));
    }

    dirs
}

/// Cache of icon string -> resolved file.
#[derive(Debug)]
pub struct IconCache {
    base_dirs: Vec<PathBuf>,
    theme: String,
    size: u32,
    cache: HashMap<String, Option<PathBuf>>,
}

impl IconCache {
    #[must_use]
    pub fn new(base_dirs: Vec<PathBuf>, size: u32) -> Self {
        Self {
            base_dirs,
            theme: "hicolor".to_string(),
            size,
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn from_env(size: u32) -> Self {
        Self::new(icon_base_dirs(|key| std::env::var(key).ok()), size)
    }

    /// File for `icon`, following the fallback chain. `None` only when even
    /// the fallback icons are missing.
    pub fn resolve(&mut self, icon: &str) -> Option<&Path> {
        if !self.cache.contains_key(icon) {
            let resolved = self.lookup_with_fallback(icon);
            if resolved.is_none() {
                debug!("No icon found for {icon:?}");
            }
            self.cache.insert(icon.to_string(), resolved);
        }
        self.cache.get(icon).and_then(Option::as_deref)
    }

    fn lookup_with_fallback(&self, icon: &str) -> Option<PathBuf> {
        let found = if icon.is_empty() {
            None
        } else {
            self.lookup(icon).or_else(|| self.lookup(MISSING_ICON))
        };
        found.or_else(|| self.lookup(UNKNOWN_ICON))
    }

    fn lookup(&self, icon: &str) -> Option<PathBuf> {
        if icon.contains('/') {
            let path = PathBuf::from(icon);
            return path.is_file().then_some(path);
        }

        let name = strip_image_suffix(icon);
        self.candidates(name).find(|path| path.is_file())
    }

    fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let sized = format!("{0}x{0}", self.size);
        self.base_dirs.iter().flat_map(move |base| {
            let theme = base.join(&self.theme);
            [
                theme.join(&sized).join("apps").join(format!("{name}.png")),
                theme.join(&sized).join("apps").join(format!("{name}.svg")),
                theme.join("scalable/apps").join(format!("{name}.svg")),
                base.join(format!("{name}.png")),
                base.join(format!("{name}.svg")),
                base.join(format!("{name}.xpm")),
            ]
        })
    }
}

/// `netflix-desktop.svg` -> `netflix-desktop`.
fn strip_image_suffix(icon: &str) -> &str {
    IMAGE_SUFFIXES
        .iter()
        .find_map(|suffix| icon.strip_suffix(suffix))
        .unwrap_or(icon)
}
