//! Desktop entry discovery and the in-memory entry index.

use crate::entry::{DesktopEntry, Locale, parse_entry_file};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_DATA_DIRS: &str = "/usr/local/share/:/usr/share/";
const SYSTEM_FLATPAK_APPS: &str = "/var/lib/flatpak/exports/share/applications";

/// Counters from the last scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Entries kept in the index, hidden ones included
    pub found: usize,
    /// Files skipped because an entry with the same basename was already kept
    pub duplicates: usize,
    /// Kept entries with `NoDisplay=true`
    pub hidden: usize,
}

impl ScanStats {
    /// Human readable summary, e.g. `42 entries (+3 hidden)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} entries (+{} hidden)",
            self.found - self.hidden,
            self.hidden
        )
    }
}

/// Application directories in priority order.
///
/// `env` looks up an environment variable; pass
/// `|key| std::env::var(key).ok()` for the process environment.
#[must_use]
pub fn source_dirs<F>(env: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|value| !value.is_empty());

    let home = non_empty("HOME");
    let data_dirs = non_empty("XDG_DATA_DIRS").unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());

    let mut dirs = Vec::new();
    if let Some(data_home) = non_empty("XDG_DATA_HOME") {
        dirs.push(Path::new(&data_home).join("applications"));
    } else if let Some(home) = &home {
        dirs.push(Path::new(home).join(".local/share/applications"));
    }

    for dir in data_dirs.split(':').filter(|dir| !dir.is_empty()) {
        dirs.push(Path::new(dir).join("applications"));
    }

    let mut flatpak_dirs = Vec::new();
    if let Some(home) = &home {
        flatpak_dirs.push(Path::new(home).join(".local/share/flatpak/exports/share/applications"));
    }
    flatpak_dirs.push(PathBuf::from(SYSTEM_FLATPAK_APPS));

    for dir in flatpak_dirs {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    dirs
}

/// A file is a candidate iff the last dot-separated segment of its name is `desktop`.
fn is_desktop_file(name: &str) -> bool {
    name.rsplit('.').next() == Some("desktop")
}

/// Candidate files of one directory, sorted by name. Unreadable directories yield nothing.
fn list_desktop_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = read_dir
        .flatten()
        .filter(|entry| is_desktop_file(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files
}

/// Sorted, deduplicated set of desktop entries.
///
/// The index is rebuilt from scratch on every [`refresh`](Self::refresh);
/// entries are never modified in place.
#[derive(Debug, Clone)]
pub struct EntryIndex {
    sources: Vec<PathBuf>,
    locale: Locale,
    entries: Vec<DesktopEntry>,
    stats: ScanStats,
}

impl EntryIndex {
    /// Create an empty index over `sources`, highest priority first.
    #[must_use]
    pub fn new(sources: Vec<PathBuf>, locale: Locale) -> Self {
        Self {
            sources,
            locale,
            entries: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Index over the standard XDG and flatpak directories of the current user.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(source_dirs(|key| std::env::var(key).ok()), Locale::from_env())
    }

    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Rescan every source directory and replace the index contents.
    pub fn refresh(&mut self) -> ScanStats {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();
        let mut stats = ScanStats::default();

        for path in self.sources.iter().flat_map(|dir| list_desktop_files(dir)) {
            let id = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            if seen.contains(&id) {
                stats.duplicates += 1;
                continue;
            }

            let entry = match parse_entry_file(&path, &self.locale) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if entry.no_display {
                stats.hidden += 1;
            }

            seen.insert(entry.id.clone());
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.name_localized.cmp(&b.name_localized));
        stats.found = entries.len();

        info!("Found {} desktop files", stats.found);
        info!(
            "Skipped {} duplicates; {} entries hidden by NoDisplay=true",
            stats.duplicates, stats.hidden
        );

        self.entries = entries;
        self.stats = stats;
        stats
    }

    /// `N entries (+H hidden)` for the last refresh.
    #[must_use]
    pub fn summary(&self) -> String {
        self.stats.summary()
    }

    /// All entries in sorted order, hidden ones included.
    #[must_use]
    pub fn entries(&self) -> &[DesktopEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DesktopEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-hidden entries matching `phrase`, in index order.
    ///
    /// The returned iterator is lazy and can be cloned to restart it.
    #[must_use]
    pub fn query<'a>(&'a self, phrase: &str) -> Query<'a> {
        Query {
            entries: self.entries.iter(),
            phrase: phrase.to_lowercase(),
        }
    }
}

/// Iterator returned by [`EntryIndex::query`].
#[derive(Debug, Clone)]
pub struct Query<'a> {
    entries: std::slice::Iter<'a, DesktopEntry>,
    phrase: String,
}

impl<'a> Iterator for Query<'a> {
    type Item = &'a DesktopEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let phrase = &self.phrase;
        self.entries
            .by_ref()
            .find(|entry| !entry.no_display && matches_phrase(entry, phrase))
    }
}

/// Case-insensitive substring match; `phrase` must already be lowercase.
fn matches_phrase(entry: &DesktopEntry, phrase: &str) -> bool {
    if phrase.is_empty() {
        return true;
    }
    [
        &entry.name_localized,
        &entry.comment_localized,
        &entry.comment,
        &entry.exec,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_desktop_file() {
        assert!(is_desktop_file("firefox.desktop"));
        assert!(is_desktop_file("org.gnome.Nautilus.desktop"));
        assert!(!is_desktop_file("firefox.desktop.bak"));
        assert!(!is_desktop_file("mimeinfo.cache"));
    }

    #[test]
    fn test_summary_format() {
        let stats = ScanStats {
            found: 10,
            duplicates: 2,
            hidden: 3,
        };
        assert_eq!(stats.summary(), "7 entries (+3 hidden)");
    }

    #[test]
    fn test_matches_empty_phrase() {
        let entry = DesktopEntry::default();
        assert!(matches_phrase(&entry, ""));
    }
}
