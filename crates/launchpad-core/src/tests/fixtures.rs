//! Test fixtures and helpers

use crate::app::Presenter;
use crate::entry::{DesktopEntry, Locale};
use crate::index::EntryIndex;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Minimal desktop file body with a name and exec line
pub fn desktop_file(name: &str, exec: &str) -> String {
    format!("[Desktop Entry]\nType=Application\nName={name}\nExec={exec}\n")
}

/// Desktop file body marked `NoDisplay=true`
pub fn hidden_desktop_file(name: &str, exec: &str) -> String {
    format!("{}NoDisplay=true\n", desktop_file(name, exec))
}

/// Write `content` to `dir/file_name`, creating `dir` if needed
pub fn write_entry(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Two application directories under one temp root, highest priority first
pub struct SourceTree {
    pub root: TempDir,
    pub user: PathBuf,
    pub system: PathBuf,
}

impl SourceTree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let user = root.path().join("user/applications");
        let system = root.path().join("system/applications");
        std::fs::create_dir_all(&user).unwrap();
        std::fs::create_dir_all(&system).unwrap();
        Self { root, user, system }
    }

    pub fn index(&self) -> EntryIndex {
        EntryIndex::new(vec![self.user.clone(), self.system.clone()], Locale::default())
    }
}

/// Ids of the entries in order
pub fn ids<'a>(entries: impl IntoIterator<Item = &'a DesktopEntry>) -> Vec<String> {
    entries.into_iter().map(|entry| entry.id.clone()).collect()
}

/// Presenter that records every call
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub results: Vec<String>,
    pub status: String,
    pub visible: bool,
    pub renders: usize,
    pub scroll_resets: usize,
    pub focus_requests: usize,
}

impl Presenter for RecordingPresenter {
    fn show_results(&mut self, results: &[&DesktopEntry]) {
        self.results = results.iter().map(|entry| entry.id.clone()).collect();
        self.renders += 1;
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn reset_scroll(&mut self) {
        self.scroll_resets += 1;
    }

    fn focus_first(&mut self) {
        self.focus_requests += 1;
    }
}
