//! Desktop entry parsing.
//!
//! Only the `[Desktop Entry]` group is read, and only the handful of keys the
//! launcher actually consumes. Everything else in the file is ignored.

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DESKTOP_ENTRY_GROUP: &str = "[Desktop Entry]";

/// One application parsed from a `.desktop` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Basename of the source file, unique within an index
    pub id: String,
    pub name: String,
    /// `Name[<lang>]`, or `name` when the file has no translation
    pub name_localized: String,
    pub comment: String,
    /// `Comment[<lang>]`, or `comment` when the file has no translation
    pub comment_localized: String,
    /// Absolute path, theme icon name, or icon name with an image suffix
    pub icon: String,
    /// Raw `Exec` line with all quote characters removed
    pub exec: String,
    pub category: String,
    pub terminal: bool,
    /// `NoDisplay=true`: kept in the index but never listed
    pub no_display: bool,
}

/// Primary language subtag used to pick translated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    lang: String,
}

impl Locale {
    /// Derive the locale from a `LANG` value such as `pl_PL.UTF-8`.
    ///
    /// The encoding suffix and the region subtag are both dropped, so the
    /// example yields `pl`.
    #[must_use]
    pub fn from_lang(lang: &str) -> Self {
        let without_encoding = lang.split('.').next().unwrap_or_default();
        let primary = without_encoding.split('_').next().unwrap_or_default();
        Self {
            lang: primary.to_string(),
        }
    }

    /// Read `LANG` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lang(&std::env::var("LANG").unwrap_or_default())
    }

    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn name_key(&self) -> String {
        format!("Name[{}]", self.lang)
    }

    fn comment_key(&self) -> String {
        format!("Comment[{}]", self.lang)
    }
}

/// Parse a desktop entry from `reader`.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the stream cannot be read as UTF-8 text.
pub fn parse_entry<R: BufRead>(id: &str, reader: R, locale: &Locale) -> Result<DesktopEntry> {
    let name_key = locale.name_key();
    let comment_key = locale.comment_key();

    let mut entry = DesktopEntry {
        id: id.to_string(),
        ..Default::default()
    };

    for line in reader.lines() {
        let line = line.map_err(|source| Error::Parse {
            id: id.to_string(),
            source,
        })?;

        if line.starts_with('[') && line != DESKTOP_ENTRY_GROUP {
            break;
        }

        let Some((key, value)) = split_key_value(&line) else {
            continue;
        };

        match key {
            "Name" => entry.name = value.to_string(),
            "Comment" => entry.comment = value.to_string(),
            "Icon" => entry.icon = value.to_string(),
            "Categories" => entry.category = value.to_string(),
            "Terminal" => entry.terminal = parse_bool(value).unwrap_or_default(),
            "NoDisplay" => entry.no_display = parse_bool(value).unwrap_or_default(),
            "Exec" => entry.exec = value.replace(['"', '\''], ""),
            k if k == name_key => entry.name_localized = value.to_string(),
            k if k == comment_key => entry.comment_localized = value.to_string(),
            _ => {}
        }
    }

    if entry.name_localized.is_empty() {
        entry.name_localized.clone_from(&entry.name);
    }
    if entry.comment_localized.is_empty() {
        entry.comment_localized.clone_from(&entry.comment);
    }

    Ok(entry)
}

/// Open and parse the desktop entry at `path`, using its basename as the id.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_entry_file(path: &Path, locale: &Locale) -> Result<DesktopEntry> {
    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = File::open(path)?;
    parse_entry(&id, BufReader::new(file), locale)
}

/// Split `key=value` at the first `=`, trimming both halves.
///
/// Lines without a key or with an empty value yield `None`.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.trim(), value))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
