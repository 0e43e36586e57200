//! Line-oriented presenter for terminals.
//!
//! Results are drawn as a numbered grid on stdout while the launcher is
//! visible. Input is read line by line from stdin: a number activates that
//! result, an empty line dismisses, anything else becomes the search phrase.

use std::io::{BufRead, Write};

use launchpad_core::{DesktopEntry, Presenter, UiEvent};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::icons::IconCache;

const MAX_LABEL_CHARS: usize = 20;
const TRUNCATED_LABEL_CHARS: usize = 17;

struct Row {
    label: String,
    icon: Option<String>,
    description: String,
}

pub struct ConsolePresenter<W: Write> {
    out: W,
    icons: IconCache,
    columns: usize,
    spacing: usize,
    rows: Vec<Row>,
    status: String,
    visible: bool,
    focused: Option<usize>,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, icons: IconCache, columns: u32, spacing: u32) -> Self {
        Self {
            out,
            icons,
            columns: usize::try_from(columns).unwrap_or(1).max(1),
            spacing: usize::try_from(spacing / 10).unwrap_or(1).max(1),
            rows: Vec::new(),
            status: String::new(),
            visible: false,
            focused: None,
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn redraw(&mut self) {
        if !self.visible {
            return;
        }
        if let Err(e) = self.draw() {
            warn!("Failed to draw results: {e}");
        }
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let width = MAX_LABEL_CHARS + 6;
        let gap = " ".repeat(self.spacing);

        for (line_no, chunk) in self.rows.chunks(self.columns).enumerate() {
            let cells: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, row)| {
                    let number = line_no * self.columns + col + 1;
                    let marker = if self.focused == Some(number - 1) { '>' } else { ' ' };
                    format!("{marker}{number:>3} {:<width$}", row.label, width = width - 5)
                })
                .collect();
            writeln!(self.out, "{}", cells.join(&gap).trim_end())?;
        }

        if let Some(row) = self.focused.and_then(|idx| self.rows.get(idx)) {
            if let Some(icon) = &row.icon {
                debug!("Focused icon: {icon}");
            }
            writeln!(self.out, "{}", row.description)?;
        }
        writeln!(self.out, "-- {} --", self.status)?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn show_results(&mut self, results: &[&DesktopEntry]) {
        self.rows = results
            .iter()
            .map(|entry| Row {
                label: truncate_label(&entry.name_localized),
                icon: self
                    .icons
                    .resolve(&entry.icon)
                    .map(|path| path.display().to_string()),
                description: entry.comment_localized.clone(),
            })
            .collect();
        self.focused = None;
        self.redraw();
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.redraw();
        } else if let Err(e) = writeln!(self.out, "-- hidden --").and_then(|()| self.out.flush()) {
            warn!("Failed to write: {e}");
        }
    }

    fn reset_scroll(&mut self) {
        self.focused = None;
    }

    fn focus_first(&mut self) {
        self.focused = (!self.rows.is_empty()).then_some(0);
    }
}

/// Labels longer than 20 chars are cut to 17 and get an ellipsis.
fn truncate_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let head: String = name.chars().take(TRUNCATED_LABEL_CHARS).collect();
        format!("{head}…")
    } else {
        name.to_string()
    }
}

/// Map one input line to a UI event.
#[must_use]
pub fn parse_input_line(line: &str) -> UiEvent {
    let line = line.trim();
    if line.is_empty() {
        return UiEvent::Dismiss;
    }
    match line.parse::<usize>() {
        Ok(number) if number > 0 => UiEvent::Activate(number - 1),
        _ => UiEvent::Search(line.to_string()),
    }
}

/// Forward stdin lines as UI events from a blocking thread until EOF or
/// until the event loop has gone away.
pub fn spawn_stdin_reader(tx: UnboundedSender<UiEvent>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(parse_input_line(&line)).is_err() {
                break;
            }
        }
        debug!("Stdin closed");
    });
}
